//! The router/runtime tying every module together into one node (§3, §4.9, §6).

pub mod config;
mod context;
mod core;
mod error;

pub use config::{RuntimeConfig, RuntimeConfigBuilder};
pub use context::Context;
pub use core::Runtime;
pub use error::RuntimeError;
