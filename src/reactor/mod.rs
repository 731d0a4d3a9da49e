//! `poll`-style readiness multiplexer delivering fd events as messages (§4.7).
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `poller.rs` - [`Reactor`], the `poll(2)`-backed watch set
//! - `types.rs` - [`Interest`]
//! - `error.rs` - [`ReactorError`]

pub mod error;
pub mod poller;
pub mod types;

pub use error::ReactorError;
pub use poller::Reactor;
pub use types::Interest;
