//! Shared identifiers and small utilities used across the kernel.
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `ids.rs` - `NodeId`, `ActorId`, `TimerId` and their invalid sentinels
//! - `identity.rs` - node identity string derivation (hostname/MAC/env)

pub mod ids;
pub mod identity;
pub mod serde_helpers;

pub use ids::{ActorId, NodeId, TimerId};
pub use identity::NodeIdentity;
pub use serde_helpers::{duration_serde, serde_time};
