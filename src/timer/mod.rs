//! Monotonic timer wheel: one-shot and periodic timers delivered as
//! `MSG_TIMER` messages (§3, §4.6).
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `wheel.rs` - [`TimerWheel`]
//! - `error.rs` - [`TimerError`]

pub mod error;
pub mod wheel;

pub use error::TimerError;
pub use wheel::TimerWheel;
