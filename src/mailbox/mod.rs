//! Per-actor bounded message queue (§3, §4.2).
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `ring.rs` - [`Mailbox`], the bounded ring buffer itself
//! - `error.rs` - [`MailboxError`]

pub mod error;
pub mod ring;

pub use error::MailboxError;
pub use ring::Mailbox;
