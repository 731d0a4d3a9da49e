//! Typed message envelopes and the kernel's reserved system-message sum type.
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `envelope.rs` - [`Message`], the owned envelope every send produces (§4.1)
//! - `kinds.rs` - [`SystemMessage`], the sum type for kernel-reserved type codes
//! - `error.rs` - [`MessageError`]

pub mod envelope;
pub mod error;
pub mod kinds;

pub use envelope::Message;
pub use error::MessageError;
pub use kinds::{
    ExitReason, NsMessage, SystemMessage, FIRST_RESERVED_TYPE, MSG_CHILD_EXIT, MSG_FD_EVENT,
    MSG_STOP, MSG_TIMER, MSG_TRANSPORT_READY, NS_LIST, NS_LOOKUP, NS_MOUNT, NS_NOTIFY,
    NS_REGISTER, NS_REPLY, NS_UMOUNT,
};
