//! Runtime-level error types (§4.9, §7).

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::util::ActorId;

/// Errors surfaced by [`crate::runtime::Runtime`] operations.
///
/// Mirrors §7's taxonomy: most conditions are recoverable and reported back
/// to the caller; only allocator failure at init and transport-list
/// corruption are fatal, and those are represented by [`RuntimeError::Fatal`].
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The actor table is full (§4.9 `spawn`).
    #[error("actor table full: max_actors = {max_actors}")]
    TableFull { max_actors: usize },

    /// `dest` does not name a live actor on this node.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// A requested registry path already has a different binding.
    #[error("name already bound: {path}")]
    AlreadyExists { path: String },

    /// The addressed actor's mailbox rejected the message.
    #[error("mailbox full for actor {0}")]
    MailboxFull(ActorId),

    /// No transport reaches the destination node.
    #[error("no route to destination")]
    NoRoute,

    /// A transport reported a framing, handshake, or I/O failure.
    #[error("transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// An unrecoverable condition that terminates the node (§7).
    #[error("fatal runtime error: {0}")]
    Fatal(String),
}

impl RuntimeError {
    /// Whether the node must terminate in response to this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RuntimeError::Fatal(_))
    }

    /// Whether the caller can retry the same operation later.
    pub fn is_transient(&self) -> bool {
        matches!(self, RuntimeError::MailboxFull(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors_are_marked_fatal() {
        let err = RuntimeError::Fatal("allocator exhausted".to_string());
        assert!(err.is_fatal());
        assert!(!err.is_transient());
    }

    #[test]
    fn mailbox_full_is_transient_not_fatal() {
        let err = RuntimeError::MailboxFull(ActorId::new(crate::util::NodeId::new(1), 1));
        assert!(err.is_transient());
        assert!(!err.is_fatal());
    }

    #[test]
    fn display_includes_context() {
        let err = RuntimeError::TableFull { max_actors: 64 };
        assert!(err.to_string().contains("64"));
    }
}
