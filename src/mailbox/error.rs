//! Mailbox errors.

use thiserror::Error;

/// Errors returned by [`super::Mailbox`] operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// The mailbox is at capacity; the caller decides whether to drop,
    /// retry later, or shed load (§4.2, §5 Backpressure).
    #[error("mailbox is full (capacity {capacity})")]
    Full {
        /// The mailbox's fixed capacity.
        capacity: usize,
    },
}
