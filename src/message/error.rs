//! Message construction errors.

use thiserror::Error;

/// Errors that can occur while building a [`super::Message`].
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::message::MessageError;
///
/// let err = MessageError::AllocationFailed { requested_len: 64 };
/// assert!(err.to_string().contains("64"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Payload allocation failed (§4.1: creation fails only on allocation
    /// exhaustion). Surfaced to callers as a send failure.
    #[error("failed to allocate {requested_len} byte payload")]
    AllocationFailed {
        /// The payload length the caller requested.
        requested_len: usize,
    },
}
