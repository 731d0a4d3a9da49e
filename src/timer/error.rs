//! Timer wheel errors.

use thiserror::Error;

/// Errors returned by [`super::TimerWheel`] operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// `cancel_timer` was called with an id that was never issued.
    #[error("timer {0} was never issued")]
    Unknown(u64),
}
