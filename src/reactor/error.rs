//! I/O reactor errors.

use thiserror::Error;

/// Errors returned by [`super::Reactor`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReactorError {
    /// The underlying `poll(2)` call failed.
    #[error("poll(2) failed: {0}")]
    Poll(#[from] nix::errno::Errno),
}
