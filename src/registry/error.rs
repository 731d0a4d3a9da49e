//! Name registry errors.

use thiserror::Error;

/// Errors returned by [`super::Registry`] operations.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::registry::RegistryError;
///
/// let err = RegistryError::InvalidPath {
///     path: "x".repeat(200),
/// };
/// assert!(err.to_string().contains("128"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// `path` is empty or exceeds the 128-byte limit (§3).
    #[error("path {path:?} is invalid: must be non-empty and at most 128 bytes")]
    InvalidPath {
        /// The offending path.
        path: String,
    },
    /// `path` is already bound to a different actor (§4.5).
    #[error("path {path:?} is already registered to a different actor")]
    AlreadyExists {
        /// The offending path.
        path: String,
    },
    /// `path` has no binding and no mount covers it (§4.5).
    #[error("path {path:?} is not registered")]
    NotFound {
        /// The offending path.
        path: String,
    },
    /// The registry has reached its configured entry capacity.
    #[error("registry is full (capacity {capacity})")]
    Full {
        /// The configured capacity.
        capacity: usize,
    },
}

impl RegistryError {
    /// The `NS_*` status code this error maps to on the wire (§4.5, §6).
    pub fn status(&self) -> super::NsStatus {
        match self {
            RegistryError::InvalidPath { .. } => super::NsStatus::EInval,
            RegistryError::AlreadyExists { .. } => super::NsStatus::EExist,
            RegistryError::NotFound { .. } => super::NsStatus::ENoent,
            RegistryError::Full { .. } => super::NsStatus::EFull,
        }
    }
}
