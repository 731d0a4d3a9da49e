//! Monitoring error types.

use thiserror::Error;

/// Errors that can occur during monitoring operations.
#[derive(Debug, Error)]
pub enum MonitoringError {
    /// Configuration error during monitor initialization.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Error recording an event.
    #[error("Failed to record event: {message}")]
    RecordError {
        /// Error message describing the recording failure.
        message: String,
    },

    /// Error generating a snapshot.
    #[error("Failed to generate snapshot: {message}")]
    SnapshotError {
        /// Error message describing the snapshot failure.
        message: String,
    },
}

impl MonitoringError {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new record error.
    pub fn record(message: impl Into<String>) -> Self {
        Self::RecordError {
            message: message.into(),
        }
    }

    /// Creates a new snapshot error.
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::SnapshotError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_carries_message() {
        let err = MonitoringError::configuration("bad max_history_size");
        assert!(err.to_string().contains("bad max_history_size"));
    }

    #[test]
    fn record_error_carries_message() {
        let err = MonitoringError::record("ring buffer poisoned");
        assert!(err.to_string().contains("ring buffer poisoned"));
    }
}
