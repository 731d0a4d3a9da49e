//! Transport-layer errors (§7: "TransportError: framing mismatch, short
//! write on stream, oversize datagram, handshake failure").

// Layer 1: Standard library imports
use std::io;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors a [`super::Transport`] can report.
#[derive(Error, Debug)]
pub enum TransportError {
    /// A frame's fixed header failed validation (bad magic).
    #[error("frame error: {reason}")]
    Framing {
        /// What was wrong with the frame.
        reason: String,
    },

    /// The handshake frame failed validation.
    #[error("handshake failed: {reason}")]
    Handshake {
        /// Why the handshake was rejected.
        reason: String,
    },

    /// A datagram frame did not fit in a single packet.
    #[error("frame of {len} bytes exceeds the datagram limit of {limit} bytes")]
    OversizeDatagram {
        /// The frame's encoded length.
        len: usize,
        /// The transport's maximum datagram size.
        limit: usize,
    },

    /// The peer closed the connection or a listener has not yet accepted one.
    #[error("transport disconnected")]
    Disconnected,

    /// The underlying OS socket call failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
