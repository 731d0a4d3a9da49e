//! The uniform contract every transport variant implements (§4.8).

// Layer 1: Standard library imports
use std::os::fd::RawFd;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::TransportError;
use super::frame::Frame;
use crate::util::NodeId;

/// A framed, bidirectional channel to one peer node (§3, §4.8).
///
/// Every variant (`Unix{Listen,Connect}`, `Tcp{Listen,Connect,FromAcceptedFd}`,
/// `Udp{Bind,Connect}`) implements this contract identically; the router
/// never matches on the concrete type, only on [`Transport::peer_node`] and
/// [`Transport::fd`] (§4.9's routing algorithm, §4.7's reactor integration).
/// `destroy` is `Drop`, not a method, since there is no owned resource a transport
/// holds past the point its value goes out of scope.
pub trait Transport {
    /// Serialize and best-effort deliver `frame`. Returns `true` iff the
    /// whole frame was handed to the kernel (queued or fully written);
    /// `false` on backpressure or a size violation the caller should treat as
    /// "retry or drop per policy" (§4.8, §5).
    fn send(&mut self, frame: &Frame) -> Result<bool, TransportError>;

    /// Return the next fully received, fully validated frame, or `None` if
    /// nothing is buffered yet. Never blocks (§4.8).
    fn recv(&mut self) -> Result<Option<Frame>, TransportError>;

    /// Whether the underlying endpoint is currently usable. A listener
    /// becomes connected once it has accepted its one peer (§4.8).
    fn is_connected(&self) -> bool;

    /// Best-effort write of whatever is still buffered (notably a handshake
    /// queued eagerly at connect/accept time, §6). The runtime calls this
    /// every step so a handshake egresses even when neither side has a
    /// routable application message to piggyback it on.
    fn flush(&mut self) -> Result<(), TransportError>;

    /// The node on the other end, once known (after a successful handshake
    /// or, for UDP, after the first datagram).
    fn peer_node(&self) -> Option<NodeId>;

    /// The file descriptor the reactor should poll for readiness (§4.7).
    fn fd(&self) -> RawFd;
}
