//! UDP transport variants (§4.8). No handshake: a datagram carries only its
//! frame, and the peer node id comes from the first datagram's `source_node`
//! field rather than from a stream handshake.

// Layer 1: Standard library imports
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::os::fd::{AsRawFd, RawFd};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::TransportError;
use super::frame::{decode_frame, encode_frame, Frame};
use super::traits::Transport;
use crate::util::NodeId;

/// Conservative limit under the typical UDP MTU so a single frame always
/// fits one datagram without the caller having to reason about path MTU.
pub const MAX_DATAGRAM_LEN: usize = 1432;

/// A UDP transport: bound-and-waiting-for-first-peer, or connected to a
/// known remote address up front.
pub struct UdpTransport {
    socket: UdpSocket,
    peer_addr: Option<SocketAddr>,
    peer_node: Option<NodeId>,
}

impl UdpTransport {
    /// Bind locally; the peer address is learned from the first datagram
    /// received (§4.8: "UDP-bind receives the peer address from the first
    /// datagram and thereafter is effectively connected").
    pub fn bind(addr: impl ToSocketAddrs) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_nonblocking(true)?;
        Ok(Self {
            socket,
            peer_addr: None,
            peer_node: None,
        })
    }

    /// Bind locally and target a known remote address immediately.
    pub fn connect(
        local_addr: impl ToSocketAddrs,
        peer_addr: impl ToSocketAddrs,
    ) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(local_addr)?;
        socket.set_nonblocking(true)?;
        let peer_addr = peer_addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| TransportError::Io(io::Error::other("no address resolved")))?;
        Ok(Self {
            socket,
            peer_addr: Some(peer_addr),
            peer_node: None,
        })
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, frame: &Frame) -> Result<bool, TransportError> {
        let Some(peer_addr) = self.peer_addr else {
            return Ok(false);
        };
        let bytes = encode_frame(frame);
        if bytes.len() > MAX_DATAGRAM_LEN {
            return Err(TransportError::OversizeDatagram {
                len: bytes.len(),
                limit: MAX_DATAGRAM_LEN,
            });
        }
        match self.socket.send_to(&bytes, peer_addr) {
            Ok(n) => Ok(n == bytes.len()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(TransportError::Io(e)),
        }
    }

    fn recv(&mut self) -> Result<Option<Frame>, TransportError> {
        let mut buf = [0u8; MAX_DATAGRAM_LEN];
        match self.socket.recv_from(&mut buf) {
            Ok((n, from)) => {
                if self.peer_addr.is_none() {
                    self.peer_addr = Some(from);
                }
                let (frame, _) = decode_frame(&buf[..n])?.ok_or_else(|| TransportError::Framing {
                    reason: "datagram shorter than its declared frame".to_string(),
                })?;
                if self.peer_node.is_none() {
                    self.peer_node = Some(frame.source_node);
                }
                Ok(Some(frame))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(TransportError::Io(e)),
        }
    }

    fn is_connected(&self) -> bool {
        self.peer_addr.is_some()
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        // Every datagram is written whole in `send`; nothing is ever buffered.
        Ok(())
    }

    fn peer_node(&self) -> Option<NodeId> {
        self.peer_node
    }

    fn fd(&self) -> RawFd {
        self.socket.as_raw_fd()
    }
}
