//! A handshaking, frame-accumulating wrapper shared by the Unix and TCP
//! stream variants (§4.8). Unix domain sockets and TCP sockets differ only in
//! how you open them; once open, both are a `Read + Write + AsRawFd` byte
//! pipe, so the handshake and framing logic that sits on top lives here once
//! instead of twice.

// Layer 1: Standard library imports
use std::io::{self, Read, Write};
use std::os::fd::{AsRawFd, RawFd};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::TransportError;
use super::frame::{decode_frame, Frame, Handshake, HANDSHAKE_LEN};
use crate::util::NodeId;

const READ_CHUNK: usize = 4096;

/// Either `TcpStream` or `UnixStream` exposes a blocking-mode toggle under a
/// different inherent method name with the same signature; this trait lets
/// [`StreamEndpoint`] call it generically.
pub trait SetNonblocking {
    /// Put the socket into (or out of) non-blocking mode.
    fn set_nonblocking(&self, nonblocking: bool) -> io::Result<()>;
}

impl SetNonblocking for std::net::TcpStream {
    fn set_nonblocking(&self, nonblocking: bool) -> io::Result<()> {
        std::net::TcpStream::set_nonblocking(self, nonblocking)
    }
}

impl SetNonblocking for std::os::unix::net::UnixStream {
    fn set_nonblocking(&self, nonblocking: bool) -> io::Result<()> {
        std::os::unix::net::UnixStream::set_nonblocking(self, nonblocking)
    }
}

/// A connected byte stream plus handshake state and a pending-frame buffer.
///
/// `send` never blocks past appending to an internal write buffer and
/// attempting one non-blocking flush; `recv` never blocks past one
/// non-blocking read. Both behave correctly with an arbitrarily fragmented
/// peer because the accumulation happens byte-wise, not frame-wise.
pub struct StreamEndpoint<S> {
    stream: S,
    peer_node: Option<NodeId>,
    in_buf: Vec<u8>,
    out_buf: Vec<u8>,
    closed: bool,
}

impl<S: Read + Write + AsRawFd + SetNonblocking> StreamEndpoint<S> {
    /// Wrap an already-connected stream, puts it into non-blocking mode, and
    /// queues this side's handshake for write immediately (§6: "each side
    /// writes a fixed header before any message frames") rather than waiting
    /// for the first outbound application message. A best-effort [`Self::flush`]
    /// runs right away; the runtime's per-step flush picks up anything left
    /// buffered after a partial write.
    pub fn new(stream: S, local_node: NodeId, local_identity: impl Into<String>) -> io::Result<Self> {
        stream.set_nonblocking(true)?;
        let handshake = Handshake::new(local_node, &local_identity.into());
        let mut endpoint = Self {
            stream,
            peer_node: None,
            in_buf: Vec::new(),
            out_buf: handshake.encode().to_vec(),
            closed: false,
        };
        let _ = endpoint.flush();
        Ok(endpoint)
    }

    /// Whether the peer's handshake has been read and validated.
    pub fn is_connected(&self) -> bool {
        !self.closed && self.peer_node.is_some()
    }

    /// The peer's node id, once its handshake has arrived.
    pub fn peer_node(&self) -> Option<NodeId> {
        self.peer_node
    }

    /// The underlying socket's raw descriptor.
    pub fn fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }

    /// Write out whatever is still buffered (handshake bytes left over from
    /// construction, or a frame that only partially wrote). Called by
    /// [`Self::send`] and by the owning transport's per-step flush.
    pub fn flush(&mut self) -> Result<(), TransportError> {
        while !self.out_buf.is_empty() {
            match self.stream.write(&self.out_buf) {
                Ok(0) => break,
                Ok(n) => {
                    self.out_buf.drain(0..n);
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransportError::Io(e)),
            }
        }
        Ok(())
    }

    fn drain_socket(&mut self) -> Result<(), TransportError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    self.closed = true;
                    break;
                }
                Ok(n) => self.in_buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransportError::Io(e)),
            }
        }
        Ok(())
    }

    /// Buffer a frame for write and best-effort flush it (the handshake, if
    /// any of it is still unsent, goes out ahead of it since it was queued
    /// first).
    pub fn send(&mut self, frame: &Frame) -> Result<bool, TransportError> {
        if self.closed {
            return Err(TransportError::Disconnected);
        }
        self.out_buf.extend(super::frame::encode_frame(frame));
        self.flush()?;
        Ok(true)
    }

    /// Read whatever is available and return the next whole frame, reading
    /// and validating the peer's handshake first if it has not arrived yet.
    pub fn recv(&mut self) -> Result<Option<Frame>, TransportError> {
        if self.closed {
            return Err(TransportError::Disconnected);
        }
        self.drain_socket()?;

        if self.peer_node.is_none() {
            if self.in_buf.len() < HANDSHAKE_LEN {
                return Ok(None);
            }
            let mut header = [0u8; HANDSHAKE_LEN];
            header.copy_from_slice(&self.in_buf[..HANDSHAKE_LEN]);
            let handshake = Handshake::decode(&header)?;
            self.in_buf.drain(0..HANDSHAKE_LEN);
            self.peer_node = Some(handshake.node_id);
        }

        match decode_frame(&self.in_buf)? {
            Some((frame, consumed)) => {
                self.in_buf.drain(0..consumed);
                Ok(Some(frame))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::util::ActorId;
    use std::os::unix::net::UnixStream;

    fn sample_frame() -> Frame {
        Frame {
            source_node: NodeId::new(1),
            dest: ActorId::new(NodeId::new(2), 1),
            source: ActorId::new(NodeId::new(1), 1),
            msg_type: 7,
            payload: vec![9, 9, 9],
        }
    }

    #[test]
    fn handshake_and_frame_round_trip_over_a_socketpair() {
        let (a, b) = UnixStream::pair().unwrap();
        let mut left = StreamEndpoint::new(a, NodeId::new(1), "left").unwrap();
        let mut right = StreamEndpoint::new(b, NodeId::new(2), "right").unwrap();

        assert!(left.send(&sample_frame()).unwrap());

        // Peer hasn't read anything yet.
        assert!(!right.is_connected());
        let received = right.recv().unwrap();
        assert_eq!(received, Some(sample_frame()));
        assert!(right.is_connected());
        assert_eq!(right.peer_node(), Some(NodeId::new(1)));
    }

    #[test]
    fn recv_with_nothing_sent_returns_none() {
        let (_a, b) = UnixStream::pair().unwrap();
        let mut right = StreamEndpoint::new(b, NodeId::new(2), "right").unwrap();
        assert_eq!(right.recv().unwrap(), None);
    }

    #[test]
    fn recv_after_peer_drop_reports_disconnected() {
        let (a, b) = UnixStream::pair().unwrap();
        drop(a);
        let mut right = StreamEndpoint::new(b, NodeId::new(2), "right").unwrap();
        assert!(right.recv().unwrap().is_none());
        assert!(matches!(right.recv(), Err(TransportError::Disconnected)));
    }
}
