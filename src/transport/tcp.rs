//! TCP transport variants (§4.8).

// Layer 1: Standard library imports
use std::net::{TcpListener, TcpStream, ToSocketAddrs};
use std::os::fd::{AsRawFd, RawFd};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::TransportError;
use super::frame::Frame;
use super::stream::StreamEndpoint;
use super::traits::Transport;
use crate::util::NodeId;

/// A TCP transport: either a listener waiting for its one peer, or an
/// already-connected (or already-accepted) stream.
pub enum TcpTransport {
    /// Bound and listening; accepts lazily (§4.8).
    Listening {
        listener: TcpListener,
        accepted: Option<StreamEndpoint<TcpStream>>,
        local_node: NodeId,
        local_identity: String,
    },
    /// Connected, outbound or already-accepted.
    Connected(StreamEndpoint<TcpStream>),
}

impl TcpTransport {
    /// Bind and listen at `addr`.
    pub fn listen(
        addr: impl ToSocketAddrs,
        local_node: NodeId,
        local_identity: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self::Listening {
            listener,
            accepted: None,
            local_node,
            local_identity: local_identity.into(),
        })
    }

    /// Connect to a remote listener at `addr`.
    pub fn connect(
        addr: impl ToSocketAddrs,
        local_node: NodeId,
        local_identity: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)?;
        Ok(Self::Connected(StreamEndpoint::new(
            stream,
            local_node,
            local_identity,
        )?))
    }

    /// Adopt a socket this process already accepted elsewhere, e.g. from a
    /// listener owned outside this crate (§4.8: "a variant exists to adopt
    /// an already-accepted fd").
    pub fn from_accepted(
        stream: TcpStream,
        local_node: NodeId,
        local_identity: impl Into<String>,
    ) -> Result<Self, TransportError> {
        Ok(Self::Connected(StreamEndpoint::new(
            stream,
            local_node,
            local_identity,
        )?))
    }

    fn try_accept(&mut self) {
        if let Self::Listening {
            listener,
            accepted,
            local_node,
            local_identity,
        } = self
        {
            // Only the first accepted peer is served; any further incoming
            // connection is accepted and immediately dropped so it does not
            // sit forever in the OS backlog.
            loop {
                match listener.accept() {
                    Ok((stream, _addr)) => {
                        if accepted.is_some() {
                            drop(stream);
                            continue;
                        }
                        if let Ok(endpoint) =
                            StreamEndpoint::new(stream, *local_node, local_identity.clone())
                        {
                            *accepted = Some(endpoint);
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
                    Err(_) => break,
                }
            }
        }
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, frame: &Frame) -> Result<bool, TransportError> {
        self.try_accept();
        match self {
            Self::Listening { accepted: None, .. } => Ok(false),
            Self::Listening {
                accepted: Some(endpoint),
                ..
            } => endpoint.send(frame),
            Self::Connected(endpoint) => endpoint.send(frame),
        }
    }

    fn recv(&mut self) -> Result<Option<Frame>, TransportError> {
        self.try_accept();
        match self {
            Self::Listening { accepted: None, .. } => Ok(None),
            Self::Listening {
                accepted: Some(endpoint),
                ..
            } => endpoint.recv(),
            Self::Connected(endpoint) => endpoint.recv(),
        }
    }

    fn is_connected(&self) -> bool {
        match self {
            Self::Listening { accepted, .. } => {
                accepted.as_ref().is_some_and(StreamEndpoint::is_connected)
            }
            Self::Connected(endpoint) => endpoint.is_connected(),
        }
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.try_accept();
        match self {
            Self::Listening { accepted: None, .. } => Ok(()),
            Self::Listening {
                accepted: Some(endpoint),
                ..
            } => endpoint.flush(),
            Self::Connected(endpoint) => endpoint.flush(),
        }
    }

    fn peer_node(&self) -> Option<NodeId> {
        match self {
            Self::Listening { accepted, .. } => accepted.as_ref().and_then(StreamEndpoint::peer_node),
            Self::Connected(endpoint) => endpoint.peer_node(),
        }
    }

    fn fd(&self) -> RawFd {
        match self {
            Self::Listening {
                listener, accepted, ..
            } => accepted
                .as_ref()
                .map(StreamEndpoint::fd)
                .unwrap_or_else(|| listener.as_raw_fd()),
            Self::Connected(endpoint) => endpoint.fd(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn connect_and_listen_round_trip_a_frame() {
        let mut listener = TcpTransport::listen("127.0.0.1:0", NodeId::new(1), "server").unwrap();
        let addr = match &listener {
            TcpTransport::Listening { listener, .. } => listener.local_addr().unwrap(),
            TcpTransport::Connected(_) => unreachable!(),
        };
        let mut client = TcpTransport::connect(addr, NodeId::new(2), "client").unwrap();

        let frame = Frame {
            source_node: NodeId::new(2),
            dest: crate::util::ActorId::new(NodeId::new(1), 1),
            source: crate::util::ActorId::new(NodeId::new(2), 1),
            msg_type: 5,
            payload: vec![1, 2, 3],
        };
        assert!(client.send(&frame).unwrap());

        let mut received = None;
        for _ in 0..50 {
            if let Some(f) = listener.recv().unwrap() {
                received = Some(f);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(received, Some(frame));
    }

    #[test]
    fn second_connection_to_a_listener_is_not_the_accepted_peer() {
        let mut listener = TcpTransport::listen("127.0.0.1:0", NodeId::new(1), "server").unwrap();
        let addr = match &listener {
            TcpTransport::Listening { listener, .. } => listener.local_addr().unwrap(),
            TcpTransport::Connected(_) => unreachable!(),
        };
        let _first = TcpStream::connect(addr).unwrap();
        let mut second = TcpStream::connect(addr).unwrap();
        second.set_nonblocking(true).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        listener.recv().unwrap();
        // Only the first accepted connection is retained as `accepted`...
        assert!(matches!(
            listener,
            TcpTransport::Listening {
                accepted: Some(_),
                ..
            }
        ));
        // ...and the second was accepted-then-closed, not left pending.
        use std::io::Read;
        let mut buf = [0u8; 1];
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(second.read(&mut buf).unwrap(), 0);
    }
}
