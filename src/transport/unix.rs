//! Unix domain socket transport variants (§4.8).

// Layer 1: Standard library imports
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::TransportError;
use super::frame::Frame;
use super::stream::StreamEndpoint;
use super::traits::Transport;
use crate::util::NodeId;

/// A Unix domain socket transport: either a listener waiting for its one
/// peer, or an already-connected (or already-accepted) stream.
pub enum UnixTransport {
    /// Bound and listening; accepts lazily on the first `send`/`recv`/`poll`
    /// (§4.8: "bind and listen eagerly but accept lazily").
    Listening {
        /// The bound listener.
        listener: UnixListener,
        /// Unlinked on drop (§4.8: "destroyed Unix listeners unlink the socket path").
        path: PathBuf,
        /// `Some` once a peer has been accepted; only the first is kept, a
        /// second incoming connection is accepted then immediately closed.
        accepted: Option<StreamEndpoint<UnixStream>>,
        local_node: NodeId,
        local_identity: String,
    },
    /// Connected, outbound or already-accepted.
    Connected(StreamEndpoint<UnixStream>),
}

impl UnixTransport {
    /// Bind and listen at `path`, accepting lazily.
    pub fn listen(
        path: impl AsRef<Path>,
        local_node: NodeId,
        local_identity: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let path = path.as_ref().to_path_buf();
        let listener = UnixListener::bind(&path)?;
        listener.set_nonblocking(true)?;
        Ok(Self::Listening {
            listener,
            path,
            accepted: None,
            local_node,
            local_identity: local_identity.into(),
        })
    }

    /// Connect to a listener at `path`.
    pub fn connect(
        path: impl AsRef<Path>,
        local_node: NodeId,
        local_identity: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let stream = UnixStream::connect(path)?;
        Ok(Self::Connected(StreamEndpoint::new(
            stream,
            local_node,
            local_identity,
        )?))
    }

    /// Adopt a socket this process already accepted elsewhere (§4.8: "a
    /// variant exists to adopt an already-accepted fd").
    pub fn from_accepted(
        stream: UnixStream,
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
            ..
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

impl Transport for UnixTransport {
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

impl Drop for UnixTransport {
    fn drop(&mut self) {
        if let Self::Listening { path, .. } = self {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn tmp_socket_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("microkernel-rt-test-{name}-{}.sock", std::process::id()))
    }

    #[test]
    fn connect_and_listen_round_trip_a_frame() {
        let path = tmp_socket_path("unix-roundtrip");
        let _ = std::fs::remove_file(&path);
        let mut listener = UnixTransport::listen(&path, NodeId::new(1), "server").unwrap();
        let mut client = UnixTransport::connect(&path, NodeId::new(2), "client").unwrap();

        let frame = Frame {
            source_node: NodeId::new(2),
            dest: crate::util::ActorId::new(NodeId::new(1), 1),
            source: crate::util::ActorId::new(NodeId::new(2), 1),
            msg_type: 5,
            payload: vec![1, 2, 3],
        };
        assert!(client.send(&frame).unwrap());

        // Give the listener a chance to accept and read; in real use this
        // happens across successive `step()` iterations.
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
    fn destroy_unlinks_the_socket_path() {
        let path = tmp_socket_path("unix-unlink");
        let _ = std::fs::remove_file(&path);
        {
            let _listener = UnixTransport::listen(&path, NodeId::new(1), "server").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }
}
