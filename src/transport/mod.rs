//! Framed byte-stream transports carrying serialized messages between nodes
//! (§3, §4.8, §6).
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `traits.rs` - [`Transport`], the uniform per-instance contract
//! - `frame.rs` - [`Frame`], [`Handshake`], [`StreamFramer`], wire encode/decode
//! - `stream.rs` - [`stream::StreamEndpoint`], shared handshake/framing state for stream sockets
//! - `unix.rs` - [`UnixTransport`] (listen/connect/from-accepted-fd)
//! - `tcp.rs` - [`TcpTransport`] (listen/connect/from-accepted-fd)
//! - `udp.rs` - [`UdpTransport`] (bind/connect)
//! - `error.rs` - [`TransportError`]

pub mod error;
pub mod frame;
pub mod stream;
pub mod tcp;
pub mod traits;
pub mod udp;
pub mod unix;

pub use error::TransportError;
pub use frame::{decode_frame, encode_frame, Frame, Handshake, StreamFramer};
pub use tcp::TcpTransport;
pub use traits::Transport;
pub use udp::UdpTransport;
pub use unix::UnixTransport;
