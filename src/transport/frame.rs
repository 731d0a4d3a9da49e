//! Wire framing for cross-node traffic: the stream frame header, the
//! handshake header, and a framer that accumulates partial stream reads into
//! whole frames (§4.8, §6).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::TransportError;
use crate::util::{ActorId, NodeId};

/// Magic number opening every stream message frame (§6).
pub const FRAME_MAGIC: u32 = 0x4D4B_0100;
/// Magic number opening the one-time handshake frame (§6).
pub const HANDSHAKE_MAGIC: u32 = 0x4D4B_3031;
/// Fixed length of a frame header, before the payload.
pub const FRAME_HEADER_LEN: usize = 32;
/// Length of the null-terminated, zero-padded identity field.
pub const IDENTITY_LEN: usize = 32;
/// Total length of a handshake frame (`magic` + `node_id` + `identity`).
pub const HANDSHAKE_LEN: usize = 4 + 4 + IDENTITY_LEN;

/// A fully decoded wire frame (§6): the cross-node counterpart of
/// [`crate::message::Message`], carrying the sender's node id alongside the
/// same `(dest, source, msg_type, payload)` tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The node that sent this frame.
    pub source_node: NodeId,
    /// The local destination actor.
    pub dest: ActorId,
    /// The sending actor, as seen by the sender's node.
    pub source: ActorId,
    /// The message's reserved or user type code.
    pub msg_type: u32,
    /// The message body.
    pub payload: Vec<u8>,
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

fn u64_at(buf: &[u8], offset: usize) -> u64 {
    u64::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
        buf[offset + 4],
        buf[offset + 5],
        buf[offset + 6],
        buf[offset + 7],
    ])
}

/// Encode `frame` as a complete wire frame per §6's layout.
pub fn encode_frame(frame: &Frame) -> Vec<u8> {
    let mut buf = Vec::with_capacity(FRAME_HEADER_LEN + frame.payload.len());
    buf.extend_from_slice(&FRAME_MAGIC.to_be_bytes());
    buf.extend_from_slice(&frame.source_node.raw().to_be_bytes());
    buf.extend_from_slice(&frame.dest.packed().to_be_bytes());
    buf.extend_from_slice(&frame.source.packed().to_be_bytes());
    buf.extend_from_slice(&frame.msg_type.to_be_bytes());
    buf.extend_from_slice(&(frame.payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(&frame.payload);
    buf
}

/// Decode exactly one frame from the front of `buf`. Returns `Ok(None)` if
/// `buf` does not yet hold a complete frame (the stream framer's signal to
/// keep accumulating); `Err` only for a validated structural problem (bad
/// magic), never for "not enough bytes yet".
pub fn decode_frame(buf: &[u8]) -> Result<Option<(Frame, usize)>, TransportError> {
    if buf.len() < FRAME_HEADER_LEN {
        return Ok(None);
    }
    let magic = u32_at(buf, 0);
    if magic != FRAME_MAGIC {
        return Err(TransportError::Framing {
            reason: format!("bad frame magic {magic:#x}"),
        });
    }
    let source_node = NodeId::new(u32_at(buf, 4));
    let dest = ActorId::from_packed(u64_at(buf, 8));
    let source = ActorId::from_packed(u64_at(buf, 16));
    let msg_type = u32_at(buf, 24);
    let payload_len = u32_at(buf, 28) as usize;

    let total_len = FRAME_HEADER_LEN + payload_len;
    if buf.len() < total_len {
        return Ok(None);
    }

    let payload = buf[FRAME_HEADER_LEN..total_len].to_vec();
    Ok(Some((
        Frame {
            source_node,
            dest,
            source,
            msg_type,
            payload,
        },
        total_len,
    )))
}

/// Accumulates bytes read off a stream transport and yields whole frames as
/// they become available, tolerating arbitrary fragmentation (§4.8:
/// "stream transports tolerate fragmentation").
#[derive(Debug, Default)]
pub struct StreamFramer {
    buf: Vec<u8>,
}

impl StreamFramer {
    /// A framer with nothing buffered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly read bytes.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Take the next complete frame out of the buffer, if one has fully
    /// arrived. Leaves any trailing partial frame buffered for the next call.
    pub fn try_take_frame(&mut self) -> Result<Option<Frame>, TransportError> {
        match decode_frame(&self.buf)? {
            Some((frame, consumed)) => {
                self.buf.drain(0..consumed);
                Ok(Some(frame))
            }
            None => Ok(None),
        }
    }
}

/// The one-time stream handshake payload (§4.8, §6): each side writes its own
/// node id and identity string before any message frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    /// The sender's node id.
    pub node_id: NodeId,
    /// Null-terminated, zero-padded identity string.
    pub identity: [u8; IDENTITY_LEN],
}

impl Handshake {
    /// Build a handshake frame, truncating `identity` to fit the fixed field.
    pub fn new(node_id: NodeId, identity: &str) -> Self {
        let mut field = [0u8; IDENTITY_LEN];
        let bytes = identity.as_bytes();
        let len = bytes.len().min(IDENTITY_LEN - 1);
        field[..len].copy_from_slice(&bytes[..len]);
        Self {
            node_id,
            identity: field,
        }
    }

    /// Encode to the exact on-wire byte layout.
    pub fn encode(&self) -> [u8; HANDSHAKE_LEN] {
        let mut buf = [0u8; HANDSHAKE_LEN];
        buf[0..4].copy_from_slice(&HANDSHAKE_MAGIC.to_be_bytes());
        buf[4..8].copy_from_slice(&self.node_id.raw().to_be_bytes());
        buf[8..HANDSHAKE_LEN].copy_from_slice(&self.identity);
        buf
    }

    /// Validate and decode a handshake frame. Fails with
    /// [`TransportError::Handshake`] on a magic mismatch (§4.8: "mismatched
    /// magic terminates the connection").
    pub fn decode(buf: &[u8; HANDSHAKE_LEN]) -> Result<Self, TransportError> {
        let magic = u32_at(buf, 0);
        if magic != HANDSHAKE_MAGIC {
            return Err(TransportError::Handshake {
                reason: format!("bad handshake magic {magic:#x}"),
            });
        }
        let node_id = NodeId::new(u32_at(buf, 4));
        let mut identity = [0u8; IDENTITY_LEN];
        identity.copy_from_slice(&buf[8..HANDSHAKE_LEN]);
        Ok(Self { node_id, identity })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn sample_frame() -> Frame {
        Frame {
            source_node: NodeId::new(1),
            dest: ActorId::new(NodeId::new(2), 7),
            source: ActorId::new(NodeId::new(1), 3),
            msg_type: 42,
            payload: vec![1, 2, 3, 4, 5],
        }
    }

    #[test]
    fn frame_round_trips_through_encode_decode() {
        let frame = sample_frame();
        let bytes = encode_frame(&frame);
        let (decoded, consumed) = decode_frame(&bytes).unwrap().unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn decode_frame_reports_incomplete_header() {
        assert!(decode_frame(&[0u8; 10]).unwrap().is_none());
    }

    #[test]
    fn decode_frame_reports_incomplete_payload() {
        let bytes = encode_frame(&sample_frame());
        assert!(decode_frame(&bytes[..bytes.len() - 1]).unwrap().is_none());
    }

    #[test]
    fn decode_frame_rejects_bad_magic() {
        let mut bytes = encode_frame(&sample_frame());
        bytes[0] = 0xFF;
        assert!(decode_frame(&bytes).is_err());
    }

    #[test]
    fn framer_yields_frame_split_across_multiple_feeds() {
        let bytes = encode_frame(&sample_frame());
        let mut framer = StreamFramer::new();
        framer.feed(&bytes[..10]);
        assert!(framer.try_take_frame().unwrap().is_none());
        framer.feed(&bytes[10..]);
        assert_eq!(framer.try_take_frame().unwrap().unwrap(), sample_frame());
    }

    #[test]
    fn framer_yields_two_back_to_back_frames() {
        let mut bytes = encode_frame(&sample_frame());
        bytes.extend(encode_frame(&sample_frame()));
        let mut framer = StreamFramer::new();
        framer.feed(&bytes);
        assert!(framer.try_take_frame().unwrap().is_some());
        assert!(framer.try_take_frame().unwrap().is_some());
        assert!(framer.try_take_frame().unwrap().is_none());
    }

    #[test]
    fn handshake_round_trips() {
        let handshake = Handshake::new(NodeId::new(3), "node-three");
        let bytes = handshake.encode();
        let decoded = Handshake::decode(&bytes).unwrap();
        assert_eq!(decoded, handshake);
    }

    #[test]
    fn handshake_decode_rejects_bad_magic() {
        let mut bytes = Handshake::new(NodeId::new(1), "x").encode();
        bytes[0] = 0;
        assert!(Handshake::decode(&bytes).is_err());
    }

    #[test]
    fn handshake_identity_is_truncated_and_zero_padded() {
        let long_name = "a".repeat(100);
        let handshake = Handshake::new(NodeId::new(1), &long_name);
        assert_eq!(handshake.identity.len(), IDENTITY_LEN);
        assert_eq!(handshake.identity[IDENTITY_LEN - 1], 0);
    }
}
