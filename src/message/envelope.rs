//! The owned message envelope (§3, §4.1).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2-style timestamp, kept for monitoring/log correlation
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::error::MessageError;
use super::kinds::FIRST_RESERVED_TYPE;
use crate::util::ActorId;

/// A typed envelope carrying an opaque payload between two actors (§4.1).
///
/// Payload bytes are always deep-copied on creation so the sender's buffer
/// can be reused immediately afterward, there is no borrowed or shared
/// payload variant. A zero-length `bytes` argument to [`Message::new`] is
/// normalized to an empty payload rather than treated as an error; creation
/// only fails on allocation exhaustion (surfaced to the caller as a send
/// failure via [`MessageError`]).
///
/// Messages are single-consumer: once enqueued into a [`crate::mailbox::Mailbox`]
/// only that mailbox's owning actor ever dequeues it.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::message::Message;
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let source = ActorId::new(NodeId::new(1), 1);
/// let dest = ActorId::new(NodeId::new(1), 2);
/// let msg = Message::new(source, dest, 1, b"ping").expect("allocation succeeds");
///
/// assert_eq!(msg.source(), source);
/// assert_eq!(msg.dest(), dest);
/// assert_eq!(msg.msg_type(), 1);
/// assert_eq!(msg.payload(), b"ping");
/// assert!(!msg.is_kernel_reserved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    source: ActorId,
    dest: ActorId,
    msg_type: u32,
    payload: Vec<u8>,
    #[serde(with = "crate::util::serde_time")]
    created_at: DateTime<Utc>,
}

impl Message {
    /// Build a new message, deep-copying `bytes` into an owned payload.
    ///
    /// A zero-length slice is never an error; it is recorded as an empty
    /// payload (§4.1: "creation never succeeds with a non-null bytes pointer
    /// and zero length treated as a payload; it treats such calls as empty").
    pub fn new(source: ActorId, dest: ActorId, msg_type: u32, bytes: &[u8]) -> Result<Self, MessageError> {
        let mut payload = Vec::new();
        if !bytes.is_empty() {
            payload
                .try_reserve_exact(bytes.len())
                .map_err(|_| MessageError::AllocationFailed {
                    requested_len: bytes.len(),
                })?;
            payload.extend_from_slice(bytes);
        }
        Ok(Self {
            source,
            dest,
            msg_type,
            payload,
            created_at: Utc::now(),
        })
    }

    /// Construct from an already-owned payload buffer without copying again,
    /// used by the transport deserializer (§4.8) which has already allocated
    /// and filled a `Vec<u8>` off the wire.
    pub fn from_owned(source: ActorId, dest: ActorId, msg_type: u32, payload: Vec<u8>) -> Self {
        Self {
            source,
            dest,
            msg_type,
            payload,
            created_at: Utc::now(),
        }
    }

    /// The sending actor.
    pub fn source(&self) -> ActorId {
        self.source
    }

    /// The destination actor.
    pub fn dest(&self) -> ActorId {
        self.dest
    }

    /// The opaque 32-bit type code. Values `>= 0xFF00_0000` are reserved for
    /// kernel-defined messages (§3).
    pub fn msg_type(&self) -> u32 {
        self.msg_type
    }

    /// Borrow the payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the envelope, returning the owned payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Whether [`Self::msg_type`] falls in the kernel-reserved range.
    pub fn is_kernel_reserved(&self) -> bool {
        self.msg_type >= FIRST_RESERVED_TYPE
    }

    /// When this envelope was constructed (informational; not part of the
    /// wire frame, used only for monitoring event correlation).
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::util::NodeId;

    fn addr(seq: u32) -> ActorId {
        ActorId::new(NodeId::new(1), seq)
    }

    #[test]
    fn new_copies_payload() {
        let mut bytes = vec![1u8, 2, 3];
        let msg = Message::new(addr(1), addr(2), 10, &bytes).unwrap();
        bytes[0] = 99;
        assert_eq!(msg.payload(), &[1, 2, 3]);
    }

    #[test]
    fn zero_length_is_empty_not_error() {
        let msg = Message::new(addr(1), addr(2), 10, &[]).unwrap();
        assert!(msg.payload().is_empty());
    }

    #[test]
    fn kernel_reserved_range() {
        let user = Message::new(addr(1), addr(2), 0x0000_0001, &[]).unwrap();
        let kernel = Message::new(addr(1), addr(2), 0xFF00_0000, &[]).unwrap();
        assert!(!user.is_kernel_reserved());
        assert!(kernel.is_kernel_reserved());
    }

    #[test]
    fn into_payload_returns_owned_bytes() {
        let msg = Message::new(addr(1), addr(2), 1, b"hi").unwrap();
        assert_eq!(msg.into_payload(), b"hi".to_vec());
    }
}
