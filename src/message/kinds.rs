//! Kernel-reserved message type codes and their typed payloads.
//!
//! §3 reserves `msg_type >= 0xFF00_0000` for kernel-defined messages. §9's
//! Design Notes call for giving those reserved codes "an explicit sum type"
//! (`SystemMessage`) while user messages keep carrying an opaque byte slice
//! the core never interprets. Each variant here owns its wire encoding so the
//! router and the actors receiving these messages never hand-parse payloads.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::registry::NsStatus;
use crate::util::{ActorId, TimerId};

/// First type code reserved for kernel-defined messages (§3, §6).
pub const FIRST_RESERVED_TYPE: u32 = 0xFF00_0000;

/// `MSG_TIMER`: a timer owned by the receiving actor has fired (§4.6, §4.9).
pub const MSG_TIMER: u32 = FIRST_RESERVED_TYPE;
/// `MSG_FD_EVENT`: a watched file descriptor became ready (§4.7).
pub const MSG_FD_EVENT: u32 = FIRST_RESERVED_TYPE + 1;
/// `MSG_CHILD_EXIT`: a supervised child actor terminated (§3 Supervision, §4.9).
pub const MSG_CHILD_EXIT: u32 = FIRST_RESERVED_TYPE + 2;
/// `MSG_TRANSPORT_READY`: a transport's fd became readable (§4.7).
pub const MSG_TRANSPORT_READY: u32 = FIRST_RESERVED_TYPE + 3;
/// `MSG_STOP`: a synthetic terminate message, interpreted by the runtime
/// itself rather than the behavior (§4.9: "`stop(id)` enqueues a synthetic
/// terminate message interpreted by the runtime ... as 'after the next
/// dispatch this actor is torn down'").
pub const MSG_STOP: u32 = FIRST_RESERVED_TYPE + 4;
/// Name-service request/reply family (§4.5, §6): `NS_REGISTER`.
pub const NS_REGISTER: u32 = FIRST_RESERVED_TYPE + 0x10;
/// `NS_LOOKUP`.
pub const NS_LOOKUP: u32 = FIRST_RESERVED_TYPE + 0x11;
/// `NS_LIST`.
pub const NS_LIST: u32 = FIRST_RESERVED_TYPE + 0x12;
/// `NS_MOUNT`.
pub const NS_MOUNT: u32 = FIRST_RESERVED_TYPE + 0x13;
/// `NS_UMOUNT`.
pub const NS_UMOUNT: u32 = FIRST_RESERVED_TYPE + 0x14;
/// `NS_REPLY`.
pub const NS_REPLY: u32 = FIRST_RESERVED_TYPE + 0x15;
/// `NS_NOTIFY`.
pub const NS_NOTIFY: u32 = FIRST_RESERVED_TYPE + 0x16;

/// Reason an actor exited, carried in a [`SystemMessage::ChildExit`] (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The actor's behavior returned `continue = false`.
    Normal,
    /// The actor was torn down by an explicit `stop`.
    Killed,
}

/// Typed view over a kernel-reserved message, decoded from a raw
/// [`crate::message::Message`]. This is the "ad hoc tagged union" the
/// Design Notes ask to keep out of user-facing code: a plain sum type
/// instead of hand-rolled byte offsets at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemMessage {
    /// A timer fired for the receiving actor (§4.6).
    Timer {
        /// The timer that fired.
        timer_id: TimerId,
    },
    /// A watched file descriptor became ready (§4.7).
    FdEvent {
        /// The ready descriptor.
        fd: i32,
        /// Readiness bitmask (same encoding as [`crate::reactor::Interest`]).
        events: u8,
    },
    /// A supervised child terminated (§3, §4.9).
    ChildExit {
        /// The child that exited.
        child: ActorId,
        /// Why it exited.
        reason: ExitReason,
    },
    /// A transport's fd became readable; the router should drain it (§4.7).
    TransportReady {
        /// The transport's fd.
        fd: i32,
    },
    /// Name-service request/reply traffic (§4.5).
    Ns(NsMessage),
}

/// Name-service request/reply payloads (§4.5, §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NsMessage {
    /// Register `path` to `actor`.
    Register {
        /// Path being bound.
        path: String,
        /// Owning actor.
        actor: ActorId,
    },
    /// Look up `path`.
    Lookup {
        /// Path being queried.
        path: String,
    },
    /// List entries whose path starts with `prefix`.
    List {
        /// Prefix filter.
        prefix: String,
    },
    /// Mount `prefix` to `target`.
    Mount {
        /// Prefix being mounted.
        prefix: String,
        /// Remote/owning node or actor responsible for the subtree.
        target: ActorId,
    },
    /// Remove a mount at `prefix`.
    Umount {
        /// Prefix being unmounted.
        prefix: String,
    },
    /// A reply to one of the above requests.
    Reply {
        /// Result status.
        status: NsStatus,
        /// The resolved actor id, if applicable.
        actor: Option<ActorId>,
        /// Bounded result buffer (≤ 1 KiB per §6), e.g. a `list` body.
        data: Vec<u8>,
    },
    /// Unsolicited registry change notification.
    Notify {
        /// The path that changed.
        path: String,
    },
}

impl SystemMessage {
    /// The reserved wire type code for this variant's family.
    pub fn type_code(&self) -> u32 {
        match self {
            SystemMessage::Timer { .. } => MSG_TIMER,
            SystemMessage::FdEvent { .. } => MSG_FD_EVENT,
            SystemMessage::ChildExit { .. } => MSG_CHILD_EXIT,
            SystemMessage::TransportReady { .. } => MSG_TRANSPORT_READY,
            SystemMessage::Ns(NsMessage::Register { .. }) => NS_REGISTER,
            SystemMessage::Ns(NsMessage::Lookup { .. }) => NS_LOOKUP,
            SystemMessage::Ns(NsMessage::List { .. }) => NS_LIST,
            SystemMessage::Ns(NsMessage::Mount { .. }) => NS_MOUNT,
            SystemMessage::Ns(NsMessage::Umount { .. }) => NS_UMOUNT,
            SystemMessage::Ns(NsMessage::Reply { .. }) => NS_REPLY,
            SystemMessage::Ns(NsMessage::Notify { .. }) => NS_NOTIFY,
        }
    }

    /// Encode this variant's payload for the in-process message bus (§9:
    /// "Hide wire layout behind a single serializer/deserializer"). This is
    /// distinct from the cross-node wire frame (§6); it only has to survive
    /// a [`crate::mailbox::Mailbox`] round trip within one node.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            SystemMessage::Timer { timer_id } => timer_id.raw().to_be_bytes().to_vec(),
            SystemMessage::FdEvent { fd, events } => {
                let mut buf = Vec::with_capacity(5);
                buf.extend_from_slice(&fd.to_be_bytes());
                buf.push(*events);
                buf
            }
            SystemMessage::ChildExit { child, reason } => {
                let mut buf = Vec::with_capacity(9);
                buf.extend_from_slice(&child.packed().to_be_bytes());
                buf.push(match reason {
                    ExitReason::Normal => 0,
                    ExitReason::Killed => 1,
                });
                buf
            }
            SystemMessage::TransportReady { fd } => fd.to_be_bytes().to_vec(),
            SystemMessage::Ns(ns) => ns.encode(),
        }
    }

    /// Decode a [`crate::message::Message`]'s `(msg_type, payload)` back into
    /// a [`SystemMessage`], or `None` if `msg_type` is not kernel-reserved or
    /// the payload is malformed.
    pub fn decode(msg_type: u32, payload: &[u8]) -> Option<SystemMessage> {
        match msg_type {
            MSG_TIMER => {
                let raw = u64::from_be_bytes(payload.try_into().ok()?);
                Some(SystemMessage::Timer {
                    timer_id: TimerId::from_raw(raw),
                })
            }
            MSG_FD_EVENT => {
                let fd = i32::from_be_bytes(payload.get(0..4)?.try_into().ok()?);
                let events = *payload.get(4)?;
                Some(SystemMessage::FdEvent { fd, events })
            }
            MSG_CHILD_EXIT => {
                let packed = u64::from_be_bytes(payload.get(0..8)?.try_into().ok()?);
                let reason = match payload.get(8)? {
                    0 => ExitReason::Normal,
                    _ => ExitReason::Killed,
                };
                Some(SystemMessage::ChildExit {
                    child: ActorId::from_packed(packed),
                    reason,
                })
            }
            MSG_TRANSPORT_READY => {
                let fd = i32::from_be_bytes(payload.try_into().ok()?);
                Some(SystemMessage::TransportReady { fd })
            }
            NS_REGISTER | NS_LOOKUP | NS_LIST | NS_MOUNT | NS_UMOUNT | NS_REPLY | NS_NOTIFY => {
                NsMessage::decode(msg_type, payload).map(SystemMessage::Ns)
            }
            _ => None,
        }
    }
}

impl NsMessage {
    /// Encode this request/reply to an opaque payload (§4.5, §6).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            NsMessage::Register { path, actor } => {
                let mut buf = actor.packed().to_be_bytes().to_vec();
                buf.extend_from_slice(path.as_bytes());
                buf
            }
            NsMessage::Lookup { path } => path.as_bytes().to_vec(),
            NsMessage::List { prefix } => prefix.as_bytes().to_vec(),
            NsMessage::Mount { prefix, target } => {
                let mut buf = target.packed().to_be_bytes().to_vec();
                buf.extend_from_slice(prefix.as_bytes());
                buf
            }
            NsMessage::Umount { prefix } => prefix.as_bytes().to_vec(),
            NsMessage::Reply { status, actor, data } => {
                let mut buf = Vec::with_capacity(1 + 8 + data.len());
                buf.push(status.as_u8());
                buf.extend_from_slice(&actor.unwrap_or(ActorId::INVALID).packed().to_be_bytes());
                buf.extend_from_slice(data);
                buf
            }
            NsMessage::Notify { path } => path.as_bytes().to_vec(),
        }
    }

    fn decode(msg_type: u32, payload: &[u8]) -> Option<NsMessage> {
        match msg_type {
            NS_REGISTER => {
                let packed = u64::from_be_bytes(payload.get(0..8)?.try_into().ok()?);
                let path = std::str::from_utf8(payload.get(8..)?).ok()?.to_string();
                Some(NsMessage::Register {
                    path,
                    actor: ActorId::from_packed(packed),
                })
            }
            NS_LOOKUP => Some(NsMessage::Lookup {
                path: std::str::from_utf8(payload).ok()?.to_string(),
            }),
            NS_LIST => Some(NsMessage::List {
                prefix: std::str::from_utf8(payload).ok()?.to_string(),
            }),
            NS_MOUNT => {
                let packed = u64::from_be_bytes(payload.get(0..8)?.try_into().ok()?);
                let prefix = std::str::from_utf8(payload.get(8..)?).ok()?.to_string();
                Some(NsMessage::Mount {
                    prefix,
                    target: ActorId::from_packed(packed),
                })
            }
            NS_UMOUNT => Some(NsMessage::Umount {
                prefix: std::str::from_utf8(payload).ok()?.to_string(),
            }),
            NS_REPLY => {
                let status = crate::registry::NsStatus::from_u8(*payload.first()?)?;
                let packed = u64::from_be_bytes(payload.get(1..9)?.try_into().ok()?);
                let actor = ActorId::from_packed(packed);
                let data = payload.get(9..)?.to_vec();
                Some(NsMessage::Reply {
                    status,
                    actor: actor.is_valid().then_some(actor),
                    data,
                })
            }
            NS_NOTIFY => Some(NsMessage::Notify {
                path: std::str::from_utf8(payload).ok()?.to_string(),
            }),
            _ => None,
        }
    }
}
