//! Core identifier newtypes: [`NodeId`], [`ActorId`], [`TimerId`].
//!
//! # Design
//!
//! Unlike a UUID-keyed identity scheme, every id in this kernel is a small
//! integer so it can be embedded directly in the wire frame (§6) and compared
//! with plain integer equality on an MCU with no allocator pressure. `seq == 0`
//! (and therefore `ActorId` with a zero low word) is the one reserved invalid
//! value threaded through the whole spec, see `ActorId::INVALID`.

// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// 32-bit node identity.
///
/// A node's id is either explicitly configured (`NODE_ID` env var, must lie
/// in `[1, 15]` per §6) or derived deterministically by hashing the node's
/// human-readable [`NodeIdentity`](super::identity::NodeIdentity) string.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::util::NodeId;
///
/// let a = NodeId::new(1);
/// let b = NodeId::new(2);
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Reserved value meaning "no node configured yet".
    pub const UNSPECIFIED: NodeId = NodeId(0);

    /// Wrap a raw node id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw 32-bit value.
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Whether this id has actually been assigned.
    pub const fn is_specified(&self) -> bool {
        self.0 != 0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Actor identity: the tuple `(node_id, local_seq)` packed into a 64-bit
/// value, high word `node_id`, low word `local_seq` (§3, §6).
///
/// `local_seq == 0` is the reserved invalid sequence; [`ActorId::INVALID`]
/// is the all-zero id. Sequence numbers are allocated monotonically per node
/// starting at 1 and are never reused while the actor with that id is alive.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let id = ActorId::new(NodeId::new(1), 7);
/// assert_eq!(id.node(), NodeId::new(1));
/// assert_eq!(id.seq(), 7);
/// assert!(id.is_valid());
///
/// assert!(!ActorId::INVALID.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// The reserved invalid actor id (`node_id == 0`, `local_seq == 0`).
    pub const INVALID: ActorId = ActorId(0);

    /// Build an id from its node and local-sequence parts.
    pub const fn new(node: NodeId, seq: u32) -> Self {
        Self(((node.raw() as u64) << 32) | seq as u64)
    }

    /// Reconstruct an id from its packed wire representation.
    pub const fn from_packed(packed: u64) -> Self {
        Self(packed)
    }

    /// The packed wire representation (high 32 = node, low 32 = seq).
    pub const fn packed(&self) -> u64 {
        self.0
    }

    /// The owning node.
    pub const fn node(&self) -> NodeId {
        NodeId::new((self.0 >> 32) as u32)
    }

    /// The local sequence number.
    pub const fn seq(&self) -> u32 {
        self.0 as u32
    }

    /// `false` for [`ActorId::INVALID`] (`local_seq == 0`), `true` otherwise.
    pub const fn is_valid(&self) -> bool {
        self.seq() != 0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node(), self.seq())
    }
}

/// Timer identity, monotonically allocated by the timer wheel (§4.6).
///
/// `0` is the reserved invalid id. Ids are never reused while their timer is
/// live; after cancellation or a non-periodic fire, reuse is permitted.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::util::TimerId;
///
/// assert!(!TimerId::INVALID.is_valid());
/// let t = TimerId::from_raw(1);
/// assert!(t.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    /// The reserved invalid timer id.
    pub const INVALID: TimerId = TimerId(0);

    /// Wrap a raw, already-allocated timer id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// `false` for [`TimerId::INVALID`].
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_packs_node_and_seq() {
        let id = ActorId::new(NodeId::new(3), 42);
        assert_eq!(id.node(), NodeId::new(3));
        assert_eq!(id.seq(), 42);
        assert!(id.is_valid());
    }

    #[test]
    fn actor_id_invalid_is_all_zero() {
        assert_eq!(ActorId::INVALID.packed(), 0);
        assert!(!ActorId::INVALID.is_valid());
        assert_eq!(ActorId::default(), ActorId::INVALID);
    }

    #[test]
    fn actor_id_invalid_even_with_nonzero_node() {
        // seq == 0 is reserved invalid regardless of which node it names.
        let id = ActorId::new(NodeId::new(5), 0);
        assert!(!id.is_valid());
    }

    #[test]
    fn actor_id_round_trips_through_packed() {
        let id = ActorId::new(NodeId::new(7), 99);
        let round_tripped = ActorId::from_packed(id.packed());
        assert_eq!(id, round_tripped);
    }

    #[test]
    fn node_id_unspecified_is_zero() {
        assert!(!NodeId::UNSPECIFIED.is_specified());
        assert!(NodeId::new(1).is_specified());
    }

    #[test]
    fn timer_id_invalid_is_zero() {
        assert!(!TimerId::INVALID.is_valid());
        assert!(TimerId::from_raw(1).is_valid());
    }

    #[test]
    fn display_impls_are_non_empty() {
        assert!(!format!("{}", NodeId::new(1)).is_empty());
        assert!(!format!("{}", ActorId::new(NodeId::new(1), 2)).is_empty());
        assert!(!format!("{}", TimerId::from_raw(1)).is_empty());
    }
}
