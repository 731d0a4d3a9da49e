//! Small value types shared by the registry's API and wire protocol.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::ActorId;

/// Status codes carried in `NS_REPLY` messages (§4.5, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NsStatus {
    /// The operation succeeded.
    Ok,
    /// No binding (and no covering mount) exists for the path.
    ENoent,
    /// The path is already bound to a different actor.
    EExist,
    /// The registry has reached its configured capacity.
    EFull,
    /// The path is malformed (empty or over 128 bytes).
    EInval,
}

impl NsStatus {
    /// The wire byte for an `NS_REPLY` payload (§6).
    pub fn as_u8(self) -> u8 {
        match self {
            NsStatus::Ok => 0,
            NsStatus::ENoent => 1,
            NsStatus::EExist => 2,
            NsStatus::EFull => 3,
            NsStatus::EInval => 4,
        }
    }

    /// Recover a status from its wire byte, or `None` if unrecognized.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(NsStatus::Ok),
            1 => Some(NsStatus::ENoent),
            2 => Some(NsStatus::EExist),
            3 => Some(NsStatus::EFull),
            4 => Some(NsStatus::EInval),
            _ => None,
        }
    }
}

/// The result of resolving a path against the registry's bindings and mounts
/// (§4.5: "bindings under a mounted prefix still shadow the mount").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `path` is bound directly to this actor on the local node.
    Local(ActorId),
    /// `path` falls beneath a mounted prefix with no closer local binding;
    /// the lookup should be forwarded to `target`'s node.
    Mounted {
        /// The actor responsible for the mounted subtree.
        target: ActorId,
        /// The path with the matched prefix stripped, as seen by `target`.
        remainder: String,
    },
}

impl Resolution {
    /// The actor a caller should route to, whether the binding is local or mounted.
    pub fn actor(&self) -> ActorId {
        match self {
            Resolution::Local(id) => *id,
            Resolution::Mounted { target, .. } => *target,
        }
    }
}

/// A subtree mount: paths beneath `prefix` with no closer local binding
/// forward to `target` (§4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub(super) prefix: String,
    pub(super) target: ActorId,
}

impl Mount {
    /// The mounted prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The actor responsible for the mounted subtree.
    pub fn target(&self) -> ActorId {
        self.target
    }
}
