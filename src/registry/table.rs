//! The registry's core map: path bindings plus subtree mounts (§3, §4.5).

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::RegistryError;
use super::types::{Mount, Resolution};
use crate::util::ActorId;

/// Maximum encoded length of a registry path, in bytes (§3).
pub const MAX_PATH_LEN: usize = 128;

/// Hierarchical path → actor-id map with reverse lookup and subtree mounts.
///
/// Paths beginning with `/` form a hierarchical tree (e.g. `/node/hardware/gpio`);
/// paths without a leading `/` are flat short names sharing the same map (§3).
/// A single [`Registry`] only ever holds bindings for its own node; cross-node
/// propagation is out of scope (§9 Open Questions), and `mount`/`unmount` only
/// redirect *lookups* to a remote-owning actor id.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::registry::Registry;
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let mut registry = Registry::new(64);
/// let gpio = ActorId::new(NodeId::new(1), 7);
/// registry.register("/node/hardware/gpio", gpio).unwrap();
/// assert_eq!(registry.lookup("/node/hardware/gpio").unwrap().actor(), gpio);
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    bindings: BTreeMap<String, ActorId>,
    mounts: Vec<Mount>,
    capacity: usize,
}

impl Registry {
    /// Create an empty registry that refuses new bindings past `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            bindings: BTreeMap::new(),
            mounts: Vec::new(),
            capacity,
        }
    }

    fn validate_path(path: &str) -> Result<(), RegistryError> {
        if path.is_empty() || path.len() > MAX_PATH_LEN {
            return Err(RegistryError::InvalidPath {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    /// Bind `path` to `id`. Idempotent if `path` is already bound to `id`;
    /// fails with [`RegistryError::AlreadyExists`] if bound to a different
    /// actor, or [`RegistryError::Full`] if at capacity (§4.5).
    pub fn register(&mut self, path: &str, id: ActorId) -> Result<(), RegistryError> {
        Self::validate_path(path)?;
        if let Some(existing) = self.bindings.get(path) {
            return if *existing == id {
                Ok(())
            } else {
                Err(RegistryError::AlreadyExists {
                    path: path.to_string(),
                })
            };
        }
        if self.bindings.len() >= self.capacity {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }
        self.bindings.insert(path.to_string(), id);
        Ok(())
    }

    /// Resolve `path`: a direct local binding wins; otherwise the longest
    /// matching mount prefix; otherwise [`RegistryError::NotFound`] (§4.5).
    pub fn lookup(&self, path: &str) -> Result<Resolution, RegistryError> {
        Self::validate_path(path)?;
        if let Some(id) = self.bindings.get(path) {
            return Ok(Resolution::Local(*id));
        }
        let best = self
            .mounts
            .iter()
            .filter(|m| path.starts_with(m.prefix()))
            .max_by_key(|m| m.prefix().len());
        match best {
            Some(mount) => Ok(Resolution::Mounted {
                target: mount.target(),
                remainder: path[mount.prefix().len()..].to_string(),
            }),
            None => Err(RegistryError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Remove every path bound to `id`. Returns the number of paths removed (§4.5).
    pub fn deregister_paths(&mut self, id: ActorId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, bound| *bound != id);
        before - self.bindings.len()
    }

    /// The first path (lexicographic order) bound to `id`, if any (§4.5).
    pub fn reverse_lookup(&self, id: ActorId) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == id)
            .map(|(path, _)| path.as_str())
    }

    /// Every path bound to `id`, comma-joined in lexicographic order (§4.5).
    pub fn reverse_lookup_all(&self, id: ActorId) -> String {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == id)
            .map(|(path, _)| path.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Newline-separated `path=id` pairs whose path starts with `prefix` (§4.5).
    ///
    /// Entries reachable only through a mount are not enumerated here: a
    /// listing that tried to reach across the transport boundary would block
    /// the step loop, so cross-mount listing is left to the mount owner's
    /// own registry (§9 Open Questions).
    pub fn list(&self, prefix: &str) -> String {
        self.bindings
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .map(|(path, id)| format!("{path}={id}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Mount `prefix` to `target`. Idempotent if already mounted to the same
    /// target; fails with [`RegistryError::AlreadyExists`] otherwise (§4.5).
    pub fn mount(&mut self, prefix: &str, target: ActorId) -> Result<(), RegistryError> {
        Self::validate_path(prefix)?;
        if let Some(existing) = self.mounts.iter().find(|m| m.prefix() == prefix) {
            return if existing.target() == target {
                Ok(())
            } else {
                Err(RegistryError::AlreadyExists {
                    path: prefix.to_string(),
                })
            };
        }
        self.mounts.push(Mount {
            prefix: prefix.to_string(),
            target,
        });
        Ok(())
    }

    /// Remove the mount at `prefix`; fails with [`RegistryError::NotFound`]
    /// if no such mount exists (§4.5).
    pub fn unmount(&mut self, prefix: &str) -> Result<(), RegistryError> {
        let before = self.mounts.len();
        self.mounts.retain(|m| m.prefix() != prefix);
        if self.mounts.len() == before {
            return Err(RegistryError::NotFound {
                path: prefix.to_string(),
            });
        }
        Ok(())
    }

    /// Number of direct path bindings currently held.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::util::NodeId;

    fn id(seq: u32) -> ActorId {
        ActorId::new(NodeId::new(1), seq)
    }

    #[test]
    fn register_then_lookup_round_trips() {
        let mut registry = Registry::new(8);
        registry.register("/node/hardware/gpio", id(1)).unwrap();
        assert_eq!(registry.lookup("/node/hardware/gpio").unwrap().actor(), id(1));
    }

    #[test]
    fn re_register_same_id_is_idempotent() {
        let mut registry = Registry::new(8);
        registry.register("/sys/clock", id(1)).unwrap();
        assert!(registry.register("/sys/clock", id(1)).is_ok());
    }

    #[test]
    fn re_register_different_id_fails_eexist() {
        let mut registry = Registry::new(8);
        registry.register("/sys/clock", id(1)).unwrap();
        let err = registry.register("/sys/clock", id(2)).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists { .. }));
    }

    #[test]
    fn deregister_removes_all_paths_for_id() {
        let mut registry = Registry::new(8);
        registry.register("/a", id(1)).unwrap();
        registry.register("/b", id(1)).unwrap();
        registry.register("/c", id(2)).unwrap();
        assert_eq!(registry.deregister_paths(id(1)), 2);
        assert!(registry.lookup("/a").is_err());
        assert!(registry.lookup("/c").is_ok());
    }

    #[test]
    fn lookup_missing_path_is_not_found() {
        let registry = Registry::new(8);
        assert!(matches!(
            registry.lookup("/nope").unwrap_err(),
            RegistryError::NotFound { .. }
        ));
    }

    #[test]
    fn mount_forwards_lookups_beneath_prefix() {
        let mut registry = Registry::new(8);
        registry.mount("/node/remote", id(9)).unwrap();
        let resolution = registry.lookup("/node/remote/fan").unwrap();
        match resolution {
            Resolution::Mounted { target, remainder } => {
                assert_eq!(target, id(9));
                assert_eq!(remainder, "/fan");
            }
            Resolution::Local(_) => panic!("expected a mounted resolution"),
        }
    }

    #[test]
    fn local_binding_shadows_a_covering_mount() {
        let mut registry = Registry::new(8);
        registry.mount("/node/remote", id(9)).unwrap();
        registry.register("/node/remote/fan", id(2)).unwrap();
        assert_eq!(registry.lookup("/node/remote/fan").unwrap().actor(), id(2));
    }

    #[test]
    fn unmount_reverses_mount() {
        let mut registry = Registry::new(8);
        registry.mount("/node/remote", id(9)).unwrap();
        registry.unmount("/node/remote").unwrap();
        assert!(registry.lookup("/node/remote/fan").is_err());
    }

    #[test]
    fn registry_refuses_past_capacity() {
        let mut registry = Registry::new(1);
        registry.register("/a", id(1)).unwrap();
        let err = registry.register("/b", id(2)).unwrap_err();
        assert!(matches!(err, RegistryError::Full { .. }));
    }

    #[test]
    fn empty_path_is_invalid() {
        let mut registry = Registry::new(8);
        assert!(matches!(
            registry.register("", id(1)).unwrap_err(),
            RegistryError::InvalidPath { .. }
        ));
    }

    #[test]
    fn overlong_path_is_invalid() {
        let mut registry = Registry::new(8);
        let long_path = "/".to_string() + &"a".repeat(MAX_PATH_LEN);
        assert!(matches!(
            registry.register(&long_path, id(1)).unwrap_err(),
            RegistryError::InvalidPath { .. }
        ));
    }

    #[test]
    fn list_reports_matching_prefix() {
        let mut registry = Registry::new(8);
        registry.register("/node/hardware/gpio", id(1)).unwrap();
        registry.register("/node/hardware/pwm", id(2)).unwrap();
        registry.register("/sys/clock", id(3)).unwrap();
        let listing = registry.list("/node/hardware");
        assert!(listing.contains("/node/hardware/gpio="));
        assert!(listing.contains("/node/hardware/pwm="));
        assert!(!listing.contains("/sys/clock"));
    }

    #[test]
    fn reverse_lookup_all_is_comma_joined() {
        let mut registry = Registry::new(8);
        registry.register("/a", id(1)).unwrap();
        registry.register("/b", id(1)).unwrap();
        assert_eq!(registry.reverse_lookup_all(id(1)), "/a,/b");
    }
}
