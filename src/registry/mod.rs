//! Hierarchical name registry: path → [`crate::util::ActorId`] bindings,
//! subtree mounts, and the `NS_*` message protocol (§3, §4.5, §6).
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `table.rs` - [`Registry`], the path/mount map and its direct API
//! - `types.rs` - [`NsStatus`], [`Resolution`], [`Mount`]
//! - `error.rs` - [`RegistryError`]
//!
//! The registry is reachable two ways, per §4.5: directly (the fast path,
//! called from within an actor's behavior) or via `NS_*` messages (for
//! non-actor callers and remote mount forwarding); both paths read and
//! write the same [`Registry`].

pub mod error;
pub mod table;
pub mod types;

pub use error::RegistryError;
pub use table::{Registry, MAX_PATH_LEN};
pub use types::{Mount, NsStatus, Resolution};
