//! Actor lifecycle errors.

use thiserror::Error;

/// Errors returned while creating or addressing an actor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// `spawn` was called while the runtime's actor table is at `max_actors` (§7 Full).
    #[error("actor table is full (max {max_actors} actors)")]
    TableFull {
        /// The runtime's configured actor table limit.
        max_actors: usize,
    },
    /// An operation referenced an actor id with no live actor behind it.
    #[error("actor {0} is not alive")]
    NotFound(crate::util::ActorId),
}
