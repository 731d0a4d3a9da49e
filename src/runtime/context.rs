//! The per-dispatch handle a [`crate::actor::Behavior`] uses to act on the
//! runtime (§4.9, §6 Runtime API).

// Layer 1: Standard library
use std::time::Duration;

// Layer 3: Internal
use super::core::Runtime;
use super::error::RuntimeError;
use crate::actor::{Actor, Behavior};
use crate::reactor::Interest;
use crate::registry::{RegistryError, Resolution};
use crate::timer::TimerError;
use crate::util::{ActorId, NodeId, TimerId};

/// Borrowed for the duration of exactly one `Behavior::handle` call (§4.9
/// step 1: "invoke behavior"). `current` is the actor being dispatched,
/// removed from [`Runtime::actors`] for that one call so `runtime` can be
/// borrowed mutably at the same time without aliasing it (§9: the
/// remove-then-reinsert pattern). A message the behavior sends to itself is
/// therefore routed straight into `current`'s own mailbox rather than through
/// the table (see [`Context::send`]).
pub struct Context<'a> {
    pub(super) runtime: &'a mut Runtime,
    pub(super) current: &'a mut Actor,
    pub(super) actor_id: ActorId,
}

impl Context<'_> {
    /// This actor's id.
    pub fn self_id(&self) -> ActorId {
        self.actor_id
    }

    /// The node this runtime is running on.
    pub fn node_id(&self) -> NodeId {
        self.runtime.node_id()
    }

    /// Send a message to `dest` (§4.9 routing algorithm). Returns `false` on
    /// any failure (missing actor, full mailbox, no matching transport, or
    /// payload allocation failure), mirroring [`Runtime::send`]'s contract.
    pub fn send(&mut self, dest: ActorId, msg_type: u32, payload: &[u8]) -> bool {
        if dest == self.actor_id {
            return crate::message::Message::new(self.actor_id, dest, msg_type, payload)
                .map(|msg| self.current.mailbox_mut().enqueue(msg).is_ok())
                .unwrap_or(false);
        }
        self.runtime.send_from(self.actor_id, dest, msg_type, payload)
    }

    /// Spawn a new actor supervised by this one (§4.9 `spawn`).
    pub fn spawn(&mut self, behavior: Box<dyn Behavior>, mailbox_cap: usize) -> Result<ActorId, RuntimeError> {
        self.runtime.spawn_internal(behavior, self.actor_id, mailbox_cap)
    }

    /// Request that `id` be torn down after its next dispatch (§4.9 `stop`).
    pub fn stop(&mut self, id: ActorId) {
        self.runtime.stop(id);
    }

    /// Arm a one-shot or periodic timer owned by this actor (§4.6, §4.9 `set_timer`).
    pub fn set_timer(&mut self, delay: Duration, periodic: bool) -> TimerId {
        self.runtime.timers.set_timer(self.actor_id, delay, periodic)
    }

    /// Cancel a previously armed timer (§4.9 `cancel_timer`).
    pub fn cancel_timer(&mut self, id: TimerId) -> Result<(), TimerError> {
        self.runtime.timers.cancel_timer(id)
    }

    /// Watch `fd` for readiness/writability on this actor's behalf (§4.7, §4.9 `watch_fd`).
    pub fn watch_fd(&mut self, fd: i32, interest: Interest) {
        self.runtime.reactor.watch(fd, self.actor_id, interest);
    }

    /// Stop watching `fd` (§4.7).
    pub fn unwatch_fd(&mut self, fd: i32) {
        self.runtime.reactor.unwatch(fd);
    }

    /// Bind `path` to this actor in the name registry (§4.5).
    pub fn register(&mut self, path: &str) -> Result<(), RegistryError> {
        let id = self.actor_id;
        self.runtime.registry.register(path, id)
    }

    /// Resolve `path` through the name registry (§4.5).
    pub fn lookup(&self, path: &str) -> Result<Resolution, RegistryError> {
        self.runtime.registry.lookup(path)
    }
}
