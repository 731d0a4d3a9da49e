//! The actor struct: identity, lifecycle status, mailbox, and behavior (§3, §4.3).

// Layer 1: Standard library imports
use std::fmt;

// Layer 3: Internal module imports
use super::behavior::Behavior;
use crate::mailbox::Mailbox;
use crate::message::kinds::ExitReason;
use crate::message::Message;
use crate::runtime::Context;
use crate::util::ActorId;

/// Stand-in installed for the duration of [`Actor::take_behavior`] so the
/// field never needs to be an `Option` (and dispatch never needs to
/// `.expect()` it back out). It is never actually dispatched to: the runtime
/// always calls [`Actor::put_behavior`] before the actor can be scheduled
/// again.
struct TombstoneBehavior;

impl Behavior for TombstoneBehavior {
    fn handle(&mut self, _ctx: &mut Context<'_>, _msg: &Message) -> bool {
        true
    }
}

/// Lifecycle status of an [`Actor`] (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Spawned, mailbox empty, not on the scheduler's ready queue.
    Idle,
    /// Mailbox non-empty and on the scheduler's ready queue, awaiting dispatch.
    Ready,
    /// Currently executing its behavior (exactly one actor at a time, §5).
    Running,
    /// Terminated; the runtime is about to release its state and mailbox.
    Stopped,
}

/// An addressable unit of computation: identity, lifecycle status, a bounded
/// mailbox, and a behavior callback that owns its own state (§3, §4.3).
///
/// The runtime exclusively owns the `Actor` struct; the actor exclusively
/// owns its mailbox and behavior/state. The `next` field is the scheduler's
/// intrusive link (§4.4): an actor id, not a pointer, since [`crate::runtime::Runtime`]
/// holds every actor in a single table keyed by id (§9: "store ids, not raw
/// back-pointers").
pub struct Actor {
    id: ActorId,
    status: Status,
    mailbox: Mailbox,
    behavior: Box<dyn Behavior>,
    parent: ActorId,
    exit_reason: Option<ExitReason>,
    next: Option<ActorId>,
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("parent", &self.parent)
            .field("mailbox_count", &self.mailbox.count())
            .field("exit_reason", &self.exit_reason)
            .finish_non_exhaustive()
    }
}

impl Actor {
    /// Construct a new idle actor. `parent` may be [`ActorId::INVALID`] for
    /// an unlinked (top-level) actor (§3).
    pub fn new(id: ActorId, behavior: Box<dyn Behavior>, parent: ActorId, mailbox_cap: usize) -> Self {
        Self {
            id,
            status: Status::Idle,
            mailbox: Mailbox::new(mailbox_cap),
            behavior,
            parent,
            exit_reason: None,
            next: None,
        }
    }

    /// This actor's id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Current lifecycle status.
    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// The supervising parent, or [`ActorId::INVALID`] if unlinked (§3).
    pub fn parent(&self) -> ActorId {
        self.parent
    }

    /// Why this actor terminated, if it has (§3).
    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    pub(crate) fn set_exit_reason(&mut self, reason: ExitReason) {
        self.exit_reason = Some(reason);
    }

    /// Borrow this actor's mailbox.
    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub(crate) fn mailbox_mut(&mut self) -> &mut Mailbox {
        &mut self.mailbox
    }

    pub(crate) fn behavior_mut(&mut self) -> &mut dyn Behavior {
        self.behavior.as_mut()
    }

    /// Remove the behavior for the duration of a dispatch, so the runtime
    /// can hold both `&mut Context` (which needs `&mut Actor` for self-sends)
    /// and `behavior.handle(&mut ctx, ...)` without aliasing the same value.
    /// Leaves a [`TombstoneBehavior`] in its place; [`Self::put_behavior`]
    /// always restores the real one before the actor can be dispatched again.
    pub(crate) fn take_behavior(&mut self) -> Box<dyn Behavior> {
        std::mem::replace(&mut self.behavior, Box::new(TombstoneBehavior))
    }

    pub(crate) fn put_behavior(&mut self, behavior: Box<dyn Behavior>) {
        self.behavior = behavior;
    }

    pub(crate) fn next(&self) -> Option<ActorId> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<ActorId>) {
        self.next = next;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::util::NodeId;

    struct Noop;
    impl Behavior for Noop {
        fn handle(&mut self, _ctx: &mut Context<'_>, _msg: &Message) -> bool {
            true
        }
    }

    #[test]
    fn new_actor_starts_idle_and_unlinked() {
        let id = ActorId::new(NodeId::new(1), 1);
        let actor = Actor::new(id, Box::new(Noop), ActorId::INVALID, 4);
        assert_eq!(actor.status(), Status::Idle);
        assert_eq!(actor.parent(), ActorId::INVALID);
        assert!(actor.mailbox().is_empty());
        assert!(actor.exit_reason().is_none());
    }

    #[test]
    fn exit_reason_is_recorded_once_set() {
        let id = ActorId::new(NodeId::new(1), 1);
        let mut actor = Actor::new(id, Box::new(Noop), ActorId::INVALID, 4);
        actor.set_exit_reason(ExitReason::Normal);
        assert_eq!(actor.exit_reason(), Some(ExitReason::Normal));
    }
}
