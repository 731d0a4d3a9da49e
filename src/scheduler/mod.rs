//! Intrusive FIFO ready queue over the runtime's actor table (§3, §4.4).
//!
//! The queue stores no nodes of its own: it links actors together through
//! the `next` field each [`crate::actor::Actor`] already carries, and is
//! itself just `head`/`tail`/`count` ids into the table (§9: "store ids,
//! not raw back-pointers"). This keeps the scheduler a single-owner
//! structure with no secondary index and no lock, as §4.3 requires.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 3: Internal module imports
use crate::actor::{Actor, Status};
use crate::util::ActorId;

/// Strict-FIFO, no-preemption, no-duplicates ready queue (§4.4).
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use microkernel_rt::actor::{Actor, Status};
/// use microkernel_rt::message::Message;
/// use microkernel_rt::runtime::Context;
/// use microkernel_rt::scheduler::Scheduler;
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// struct Noop;
/// impl microkernel_rt::actor::Behavior for Noop {
///     fn handle(&mut self, _ctx: &mut Context<'_>, _msg: &Message) -> bool { true }
/// }
///
/// let id = ActorId::new(NodeId::new(1), 1);
/// let mut table = HashMap::new();
/// table.insert(id, Actor::new(id, Box::new(Noop), ActorId::INVALID, 4));
///
/// let mut scheduler = Scheduler::new();
/// scheduler.enqueue(id, &mut table);
/// assert_eq!(table[&id].status(), Status::Ready);
/// assert_eq!(scheduler.dequeue(&mut table), Some(id));
/// ```
#[derive(Debug, Default)]
pub struct Scheduler {
    head: Option<ActorId>,
    tail: Option<ActorId>,
    count: usize,
}

impl Scheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            count: 0,
        }
    }

    /// Number of actors currently on the ready queue.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the ready queue is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append `id` to the ready queue. A no-op if `id` is already ready,
    /// per the scheduler's duplicate guard (§4.4, §8 property 4). Otherwise
    /// marks the actor [`Status::Ready`] and links it after the current tail.
    pub fn enqueue(&mut self, id: ActorId, table: &mut HashMap<ActorId, Actor>) {
        let Some(actor) = table.get_mut(&id) else {
            return;
        };
        if actor.status() == Status::Ready {
            return;
        }
        actor.set_status(Status::Ready);
        actor.set_next(None);

        match self.tail {
            Some(tail_id) => {
                if let Some(tail_actor) = table.get_mut(&tail_id) {
                    tail_actor.set_next(Some(id));
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.count += 1;
    }

    /// Pop the head of the ready queue, or `None` if empty.
    pub fn dequeue(&mut self, table: &mut HashMap<ActorId, Actor>) -> Option<ActorId> {
        let id = self.head?;
        let next = table.get(&id).and_then(Actor::next);
        self.head = next;
        if next.is_none() {
            self.tail = None;
        }
        self.count -= 1;
        if let Some(actor) = table.get_mut(&id) {
            actor.set_next(None);
        }
        Some(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::actor::Behavior;
    use crate::message::Message;
    use crate::runtime::Context;
    use crate::util::NodeId;

    struct Noop;
    impl Behavior for Noop {
        fn handle(&mut self, _ctx: &mut Context<'_>, _msg: &Message) -> bool {
            true
        }
    }

    fn table_with(ids: &[ActorId]) -> HashMap<ActorId, Actor> {
        ids.iter()
            .map(|&id| (id, Actor::new(id, Box::new(Noop), ActorId::INVALID, 4)))
            .collect()
    }

    #[test]
    fn fifo_dequeue_order() {
        let a = ActorId::new(NodeId::new(1), 1);
        let b = ActorId::new(NodeId::new(1), 2);
        let c = ActorId::new(NodeId::new(1), 3);
        let mut table = table_with(&[a, b, c]);
        let mut scheduler = Scheduler::new();
        scheduler.enqueue(a, &mut table);
        scheduler.enqueue(b, &mut table);
        scheduler.enqueue(c, &mut table);

        assert_eq!(scheduler.dequeue(&mut table), Some(a));
        assert_eq!(scheduler.dequeue(&mut table), Some(b));
        assert_eq!(scheduler.dequeue(&mut table), Some(c));
        assert_eq!(scheduler.dequeue(&mut table), None);
    }

    #[test]
    fn enqueue_is_a_no_op_for_an_already_ready_actor() {
        let a = ActorId::new(NodeId::new(1), 1);
        let mut table = table_with(&[a]);
        let mut scheduler = Scheduler::new();
        scheduler.enqueue(a, &mut table);
        scheduler.enqueue(a, &mut table);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn dequeue_on_empty_queue_is_none() {
        let mut table = HashMap::new();
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.dequeue(&mut table), None);
    }

    #[test]
    fn count_tracks_enqueue_and_dequeue() {
        let a = ActorId::new(NodeId::new(1), 1);
        let b = ActorId::new(NodeId::new(1), 2);
        let mut table = table_with(&[a, b]);
        let mut scheduler = Scheduler::new();
        scheduler.enqueue(a, &mut table);
        scheduler.enqueue(b, &mut table);
        assert_eq!(scheduler.len(), 2);
        scheduler.dequeue(&mut table);
        assert_eq!(scheduler.len(), 1);
    }
}
