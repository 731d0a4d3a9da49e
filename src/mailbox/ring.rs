//! The bounded ring-buffer mailbox (§3, §4.2).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::MailboxError;
use crate::message::Message;

/// Per-actor bounded FIFO of owned [`Message`]s.
///
/// Capacity is rounded up to a power of two with a minimum of two (§3).
/// `enqueue` and `dequeue` never block: a full mailbox refuses the enqueue
/// and an empty one returns nothing on dequeue. Producer and consumer
/// cursors are monotonically increasing counts, not buffer-relative
/// indices, so `count = head - tail` is always correct under wraparound
/// (§4.2). Dropping a non-empty mailbox frees every remaining message.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::mailbox::Mailbox;
/// use microkernel_rt::message::Message;
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let mut mailbox = Mailbox::new(2);
/// let source = ActorId::new(NodeId::new(1), 1);
/// let dest = ActorId::new(NodeId::new(1), 2);
///
/// assert!(mailbox.enqueue(Message::new(source, dest, 1, b"a").unwrap()).is_ok());
/// assert!(mailbox.enqueue(Message::new(source, dest, 1, b"b").unwrap()).is_ok());
/// assert!(mailbox.enqueue(Message::new(source, dest, 1, b"c").unwrap()).is_err());
///
/// let first = mailbox.dequeue().unwrap();
/// assert_eq!(first.payload(), b"a");
/// ```
#[derive(Debug)]
pub struct Mailbox {
    slots: Vec<Option<Message>>,
    mask: usize,
    head: usize,
    tail: usize,
}

impl Mailbox {
    /// Create a mailbox with at least `requested_cap` capacity, rounded up
    /// to the next power of two (minimum two) (§3).
    pub fn new(requested_cap: usize) -> Self {
        let capacity = requested_cap.max(2).next_power_of_two();
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            mask: capacity - 1,
            head: 0,
            tail: 0,
        }
    }

    /// The mailbox's actual (power-of-two) capacity.
    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Number of messages currently queued.
    pub fn count(&self) -> usize {
        self.head.wrapping_sub(self.tail)
    }

    /// Whether the mailbox holds no messages.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Append `msg` to the tail of the queue. Fails without enqueuing if
    /// the mailbox is at capacity (§4.2: "hard refusal; the caller decides
    /// policy").
    pub fn enqueue(&mut self, msg: Message) -> Result<(), MailboxError> {
        if self.count() == self.capacity() {
            return Err(MailboxError::Full {
                capacity: self.capacity(),
            });
        }
        let idx = self.head & self.mask;
        self.slots[idx] = Some(msg);
        self.head = self.head.wrapping_add(1);
        Ok(())
    }

    /// Remove and return the oldest message, or `None` if empty.
    pub fn dequeue(&mut self) -> Option<Message> {
        if self.is_empty() {
            return None;
        }
        let idx = self.tail & self.mask;
        let msg = self.slots[idx].take();
        self.tail = self.tail.wrapping_add(1);
        msg
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::util::{ActorId, NodeId};

    fn msg(tag: u32) -> Message {
        let a = ActorId::new(NodeId::new(1), 1);
        let b = ActorId::new(NodeId::new(1), 2);
        Message::new(a, b, tag, &[]).unwrap()
    }

    #[test]
    fn capacity_rounds_up_to_power_of_two_with_minimum_two() {
        assert_eq!(Mailbox::new(0).capacity(), 2);
        assert_eq!(Mailbox::new(1).capacity(), 2);
        assert_eq!(Mailbox::new(3).capacity(), 4);
        assert_eq!(Mailbox::new(8).capacity(), 8);
    }

    #[test]
    fn fifo_order_is_preserved() {
        let mut mailbox = Mailbox::new(4);
        for i in 0..4 {
            mailbox.enqueue(msg(i)).unwrap();
        }
        for i in 0..4 {
            assert_eq!(mailbox.dequeue().unwrap().msg_type(), i);
        }
    }

    #[test]
    fn s6_mailbox_full_scenario() {
        // §8 S6: capacity-2 mailbox, two enqueues succeed, third fails,
        // then one dequeue frees a slot for a fourth.
        let mut mailbox = Mailbox::new(2);
        assert!(mailbox.enqueue(msg(1)).is_ok());
        assert!(mailbox.enqueue(msg(2)).is_ok());
        assert!(mailbox.enqueue(msg(3)).is_err());
        assert!(mailbox.dequeue().is_some());
        assert!(mailbox.enqueue(msg(4)).is_ok());
    }

    #[test]
    fn dequeue_on_empty_returns_none() {
        let mut mailbox = Mailbox::new(2);
        assert!(mailbox.dequeue().is_none());
    }

    #[test]
    fn count_survives_cursor_wraparound() {
        let mut mailbox = Mailbox::new(2);
        for i in 0..100 {
            mailbox.enqueue(msg(i)).unwrap();
            assert_eq!(mailbox.count(), 1);
            mailbox.dequeue().unwrap();
            assert_eq!(mailbox.count(), 0);
        }
    }

    #[test]
    fn dropping_a_non_empty_mailbox_frees_remaining_messages() {
        let mut mailbox = Mailbox::new(4);
        mailbox.enqueue(msg(1)).unwrap();
        mailbox.enqueue(msg(2)).unwrap();
        drop(mailbox);
    }
}
