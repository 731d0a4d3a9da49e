//! Monotonic-time-ordered one-shot and periodic timers (§3, §4.6).

// Layer 1: Standard library imports
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

// Layer 3: Internal module imports
use super::error::TimerError;
use crate::util::{ActorId, TimerId};

struct HeapEntry {
    fire_at: Instant,
    seq: u64,
    id: TimerId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (a max-heap) pops the earliest fire-time
        // first, with lower `seq` (earlier scheduled) breaking ties (§4.6).
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct Live {
    owner: ActorId,
    period: Option<Duration>,
    canceled: bool,
}

/// Owns every live timer and fires due ones into `MSG_TIMER` deliveries (§4.6).
///
/// Fire-time is computed against [`Instant`] (monotonic). Periodic timers
/// reschedule relative to their own previous fire-time rather than
/// `Instant::now()`, so scheduling jitter never accumulates into drift (§4.6,
/// §8 property 7). Cancellation is lazy: a canceled timer's heap entry is
/// simply dropped, unfired, the next time it is reached (§4.6).
///
/// # Examples
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use microkernel_rt::timer::TimerWheel;
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let owner = ActorId::new(NodeId::new(1), 1);
/// let mut wheel = TimerWheel::new();
/// wheel.set_timer(owner, Duration::from_millis(0), false);
/// let fired = wheel.advance(Instant::now());
/// assert_eq!(fired.len(), 1);
/// assert_eq!(fired[0].0, owner);
/// ```
#[derive(Default)]
pub struct TimerWheel {
    heap: BinaryHeap<HeapEntry>,
    live: HashMap<TimerId, Live>,
    next_id: u64,
    next_seq: u64,
}

impl TimerWheel {
    /// An empty timer wheel.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    /// Schedule a timer for `owner`, firing `delay` from now; if `periodic`,
    /// it reschedules itself after each fire (§4.6). Timer ids are never
    /// reused while a timer is live (§4.6); this wheel never reuses an id at
    /// all, trivially satisfying that guarantee.
    pub fn set_timer(&mut self, owner: ActorId, delay: Duration, periodic: bool) -> TimerId {
        self.next_id += 1;
        let id = TimerId::from_raw(self.next_id);
        let period = periodic.then_some(delay);
        self.live.insert(
            id,
            Live {
                owner,
                period,
                canceled: false,
            },
        );
        self.push(id, Instant::now() + delay);
        id
    }

    fn push(&mut self, id: TimerId, fire_at: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeapEntry { fire_at, seq, id });
    }

    /// Mark `id` canceled. Fails with [`TimerError::Unknown`] only if `id`
    /// was never issued by this wheel; canceling an already-fired or
    /// already-canceled id is a harmless no-op (§4.6).
    pub fn cancel_timer(&mut self, id: TimerId) -> Result<(), TimerError> {
        match self.live.get_mut(&id) {
            Some(live) => {
                live.canceled = true;
                Ok(())
            }
            None => Err(TimerError::Unknown(id.raw())),
        }
    }

    /// Pop and fire every timer whose fire-time is `<= now`, rescheduling
    /// periodic ones. Returns `(owner, timer_id)` pairs for the runtime to
    /// turn into `MSG_TIMER` deliveries (§4.6, §4.9 step 2).
    pub fn advance(&mut self, now: Instant) -> Vec<(ActorId, TimerId)> {
        let mut fired = Vec::new();
        while let Some(entry) = self.heap.pop() {
            if entry.fire_at > now {
                self.heap.push(entry);
                break;
            }
            let Some(live) = self.live.get(&entry.id) else {
                continue;
            };
            if live.canceled {
                self.live.remove(&entry.id);
                continue;
            }
            let owner = live.owner;
            let period = live.period;
            fired.push((owner, entry.id));
            match period {
                Some(period) => self.push(entry.id, entry.fire_at + period),
                None => {
                    self.live.remove(&entry.id);
                }
            }
        }
        fired
    }

    /// Time until the next pending fire-time, or `None` if no timers are
    /// scheduled. Used to bound the reactor's poll timeout (§4.9 step 3).
    pub fn next_delta(&self, now: Instant) -> Option<Duration> {
        self.heap.peek().map(|entry| entry.fire_at.saturating_duration_since(now))
    }

    /// Number of timers this wheel is still tracking (live or merely
    /// pending removal after cancellation).
    pub fn len(&self) -> usize {
        self.live.len()
    }
}
