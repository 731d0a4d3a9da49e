//! No-operation monitor implementation with zero overhead.

use std::marker::PhantomData;

use chrono::Utc;

use super::error::MonitoringError;
use super::traits::{Monitor, MonitoringEvent};
use super::types::MonitoringSnapshot;

/// Discards every event with zero overhead.
///
/// The default monitor: appropriate for MCU targets where the history ring
/// buffer's allocation would matter and nothing ever reads a snapshot.
///
/// # Examples
///
/// ```
/// use microkernel_rt::monitoring::{Monitor, NoopMonitor, RuntimeEvent, RuntimeEventKind};
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let monitor = NoopMonitor::<RuntimeEvent>::new();
/// let event = RuntimeEvent::new(RuntimeEventKind::ActorSpawned {
///     actor: ActorId::new(NodeId::new(1), 1),
/// });
/// monitor.record(event).unwrap();
/// assert_eq!(monitor.snapshot().unwrap().total_events, 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor<E: MonitoringEvent> {
    _phantom: PhantomData<E>,
}

impl<E: MonitoringEvent> NoopMonitor<E> {
    /// Creates a new no-operation monitor.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<E: MonitoringEvent> Monitor<E> for NoopMonitor<E> {
    #[inline(always)]
    fn record(&self, _event: E) -> Result<(), MonitoringError> {
        Ok(())
    }

    #[inline(always)]
    fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: 0,
            trace_count: 0,
            debug_count: 0,
            info_count: 0,
            warning_count: 0,
            error_count: 0,
            critical_count: 0,
            recent_events: Vec::new(),
        })
    }

    #[inline(always)]
    fn reset(&self) -> Result<(), MonitoringError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::monitoring::{RuntimeEvent, RuntimeEventKind};
    use crate::util::{ActorId, NodeId};

    #[test]
    fn record_is_discarded() {
        let monitor = NoopMonitor::<RuntimeEvent>::new();
        let event = RuntimeEvent::new(RuntimeEventKind::ActorSpawned {
            actor: ActorId::new(NodeId::new(1), 1),
        });
        monitor.record(event).unwrap();
        let snapshot = monitor.snapshot().unwrap();
        assert_eq!(snapshot.total_events, 0);
        assert!(snapshot.recent_events.is_empty());
    }

    #[test]
    fn reset_always_succeeds() {
        let monitor = NoopMonitor::<RuntimeEvent>::new();
        monitor.reset().unwrap();
    }
}
