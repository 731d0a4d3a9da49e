//! Object-safe bridge from the generic [`Monitor`] trait to a concrete,
//! non-generic handle the runtime can hold without becoming generic itself.

use super::traits::Monitor;
use super::types::RuntimeEvent;

/// A monitor that has committed to observing [`RuntimeEvent`]s specifically.
///
/// [`Monitor<E>`] is generic so it can watch any event type, but
/// [`crate::runtime::Runtime`] and [`crate::runtime::Context`] are not
/// generic over a monitor implementation, they are concrete types so the
/// [`crate::actor::Behavior`] trait they appear in can stay object-safe.
/// `EventSink` is the seam: any `Monitor<RuntimeEvent>` gets one for free,
/// and the runtime stores `Box<dyn EventSink>`.
pub trait EventSink {
    /// Record one event, discarding any error the underlying monitor reports.
    fn record(&self, event: RuntimeEvent);
}

impl<M: Monitor<RuntimeEvent>> EventSink for M {
    fn record(&self, event: RuntimeEvent) {
        let _ = Monitor::record(self, event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::monitoring::{MonitoringConfig, RuntimeEventKind};
    use crate::monitoring::{InMemoryMonitor, NoopMonitor};
    use crate::util::{ActorId, NodeId};

    #[test]
    fn noop_monitor_is_an_event_sink() {
        let sink: Box<dyn EventSink> = Box::new(NoopMonitor::<RuntimeEvent>::new());
        sink.record(RuntimeEvent::new(RuntimeEventKind::ActorSpawned {
            actor: ActorId::new(NodeId::new(1), 1),
        }));
    }

    #[test]
    fn in_memory_monitor_is_an_event_sink_and_still_records() {
        let monitor = InMemoryMonitor::<RuntimeEvent>::new(MonitoringConfig::default());
        {
            let sink: &dyn EventSink = &monitor;
            sink.record(RuntimeEvent::new(RuntimeEventKind::ActorSpawned {
                actor: ActorId::new(NodeId::new(1), 1),
            }));
        }
        assert_eq!(Monitor::snapshot(&monitor).unwrap().total_events, 1);
    }
}
