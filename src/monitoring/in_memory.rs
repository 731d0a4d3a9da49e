//! In-memory monitor: plain counters and a bounded ring buffer.

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::Utc;

use super::error::MonitoringError;
use super::traits::{EventSeverity, Monitor, MonitoringEvent};
use super::types::{MonitoringConfig, MonitoringSnapshot};

/// Keeps severity counters and a bounded history of recent events.
///
/// A single-threaded kernel has exactly one caller at a time, so a plain
/// `RefCell` around a `VecDeque` and a handful of counters is enough: no
/// atomics, no lock, no `Arc`.
///
/// # Examples
///
/// ```
/// use microkernel_rt::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, RuntimeEvent, RuntimeEventKind};
/// use microkernel_rt::util::{ActorId, NodeId};
///
/// let monitor = InMemoryMonitor::<RuntimeEvent>::new(MonitoringConfig::default());
/// let event = RuntimeEvent::new(RuntimeEventKind::ActorSpawned {
///     actor: ActorId::new(NodeId::new(1), 1),
/// });
/// monitor.record(event).unwrap();
/// assert_eq!(monitor.snapshot().unwrap().total_events, 1);
/// ```
#[derive(Debug)]
pub struct InMemoryMonitor<E: MonitoringEvent> {
    config: MonitoringConfig,
    inner: RefCell<Inner<E>>,
}

#[derive(Debug)]
struct Inner<E> {
    total_events: u64,
    trace_count: u64,
    debug_count: u64,
    info_count: u64,
    warning_count: u64,
    error_count: u64,
    critical_count: u64,
    history: VecDeque<E>,
}

impl<E> Default for Inner<E> {
    fn default() -> Self {
        Self {
            total_events: 0,
            trace_count: 0,
            debug_count: 0,
            info_count: 0,
            warning_count: 0,
            error_count: 0,
            critical_count: 0,
            history: VecDeque::new(),
        }
    }
}

impl<E: MonitoringEvent> InMemoryMonitor<E> {
    /// Creates a new in-memory monitor with the given configuration.
    pub fn new(config: MonitoringConfig) -> Self {
        Self {
            config,
            inner: RefCell::new(Inner::default()),
        }
    }

    fn increment_severity_counter(inner: &mut Inner<E>, severity: EventSeverity) {
        match severity {
            EventSeverity::Trace => inner.trace_count += 1,
            EventSeverity::Debug => inner.debug_count += 1,
            EventSeverity::Info => inner.info_count += 1,
            EventSeverity::Warning => inner.warning_count += 1,
            EventSeverity::Error => inner.error_count += 1,
            EventSeverity::Critical => inner.critical_count += 1,
        }
    }
}

impl<E: MonitoringEvent> Monitor<E> for InMemoryMonitor<E> {
    fn record(&self, event: E) -> Result<(), MonitoringError> {
        if !self.config.enabled {
            return Ok(());
        }
        let severity = event.severity();
        if severity < self.config.severity_filter {
            return Ok(());
        }

        let mut inner = self.inner.borrow_mut();
        inner.total_events += 1;
        Self::increment_severity_counter(&mut inner, severity);

        if inner.history.len() >= self.config.max_history_size {
            inner.history.pop_front();
        }
        inner.history.push_back(event);
        Ok(())
    }

    fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        let inner = self.inner.borrow();
        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: inner.total_events,
            trace_count: inner.trace_count,
            debug_count: inner.debug_count,
            info_count: inner.info_count,
            warning_count: inner.warning_count,
            error_count: inner.error_count,
            critical_count: inner.critical_count,
            recent_events: inner.history.iter().cloned().collect(),
        })
    }

    fn reset(&self) -> Result<(), MonitoringError> {
        *self.inner.borrow_mut() = Inner::default();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::monitoring::{RuntimeEvent, RuntimeEventKind};
    use crate::util::{ActorId, NodeId};

    fn event(kind: RuntimeEventKind) -> RuntimeEvent {
        RuntimeEvent::new(kind)
    }

    #[test]
    fn records_and_reports_total() {
        let monitor = InMemoryMonitor::new(MonitoringConfig::default());
        for _ in 0..10 {
            monitor
                .record(event(RuntimeEventKind::TransportConnected { fd: 3, peer: None }))
                .unwrap();
        }
        let snapshot = monitor.snapshot().unwrap();
        assert_eq!(snapshot.total_events, 10);
        assert_eq!(snapshot.info_count, 10);
    }

    #[test]
    fn severity_filter_drops_events_below_threshold() {
        let config = MonitoringConfig {
            severity_filter: EventSeverity::Warning,
            ..MonitoringConfig::default()
        };
        let monitor = InMemoryMonitor::new(config);

        monitor
            .record(event(RuntimeEventKind::ActorSpawned {
                actor: ActorId::new(NodeId::new(1), 1),
            }))
            .unwrap();
        monitor
            .record(event(RuntimeEventKind::HandshakeFailed {
                fd: 4,
                reason: "bad magic".to_string(),
            }))
            .unwrap();

        let snapshot = monitor.snapshot().unwrap();
        assert_eq!(snapshot.total_events, 1);
        assert_eq!(snapshot.error_count, 1);
        assert_eq!(snapshot.debug_count, 0);
    }

    #[test]
    fn history_is_bounded_by_max_history_size() {
        let config = MonitoringConfig {
            max_history_size: 3,
            ..MonitoringConfig::default()
        };
        let monitor = InMemoryMonitor::new(config);
        for i in 0..10 {
            monitor
                .record(event(RuntimeEventKind::TransportConnected {
                    fd: i,
                    peer: None,
                }))
                .unwrap();
        }
        let snapshot = monitor.snapshot().unwrap();
        assert_eq!(snapshot.total_events, 10);
        assert_eq!(snapshot.recent_events.len(), 3);
    }

    #[test]
    fn disabled_monitor_records_nothing() {
        let config = MonitoringConfig {
            enabled: false,
            ..MonitoringConfig::default()
        };
        let monitor = InMemoryMonitor::new(config);
        monitor
            .record(event(RuntimeEventKind::TransportConnected { fd: 1, peer: None }))
            .unwrap();
        assert_eq!(monitor.snapshot().unwrap().total_events, 0);
    }

    #[test]
    fn reset_clears_counters_and_history() {
        let monitor = InMemoryMonitor::new(MonitoringConfig::default());
        monitor
            .record(event(RuntimeEventKind::TransportConnected { fd: 1, peer: None }))
            .unwrap();
        monitor.reset().unwrap();
        let snapshot = monitor.snapshot().unwrap();
        assert_eq!(snapshot.total_events, 0);
        assert!(snapshot.recent_events.is_empty());
    }
}
