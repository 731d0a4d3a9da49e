//! Core monitoring traits for universal event observation.

use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::error::MonitoringError;
use super::types::MonitoringSnapshot;

/// Event severity levels for filtering and categorization.
///
/// Ordered from lowest to highest severity for filtering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventSeverity {
    /// Trace-level events for detailed debugging.
    Trace,
    /// Debug-level events for development.
    Debug,
    /// Informational events for normal operation.
    Info,
    /// Warning events for potential issues.
    Warning,
    /// Error events for failures.
    Error,
    /// Critical events for system-level failures.
    Critical,
}

/// Trait for events that can be monitored.
///
/// Every event type recorded through a [`Monitor`] implements this trait so
/// the monitor can filter by severity and stamp a snapshot timestamp without
/// knowing anything else about the event's shape.
pub trait MonitoringEvent: Clone + Debug {
    /// Static event type identifier for categorization.
    const EVENT_TYPE: &'static str;

    /// The time this event occurred.
    fn timestamp(&self) -> DateTime<Utc>;

    /// The event's severity.
    fn severity(&self) -> EventSeverity;
}

/// Observes events produced by the runtime without participating in its
/// control flow.
///
/// Recording happens synchronously and inline with the step loop that
/// produced the event: there is no executor to hand a future to, so a
/// blocking, `&self`-based interface is the honest one for a single-threaded
/// kernel.
pub trait Monitor<E: MonitoringEvent> {
    /// Records an event. Implementations may filter by severity or drop
    /// the event entirely (see [`super::NoopMonitor`]).
    fn record(&self, event: E) -> Result<(), MonitoringError>;

    /// Produces a snapshot of counters and recent history.
    fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError>;

    /// Clears counters and history.
    fn reset(&self) -> Result<(), MonitoringError>;
}
