//! The runtime's event vocabulary and monitor configuration/snapshot types.

use chrono::{DateTime, Utc};

use super::traits::{EventSeverity, MonitoringEvent};
use crate::message::ExitReason;
use crate::util::{ActorId, NodeId, TimerId};

/// Configuration for monitoring behavior.
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    /// Whether recording is enabled at all.
    pub enabled: bool,
    /// Maximum number of events kept in the ring-buffer history.
    pub max_history_size: usize,
    /// Minimum severity recorded; events below this are dropped.
    pub severity_filter: EventSeverity,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 256,
            severity_filter: EventSeverity::Info,
        }
    }
}

/// Snapshot of monitoring state at a point in time.
#[derive(Debug, Clone)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// When the snapshot was produced.
    pub timestamp: DateTime<Utc>,
    /// Total events recorded since the last reset.
    pub total_events: u64,
    /// Count of recorded trace-severity events.
    pub trace_count: u64,
    /// Count of recorded debug-severity events.
    pub debug_count: u64,
    /// Count of recorded info-severity events.
    pub info_count: u64,
    /// Count of recorded warning-severity events.
    pub warning_count: u64,
    /// Count of recorded error-severity events.
    pub error_count: u64,
    /// Count of recorded critical-severity events.
    pub critical_count: u64,
    /// The most recent events, bounded by `max_history_size`.
    pub recent_events: Vec<E>,
}

/// Every observable event the kernel produces (§4.3–§4.9).
#[derive(Debug, Clone)]
pub struct RuntimeEvent {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: RuntimeEventKind,
}

impl RuntimeEvent {
    /// Stamp `kind` with the current time.
    pub fn new(kind: RuntimeEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// The specific thing a [`RuntimeEvent`] reports.
#[derive(Debug, Clone)]
pub enum RuntimeEventKind {
    /// An actor was spawned (§4.3).
    ActorSpawned {
        /// The new actor's id.
        actor: ActorId,
    },
    /// An actor was torn down (§4.3, §4.9).
    ActorStopped {
        /// The actor that exited.
        actor: ActorId,
        /// Why it exited.
        reason: ExitReason,
    },
    /// The scheduler dispatched one message to an actor (§4.4, §4.9).
    ActorDispatched {
        /// The actor that ran.
        actor: ActorId,
        /// The message's reserved or user type code.
        msg_type: u32,
    },
    /// The scheduler moved an idle actor onto the ready queue (§4.4).
    SchedulerEnqueued {
        /// The actor that became ready.
        actor: ActorId,
    },
    /// A timer fired (§4.6).
    TimerFired {
        /// The timer that fired.
        timer: TimerId,
    },
    /// A timer was cancelled before firing (§4.6).
    TimerCancelled {
        /// The cancelled timer.
        timer: TimerId,
    },
    /// A path was bound in the name registry (§4.5).
    RegistryRegistered {
        /// The bound path.
        path: String,
        /// The actor it now resolves to.
        actor: ActorId,
    },
    /// One or more paths were unbound from an actor (§4.5).
    RegistryDeregistered {
        /// The actor whose bindings were removed.
        actor: ActorId,
        /// How many paths were removed.
        count: usize,
    },
    /// A transport connection was established (§4.8).
    TransportConnected {
        /// The transport's file descriptor.
        fd: i32,
        /// The peer node, if the handshake identified one.
        peer: Option<NodeId>,
    },
    /// A transport connection closed (§4.8).
    TransportDisconnected {
        /// The transport's file descriptor.
        fd: i32,
    },
    /// A transport's handshake did not complete (§4.8, §6).
    HandshakeFailed {
        /// The transport's file descriptor.
        fd: i32,
        /// Why the handshake failed.
        reason: String,
    },
    /// A file descriptor was registered with the reactor (§4.7).
    FdWatched {
        /// The watched descriptor.
        fd: i32,
    },
    /// A file descriptor was removed from the reactor (§4.7).
    FdUnwatched {
        /// The unwatched descriptor.
        fd: i32,
    },
}

impl MonitoringEvent for RuntimeEvent {
    const EVENT_TYPE: &'static str = "runtime";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.kind {
            RuntimeEventKind::ActorSpawned { .. } => EventSeverity::Debug,
            RuntimeEventKind::ActorStopped {
                reason: ExitReason::Normal,
                ..
            } => EventSeverity::Info,
            RuntimeEventKind::ActorStopped {
                reason: ExitReason::Killed,
                ..
            } => EventSeverity::Warning,
            RuntimeEventKind::ActorDispatched { .. } => EventSeverity::Trace,
            RuntimeEventKind::SchedulerEnqueued { .. } => EventSeverity::Trace,
            RuntimeEventKind::TimerFired { .. } => EventSeverity::Trace,
            RuntimeEventKind::TimerCancelled { .. } => EventSeverity::Debug,
            RuntimeEventKind::RegistryRegistered { .. } => EventSeverity::Debug,
            RuntimeEventKind::RegistryDeregistered { .. } => EventSeverity::Debug,
            RuntimeEventKind::TransportConnected { .. } => EventSeverity::Info,
            RuntimeEventKind::TransportDisconnected { .. } => EventSeverity::Warning,
            RuntimeEventKind::HandshakeFailed { .. } => EventSeverity::Error,
            RuntimeEventKind::FdWatched { .. } => EventSeverity::Trace,
            RuntimeEventKind::FdUnwatched { .. } => EventSeverity::Trace,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn monitoring_config_default_enables_info_and_above() {
        let config = MonitoringConfig::default();
        assert!(config.enabled);
        assert_eq!(config.severity_filter, EventSeverity::Info);
        assert_eq!(config.max_history_size, 256);
    }

    #[test]
    fn actor_stopped_severity_depends_on_exit_reason() {
        let actor = ActorId::new(NodeId::new(1), 1);
        let normal = RuntimeEvent::new(RuntimeEventKind::ActorStopped {
            actor,
            reason: ExitReason::Normal,
        });
        let killed = RuntimeEvent::new(RuntimeEventKind::ActorStopped {
            actor,
            reason: ExitReason::Killed,
        });
        assert_eq!(normal.severity(), EventSeverity::Info);
        assert_eq!(killed.severity(), EventSeverity::Warning);
    }

    #[test]
    fn handshake_failure_is_an_error() {
        let event = RuntimeEvent::new(RuntimeEventKind::HandshakeFailed {
            fd: 4,
            reason: "bad magic".to_string(),
        });
        assert_eq!(event.severity(), EventSeverity::Error);
    }
}
