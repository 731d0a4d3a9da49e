//! Ambient observability: a generic [`Monitor`] trait the runtime reports
//! every significant event through, plus a zero-overhead default and an
//! in-memory implementation for hosts that want to inspect recent history.
//!
//! # Module Organization
//!
//! - `traits.rs` - [`EventSeverity`], [`MonitoringEvent`], [`Monitor`]
//! - `types.rs` - [`RuntimeEvent`], [`RuntimeEventKind`], [`MonitoringConfig`], [`MonitoringSnapshot`]
//! - `noop.rs` - [`NoopMonitor`], the default, zero-cost sink
//! - `in_memory.rs` - [`InMemoryMonitor`], a ring-buffer-backed sink for hosts/tests
//! - `sink.rs` - [`EventSink`], the object-safe adapter the runtime actually stores
//! - `error.rs` - [`MonitoringError`]

pub mod error;
pub mod in_memory;
pub mod noop;
pub mod sink;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use sink::EventSink;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{MonitoringConfig, MonitoringSnapshot, RuntimeEvent, RuntimeEventKind};
