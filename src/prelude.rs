//! Convenient single-import surface for building on the microkernel.
//!
//! ```rust
//! use microkernel_rt::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Core Actor Model
//! - [`Actor`], [`Behavior`], [`Status`] - actor identity, lifecycle, and the callback trait
//! - [`Message`] - the message envelope
//! - [`Mailbox`], [`MailboxError`] - the bounded per-actor queue
//! - [`Scheduler`] - the ready queue
//!
//! ## Naming and Time
//! - [`Registry`], [`Resolution`] - the name registry and its lookup result
//! - [`TimerWheel`] - one-shot and periodic timers
//!
//! ## I/O and Distribution
//! - [`Reactor`], [`Interest`] - the fd readiness multiplexer
//! - [`Transport`], [`Frame`] - cross-node transports and the wire frame
//!
//! ## Runtime and Observability
//! - [`Runtime`], [`Context`], [`RuntimeConfig`], [`RuntimeError`] - the node itself
//! - [`Monitor`], [`EventSink`], [`MonitoringEvent`], [`EventSeverity`], [`InMemoryMonitor`], [`NoopMonitor`]
//! - [`ActorId`], [`NodeId`], [`TimerId`], [`NodeIdentity`]
//!
//! # Example
//!
//! ```rust
//! use microkernel_rt::prelude::*;
//!
//! struct Logger;
//! impl Behavior for Logger {
//!     fn handle(&mut self, _ctx: &mut Context<'_>, _msg: &Message) -> bool {
//!         true
//!     }
//! }
//!
//! let config = RuntimeConfig::builder().with_node_id(NodeId::new(1)).build().unwrap();
//! let mut runtime = Runtime::init(config).unwrap();
//! let id = runtime.spawn(Box::new(Logger), 8).unwrap();
//! runtime.send(id, 1, b"hello");
//! ```

// Core actor model
pub use crate::actor::{Actor, Behavior, Status};
pub use crate::mailbox::{Mailbox, MailboxError};
pub use crate::message::Message;
pub use crate::scheduler::Scheduler;

// Naming and time
pub use crate::registry::{Registry, Resolution};
pub use crate::timer::TimerWheel;

// I/O and distribution
pub use crate::reactor::{Interest, Reactor};
pub use crate::transport::{Frame, Transport};

// Runtime and observability
pub use crate::monitoring::{EventSeverity, EventSink, InMemoryMonitor, Monitor, MonitoringEvent, NoopMonitor};
pub use crate::runtime::{Context, Runtime, RuntimeConfig, RuntimeError};
pub use crate::util::{ActorId, NodeId, NodeIdentity, TimerId};
