//! # microkernel-rt - A Portable, Single-Threaded Actor-Model Microkernel
//!
//! A cooperative, single-threaded actor runtime for environments where
//! `tokio`, thread pools, and heap-heavy allocators don't fit: embedded
//! controllers, constrained supervisory nodes, or any process that wants one
//! thread to own every actor, timer, and file descriptor it manages.
//!
//! # Quick Start
//!
//! ```rust
//! use microkernel_rt::actor::Behavior;
//! use microkernel_rt::message::Message;
//! use microkernel_rt::runtime::{Context, Runtime, RuntimeConfig};
//! use microkernel_rt::util::NodeId;
//!
//! struct Counter {
//!     count: u64,
//! }
//!
//! impl Behavior for Counter {
//!     fn handle(&mut self, _ctx: &mut Context<'_>, msg: &Message) -> bool {
//!         self.count += 1;
//!         msg.msg_type() != 0 // keep running as long as messages arrive
//!     }
//! }
//!
//! let config = RuntimeConfig::builder().with_node_id(NodeId::new(1)).build().unwrap();
//! let mut runtime = Runtime::init(config).unwrap();
//! let counter = runtime.spawn(Box::new(Counter { count: 0 }), 8).unwrap();
//! runtime.send(counter, 1, b"tick");
//! runtime.step();
//! ```
//!
//! # Core Model
//!
//! Every actor is dispatched to completion for exactly one message before
//! the next actor runs (§3, §5): no preemption, no OS-thread parallelism, no
//! locking anywhere in the kernel. A single [`runtime::Runtime`] owns the
//! actor table, the ready queue, the name registry, the timer wheel, the fd
//! reactor, and every cross-node transport; actors never see each other
//! directly, only through the [`runtime::Context`] handle passed to
//! [`actor::Behavior::handle`].
//!
//! # Module Organization
//!
//! ## Core Actor Model
//! - [`message`] - The message envelope and kernel-reserved system messages
//! - [`mailbox`] - Per-actor bounded ring-buffer queue
//! - [`actor`] - Actor identity, lifecycle, and the `Behavior` callback
//! - [`scheduler`] - The intrusive FIFO ready queue
//!
//! ## Naming and Time
//! - [`registry`] - Hierarchical name registry and subtree mounts
//! - [`timer`] - Drift-free one-shot and periodic timers
//!
//! ## I/O and Distribution
//! - [`reactor`] - `poll(2)`-backed fd readiness multiplexer
//! - [`transport`] - Framed byte-stream transports between nodes
//!
//! ## Runtime and Observability
//! - [`runtime`] - The `Runtime`/`Context`/`RuntimeConfig` that ties every
//!   module into one node's step loop
//! - [`monitoring`] - Ambient event observability (`Monitor`, `EventSink`)
//! - [`util`] - Shared identifiers (`NodeId`, `ActorId`, `TimerId`) and node identity
//!
//! # Architecture Principles
//!
//! ## Module Organization (§4.3)
//! Each `mod.rs` file contains only declarations and re-exports;
//! implementation lives in named files beneath it.
//!
//! ## Single-Writer State
//! Every piece of mutable kernel state (the actor table, the registry, the
//! timer wheel, the reactor's watch set) is owned by exactly one
//! [`runtime::Runtime`] value and reached only through `&mut self`; there is
//! no `Arc`, no lock, and no interior mutability in the kernel's hot path.

pub mod actor;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod reactor;
pub mod registry;
pub mod runtime;
pub mod scheduler;
pub mod timer;
pub mod transport;
pub mod util;

pub use actor::{Actor, Behavior, Status};
pub use mailbox::{Mailbox, MailboxError};
pub use message::Message;
pub use monitoring::{EventSeverity, EventSink, InMemoryMonitor, Monitor, MonitoringEvent, NoopMonitor};
pub use reactor::{Interest, Reactor};
pub use registry::{Registry, Resolution};
pub use runtime::{Context, Runtime, RuntimeConfig, RuntimeError};
pub use scheduler::Scheduler;
pub use timer::TimerWheel;
pub use transport::{Frame, Transport};
pub use util::{ActorId, NodeId, NodeIdentity, TimerId};
