//! The router/runtime: actor table, scheduler, registry, timers, reactor,
//! and transports wired into one cooperative step loop (§3, §4.9).

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::time::{Duration, Instant};

// Layer 3: Internal module imports
use super::config::RuntimeConfig;
use super::context::Context;
use super::error::RuntimeError;
use crate::actor::{Actor, Behavior, Status};
use crate::message::kinds::{ExitReason, SystemMessage, MSG_STOP};
use crate::message::Message;
use crate::monitoring::{EventSink, NoopMonitor, RuntimeEvent, RuntimeEventKind};
use crate::reactor::{Interest, Reactor};
use crate::registry::{Registry, RegistryError, Resolution};
use crate::scheduler::Scheduler;
use crate::timer::TimerWheel;
use crate::transport::{Frame, Transport};
use crate::util::{ActorId, NodeId, NodeIdentity};

/// Registry capacity is sized off `max_actors` rather than configured
/// separately: most actors register a small, bounded number of paths, and
/// §6 gives no separate knob for it.
const REGISTRY_CAPACITY_PER_ACTOR: usize = 8;

fn resolve_identity(config: &RuntimeConfig) -> NodeIdentity {
    let name = std::env::var("NODE_NAME")
        .ok()
        .or_else(|| config.node_name.clone())
        .unwrap_or_else(|| std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown-node".to_string()));
    let explicit_id = std::env::var("NODE_ID")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|id| (1..=15).contains(id))
        .or_else(|| config.node_id.map(|id| id.raw()));
    NodeIdentity::from_parts(name, explicit_id)
}

/// The single-threaded microkernel runtime: owns every actor, the ready
/// queue, the name registry, the timer wheel, the fd reactor, and the
/// transports bridging to other nodes (§3, §9 "single process owning
/// everything").
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::actor::Behavior;
/// use microkernel_rt::message::Message;
/// use microkernel_rt::runtime::{Context, Runtime, RuntimeConfig};
/// use microkernel_rt::util::NodeId;
///
/// struct Greeter;
/// impl Behavior for Greeter {
///     fn handle(&mut self, _ctx: &mut Context<'_>, _msg: &Message) -> bool {
///         false // one message, then terminate
///     }
/// }
///
/// let config = RuntimeConfig::builder().with_node_id(NodeId::new(1)).build().unwrap();
/// let mut runtime = Runtime::init(config).unwrap();
/// let id = runtime.spawn(Box::new(Greeter), 4).unwrap();
/// assert!(runtime.send(id, 1, b"hi"));
/// runtime.step();
/// assert!(!runtime.is_alive(id));
/// ```
pub struct Runtime {
    node_id: NodeId,
    identity: NodeIdentity,
    config: RuntimeConfig,
    actors: HashMap<ActorId, Actor>,
    scheduler: Scheduler,
    pub(super) registry: Registry,
    pub(super) timers: TimerWheel,
    pub(super) reactor: Reactor,
    transports: Vec<Box<dyn Transport>>,
    monitor: Box<dyn EventSink>,
    next_seq: u32,
    stop_requested: bool,
}

impl Runtime {
    /// Build a runtime from `config`, resolving node identity from the
    /// environment per §6 (`NODE_NAME`/`NODE_ID` override the config's
    /// values, which in turn override the hashed default).
    pub fn init(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        config.validate().map_err(RuntimeError::Fatal)?;
        let identity = resolve_identity(&config);
        let node_id = identity.node_id();
        let registry_capacity = config.max_actors.saturating_mul(REGISTRY_CAPACITY_PER_ACTOR);
        Ok(Self {
            node_id,
            identity,
            registry: Registry::new(registry_capacity),
            timers: TimerWheel::new(),
            reactor: Reactor::new(),
            transports: Vec::new(),
            monitor: Box::new(NoopMonitor::<RuntimeEvent>::new()),
            actors: HashMap::new(),
            scheduler: Scheduler::new(),
            config,
            next_seq: 0,
            stop_requested: false,
        })
    }

    /// Tear the runtime down. Every field's own `Drop` releases its
    /// resources (mailboxes, registry bindings, watched fds, transports);
    /// this method exists only so `destroy` appears explicitly in the API,
    /// matching §4.9, §6.
    pub fn destroy(self) {}

    /// This node's id, whether configured or derived (§3, §6).
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// This node's resolved identity (name + node id).
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// Replace the default no-op monitor with one that records history
    /// (§4.3 ambient observability).
    pub fn set_monitor(&mut self, monitor: Box<dyn EventSink>) {
        self.monitor = monitor;
    }

    /// Whether `id` currently names a live actor on this node.
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Number of actors currently live on this node.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Number of messages currently queued for `id`'s mailbox (0 if `id`
    /// isn't live). Mainly useful for tests and diagnostics.
    pub fn mailbox_len(&self, id: ActorId) -> usize {
        self.actors.get(&id).map(|a| a.mailbox().count()).unwrap_or(0)
    }

    /// Bind `path` to `id` in the name registry (§4.5).
    pub fn register(&mut self, path: &str, id: ActorId) -> Result<(), RegistryError> {
        self.registry.register(path, id)
    }

    /// Resolve `path` through the name registry (§4.5).
    pub fn lookup(&self, path: &str) -> Result<Resolution, RegistryError> {
        self.registry.lookup(path)
    }

    /// Mount `prefix` to `target` (§4.5).
    pub fn mount(&mut self, prefix: &str, target: ActorId) -> Result<(), RegistryError> {
        self.registry.mount(prefix, target)
    }

    /// Remove the mount at `prefix` (§4.5).
    pub fn unmount(&mut self, prefix: &str) -> Result<(), RegistryError> {
        self.registry.unmount(prefix)
    }

    /// Add a transport this node will route cross-node sends and inbound
    /// frames through (§4.9 `add_transport`).
    pub fn add_transport(&mut self, transport: Box<dyn Transport>) {
        self.monitor.record(RuntimeEvent::new(RuntimeEventKind::TransportConnected {
            fd: transport.fd(),
            peer: transport.peer_node(),
        }));
        self.transports.push(transport);
    }

    /// Spawn a top-level (unsupervised) actor (§4.9 `spawn`).
    pub fn spawn(&mut self, behavior: Box<dyn Behavior>, mailbox_cap: usize) -> Result<ActorId, RuntimeError> {
        self.spawn_internal(behavior, ActorId::INVALID, mailbox_cap)
    }

    pub(super) fn spawn_internal(
        &mut self,
        behavior: Box<dyn Behavior>,
        parent: ActorId,
        mailbox_cap: usize,
    ) -> Result<ActorId, RuntimeError> {
        if self.actors.len() >= self.config.max_actors {
            return Err(RuntimeError::TableFull {
                max_actors: self.config.max_actors,
            });
        }
        self.next_seq += 1;
        let id = ActorId::new(self.node_id, self.next_seq);
        let cap = if mailbox_cap == 0 {
            self.config.default_mailbox_capacity
        } else {
            mailbox_cap
        };
        self.actors.insert(id, Actor::new(id, behavior, parent, cap));
        self.monitor.record(RuntimeEvent::new(RuntimeEventKind::ActorSpawned { actor: id }));
        Ok(id)
    }

    /// Request that `id` be torn down after its next dispatch (§4.9 `stop`):
    /// enqueues a synthetic `MSG_STOP` the runtime intercepts itself rather
    /// than handing to the behavior.
    pub fn stop(&mut self, id: ActorId) {
        self.deliver_local(ActorId::INVALID, id, MSG_STOP, &[]);
    }

    /// Route a message to `dest` as an external caller (§4.9 routing
    /// algorithm, §6 `send`). Returns `false` on any failure.
    pub fn send(&mut self, dest: ActorId, msg_type: u32, payload: &[u8]) -> bool {
        self.send_from(ActorId::INVALID, dest, msg_type, payload)
    }

    pub(super) fn send_from(&mut self, source: ActorId, dest: ActorId, msg_type: u32, payload: &[u8]) -> bool {
        if !dest.is_valid() {
            return false;
        }
        if dest.node() == self.node_id {
            self.deliver_local(source, dest, msg_type, payload)
        } else {
            self.deliver_remote(source, dest, msg_type, payload)
        }
    }

    /// §4.9 routing algorithm, step 2: local delivery. Enqueues into the
    /// destination's mailbox and moves it onto the ready queue if it was
    /// idle (§8 property 4's duplicate guard makes this safe to call even
    /// if the actor is already ready).
    fn deliver_local(&mut self, source: ActorId, dest: ActorId, msg_type: u32, payload: &[u8]) -> bool {
        let msg = match Message::new(source, dest, msg_type, payload) {
            Ok(msg) => msg,
            Err(_) => return false,
        };
        let was_idle = {
            let Some(actor) = self.actors.get_mut(&dest) else {
                return false;
            };
            if actor.mailbox_mut().enqueue(msg).is_err() {
                return false;
            }
            actor.status() == Status::Idle
        };
        if was_idle {
            self.scheduler.enqueue(dest, &mut self.actors);
        }
        true
    }

    /// §4.9 routing algorithm, step 3: the first transport whose peer node
    /// matches `dest`'s node serializes and sends the frame; no match fails
    /// the send.
    fn deliver_remote(&mut self, source: ActorId, dest: ActorId, msg_type: u32, payload: &[u8]) -> bool {
        let dest_node = dest.node();
        let Some(transport) = self
            .transports
            .iter_mut()
            .find(|t| t.peer_node() == Some(dest_node))
        else {
            return false;
        };
        let frame = Frame {
            source_node: self.node_id,
            dest,
            source,
            msg_type,
            payload: payload.to_vec(),
        };
        matches!(transport.send(&frame), Ok(true))
    }

    /// §4.9 step loop, step 1: dispatch one ready actor's oldest message.
    /// Removes the actor from the table for the duration of the call so
    /// [`Context`] can hold both it and the rest of the runtime mutably
    /// without aliasing (§9).
    fn dispatch_one(&mut self) -> bool {
        let Some(id) = self.scheduler.dequeue(&mut self.actors) else {
            return false;
        };
        let Some(mut actor) = self.actors.remove(&id) else {
            return true;
        };
        actor.set_status(Status::Running);
        let Some(msg) = actor.mailbox_mut().dequeue() else {
            actor.set_status(Status::Idle);
            self.actors.insert(id, actor);
            return true;
        };

        self.monitor.record(RuntimeEvent::new(RuntimeEventKind::ActorDispatched {
            actor: id,
            msg_type: msg.msg_type(),
        }));

        if msg.msg_type() == MSG_STOP {
            actor.set_exit_reason(ExitReason::Killed);
            self.finish_teardown(id, actor);
            return true;
        }

        let mut behavior = actor.take_behavior();
        let cont = {
            let mut ctx = Context {
                runtime: self,
                current: &mut actor,
                actor_id: id,
            };
            behavior.handle(&mut ctx, &msg)
        };
        actor.put_behavior(behavior);

        if !cont {
            actor.set_exit_reason(ExitReason::Normal);
            self.finish_teardown(id, actor);
        } else if actor.mailbox().is_empty() {
            actor.set_status(Status::Idle);
            self.actors.insert(id, actor);
        } else {
            actor.set_status(Status::Idle);
            self.actors.insert(id, actor);
            self.scheduler.enqueue(id, &mut self.actors);
        }
        true
    }

    /// Free `actor`'s mailbox and state, unwatch any fds it owned, drop its
    /// registry bindings, and notify a live parent with `MSG_CHILD_EXIT`
    /// (§3 Supervision, §4.9 Stopping). Deregistering the dead actor's
    /// registry paths isn't spelled out by §4.5/§4.9, but leaving stale
    /// bindings pointing at a freed actor would violate the registry's own
    /// round-trip invariant (§8 property 5) the first time something looked
    /// the path back up.
    fn finish_teardown(&mut self, id: ActorId, actor: Actor) {
        let parent = actor.parent();
        let reason = actor.exit_reason().unwrap_or(ExitReason::Normal);
        self.reactor.unwatch_owner(id);
        self.registry.deregister_paths(id);
        self.monitor.record(RuntimeEvent::new(RuntimeEventKind::ActorStopped { actor: id, reason }));
        drop(actor);

        if parent.is_valid() && self.actors.contains_key(&parent) {
            let sysmsg = SystemMessage::ChildExit { child: id, reason };
            let payload = sysmsg.encode();
            self.deliver_local(ActorId::INVALID, parent, sysmsg.type_code(), &payload);
        }
    }

    /// §4.9 step loop, step 3: poll watched fds and transports, turning
    /// readiness into `MSG_FD_EVENT` deliveries. Transport fds are
    /// re-registered every step (a listener's accepted fd can change across
    /// steps) and tagged with [`ActorId::INVALID`] so they're skipped here
    /// and drained separately by [`Self::drain_transports`].
    fn poll_io(&mut self, timeout: Duration) {
        for transport in &self.transports {
            self.reactor.watch(transport.fd(), ActorId::INVALID, Interest::READABLE);
        }
        let Ok(ready) = self.reactor.poll(timeout) else {
            return;
        };
        for (owner, fd, events) in ready {
            if owner == ActorId::INVALID {
                continue;
            }
            let sysmsg = SystemMessage::FdEvent { fd, events: events.bits() };
            let payload = sysmsg.encode();
            self.deliver_local(ActorId::INVALID, owner, sysmsg.type_code(), &payload);
        }
    }

    /// §4.9 step loop, step 3: flush every transport's write buffer (so a
    /// handshake queued at connect/accept time egresses even with no
    /// outbound application message to piggyback it on, §6), then drain
    /// every transport's receive buffer every step (a simplification over
    /// strictly poll-gated draining: recv() never blocks, so this never
    /// stalls the loop) and route each frame exactly as a local send would.
    fn drain_transports(&mut self) {
        for transport in &mut self.transports {
            let _ = transport.flush();
        }

        let mut disconnected = Vec::new();
        for i in 0..self.transports.len() {
            loop {
                match self.transports[i].recv() {
                    Ok(Some(frame)) => {
                        self.deliver_local(frame.source, frame.dest, frame.msg_type, &frame.payload);
                    }
                    Ok(None) => break,
                    Err(_) => {
                        disconnected.push(i);
                        break;
                    }
                }
            }
        }
        for i in disconnected.into_iter().rev() {
            let transport = self.transports.remove(i);
            self.monitor.record(RuntimeEvent::new(RuntimeEventKind::TransportDisconnected { fd: transport.fd() }));
        }
    }

    /// Run exactly one iteration of the step loop (§4.9): dispatch, advance
    /// timers, poll fds/transports.
    pub fn step(&mut self) {
        self.dispatch_one();

        let now = Instant::now();
        for (owner, timer_id) in self.timers.advance(now) {
            self.monitor.record(RuntimeEvent::new(RuntimeEventKind::TimerFired { timer: timer_id }));
            let sysmsg = SystemMessage::Timer { timer_id };
            let payload = sysmsg.encode();
            self.deliver_local(ActorId::INVALID, owner, sysmsg.type_code(), &payload);
        }

        let timeout = self
            .timers
            .next_delta(now)
            .unwrap_or(self.config.poll_default_timeout);
        self.poll_io(timeout);
        self.drain_transports();
    }

    /// Run the step loop until [`Self::runtime_stop`] is called (§4.9 `run`).
    pub fn run(&mut self) {
        self.stop_requested = false;
        while !self.stop_requested {
            self.step();
        }
    }

    /// Ask [`Self::run`] to exit at the top of its next iteration (§4.9 `runtime_stop`).
    pub fn runtime_stop(&mut self) {
        self.stop_requested = true;
    }
}
