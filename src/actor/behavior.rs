//! The per-actor behavior callback (§3, §4.3, §9 Design Notes).

// Layer 3: Internal module imports
use crate::message::Message;
use crate::runtime::Context;

/// A pure function from `(message, state)` to "keep running?" (§9: "Behaviors
/// are pure functions from (message, state) to a continue flag; suspending
/// means returning").
///
/// The implementing type *is* the actor's owned state; there is no separate
/// opaque state pointer. Dropping a `Box<dyn Behavior>` runs the type's own
/// `Drop` impl exactly once, which is how this crate satisfies §4.3's
/// "state-release callback runs exactly once regardless of how the actor
/// terminated" without a second destructor-callback field to keep in sync.
///
/// # Examples
///
/// ```rust
/// use microkernel_rt::actor::Behavior;
/// use microkernel_rt::message::Message;
/// use microkernel_rt::runtime::Context;
///
/// struct Counter { seen: u64 }
///
/// impl Behavior for Counter {
///     fn handle(&mut self, _ctx: &mut Context<'_>, _msg: &Message) -> bool {
///         self.seen += 1;
///         self.seen < 1000
///     }
/// }
/// ```
pub trait Behavior {
    /// Process one message, returning whether the actor should keep running.
    /// Any `ctx` calls (sends, timers, watches) take effect immediately but
    /// are only observed by the runtime on a later step (§5).
    fn handle(&mut self, ctx: &mut Context<'_>, msg: &Message) -> bool;
}
