//! Message handling contract implemented by user actors.

use std::any::Any;

use crate::{actor_context::ActorContext, actor_error::ActorError};

/// A unit of isolated state with a single-threaded message loop.
///
/// `receive` is invoked once per user message; the current payload and sender
/// are exposed through the [`ActorContext`]. The runtime never invokes two
/// handlers of the same instance concurrently, so implementations keep plain
/// mutable state without locking.
///
/// Returning an error (or panicking) trips the fault boundary: the cell
/// suspends itself and reports the failure to its parent for a supervision
/// directive.
pub trait Actor: Any + Send {
  /// Handles the message currently held by the context.
  ///
  /// # Errors
  ///
  /// Returns an [`ActorError`] to report the failure to the supervisor.
  fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError>;
}

impl dyn Actor {
  /// Attempts to borrow the instance as a concrete actor type.
  #[must_use]
  pub fn downcast_mut<A: Actor>(&mut self) -> Option<&mut A> {
    let any: &mut dyn Any = self;
    any.downcast_mut::<A>()
  }

  /// Attempts to borrow the instance as a concrete actor type.
  #[must_use]
  pub fn downcast_ref<A: Actor>(&self) -> Option<&A> {
    let any: &dyn Any = self;
    any.downcast_ref::<A>()
  }
}
