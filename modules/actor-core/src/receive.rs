//! Shared receive handlers used for behaviors and middleware.

use std::{fmt, sync::Arc};

use crate::{actor::Actor, actor_context::ActorContext, actor_error::ActorError};

/// Error code reported when a behavior was installed for a different actor
/// type than the running instance.
pub const BEHAVIOR_TYPE_MISMATCH: &str = "behavior-type-mismatch";

type ReceiveFn = dyn Fn(&mut dyn Actor, &mut ActorContext<'_>) -> Result<(), ActorError> + Send + Sync;

/// A cloneable message handler.
///
/// Behaviors on the cell's behavior stack and entries of the middleware
/// pipeline are `Receive` values. Handlers run with exclusive access to the
/// actor instance and to the dispatch context.
#[derive(Clone)]
pub struct Receive {
  handler: Arc<ReceiveFn>,
}

impl Receive {
  /// Wraps a closure over the type-erased actor instance.
  #[must_use]
  pub fn new<F>(handler: F) -> Self
  where
    F: Fn(&mut dyn Actor, &mut ActorContext<'_>) -> Result<(), ActorError> + Send + Sync + 'static, {
    Self { handler: Arc::new(handler) }
  }

  /// Adapts a handler written against a concrete actor type.
  ///
  /// The returned handler downcasts the running instance; a mismatch is a
  /// programmer error and fails the dispatch with
  /// [`BEHAVIOR_TYPE_MISMATCH`].
  #[must_use]
  pub fn of<A: Actor>(handler: fn(&mut A, &mut ActorContext<'_>) -> Result<(), ActorError>) -> Self {
    Self::new(move |actor: &mut dyn Actor, ctx: &mut ActorContext<'_>| match actor.downcast_mut::<A>() {
      | Some(actor) => handler(actor, ctx),
      | None => Err(ActorError::fatal(BEHAVIOR_TYPE_MISMATCH)),
    })
  }

  /// Invokes the handler.
  ///
  /// # Errors
  ///
  /// Propagates the handler's failure.
  pub fn invoke(&self, actor: &mut dyn Actor, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    (self.handler)(actor, ctx)
  }
}

impl fmt::Debug for Receive {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Receive")
  }
}
