//! Borrowed view over the message being dispatched.

use std::any::Any;

use crate::actor_ref::ActorRef;

/// Borrowed payload plus sender, valid for the duration of one dispatch.
#[derive(Clone, Copy)]
pub struct AnyMessageView<'a> {
  payload: &'a (dyn Any + Send + Sync + 'static),
  sender:  Option<&'a ActorRef>,
}

impl<'a> AnyMessageView<'a> {
  /// Creates a view over a payload and optional sender.
  #[must_use]
  pub fn new(payload: &'a (dyn Any + Send + Sync + 'static), sender: Option<&'a ActorRef>) -> Self {
    Self { payload, sender }
  }

  /// Attempts to view the payload as `T`.
  #[must_use]
  pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
    self.payload.downcast_ref::<T>()
  }

  /// Returns `true` when the payload is of type `T`.
  #[must_use]
  pub fn is<T: Any>(&self) -> bool {
    self.payload.is::<T>()
  }

  /// Returns the sender attached to the envelope, if any.
  #[must_use]
  pub const fn sender(&self) -> Option<&'a ActorRef> {
    self.sender
  }
}
