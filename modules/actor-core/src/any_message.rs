//! Owned, dynamically typed message envelope.

use std::{any::Any, fmt, sync::Arc};

use crate::actor_ref::ActorRef;

/// Shared, type-erased payload carried by an [`AnyMessage`].
pub type MessagePayload = Arc<dyn Any + Send + Sync + 'static>;

/// Wraps an arbitrary payload together with an optional reply-to sender.
pub struct AnyMessage {
  payload: MessagePayload,
  sender:  Option<ActorRef>,
}

impl AnyMessage {
  /// Creates an envelope from the provided payload.
  #[must_use]
  pub fn new<T>(payload: T) -> Self
  where
    T: Any + Send + Sync + 'static, {
    Self { payload: Arc::new(payload), sender: None }
  }

  /// Associates a sender with the envelope and returns it.
  #[must_use]
  pub fn with_sender(mut self, sender: ActorRef) -> Self {
    self.sender = Some(sender);
    self
  }

  /// Returns the sender, if one was attached.
  #[must_use]
  pub const fn sender(&self) -> Option<&ActorRef> {
    self.sender.as_ref()
  }

  /// Returns the payload as a type-erased reference.
  #[must_use]
  pub fn payload(&self) -> &(dyn Any + Send + Sync + 'static) {
    &*self.payload
  }

  /// Attempts to view the payload as `T`.
  #[must_use]
  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.payload().downcast_ref::<T>()
  }

  /// Returns a clone of the shared payload pointer.
  #[must_use]
  pub fn payload_arc(&self) -> MessagePayload {
    self.payload.clone()
  }

  /// Splits the envelope into payload and sender.
  #[must_use]
  pub fn into_parts(self) -> (MessagePayload, Option<ActorRef>) {
    (self.payload, self.sender)
  }

  /// Rebuilds an envelope from previously split parts.
  #[must_use]
  pub fn from_parts(payload: MessagePayload, sender: Option<ActorRef>) -> Self {
    Self { payload, sender }
  }
}

impl Clone for AnyMessage {
  fn clone(&self) -> Self {
    Self { payload: self.payload.clone(), sender: self.sender.clone() }
  }
}

impl fmt::Debug for AnyMessage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AnyMessage")
      .field("type_id", &self.payload.type_id())
      .field("has_sender", &self.sender.is_some())
      .finish()
  }
}
