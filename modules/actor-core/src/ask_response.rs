//! Reply handle returned by request-style sends.

use crate::{actor_future::ActorFutureShared, actor_ref::ActorRef, any_message::AnyMessage};

/// Pairs the ephemeral reply address with the future resolving the reply.
///
/// The reply address is registered for exactly one message: the first
/// envelope told to it completes the future and retires the address.
pub struct AskResponse {
  sender: ActorRef,
  future: ActorFutureShared<AnyMessage>,
}

impl AskResponse {
  /// Creates a response handle from its parts.
  #[must_use]
  pub const fn new(sender: ActorRef, future: ActorFutureShared<AnyMessage>) -> Self {
    Self { sender, future }
  }

  /// Returns the reply address handed to the target actor.
  #[must_use]
  pub const fn sender(&self) -> &ActorRef {
    &self.sender
  }

  /// Returns the future resolving with the reply envelope.
  #[must_use]
  pub const fn future(&self) -> &ActorFutureShared<AnyMessage> {
    &self.future
  }

  /// Splits the handle into its parts.
  #[must_use]
  pub fn into_parts(self) -> (ActorRef, ActorFutureShared<AnyMessage>) {
    (self.sender, self.future)
  }
}
