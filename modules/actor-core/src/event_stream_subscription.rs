//! RAII handle for event stream registrations.

use std::sync::Arc;

use crate::event_stream::EventStream;

/// Keeps a subscription alive; dropping it removes the subscriber.
pub struct EventStreamSubscription {
  stream: Arc<EventStream>,
  id:     u64,
}

impl EventStreamSubscription {
  /// Creates a handle for the given registration.
  #[must_use]
  pub(crate) fn new(stream: Arc<EventStream>, id: u64) -> Self {
    Self { stream, id }
  }

  /// Returns the registration identifier.
  #[must_use]
  pub const fn id(&self) -> u64 {
    self.id
  }
}

impl Drop for EventStreamSubscription {
  fn drop(&mut self) {
    self.stream.unsubscribe(self.id);
  }
}
