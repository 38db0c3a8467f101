//! Trait implemented by event stream observers.

use crate::event_stream_event::EventStreamEvent;

/// Observer registered with the event stream.
///
/// Callbacks run on the publishing thread with no stream lock held, so
/// subscribers may publish further events but must return promptly.
pub trait EventStreamSubscriber: Send + Sync + 'static {
  /// Invoked for every published event.
  fn on_event(&self, event: &EventStreamEvent);
}
