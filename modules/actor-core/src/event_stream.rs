//! In-process fanout bus for runtime events.

use std::sync::{Arc, Mutex};

use crate::{
  event_stream_event::EventStreamEvent, event_stream_subscriber::EventStreamSubscriber,
  event_stream_subscription::EventStreamSubscription, sync::lock_unpoisoned,
};

struct EventStreamInner {
  subscribers: Vec<(u64, Arc<dyn EventStreamSubscriber>)>,
  next_id:     u64,
}

/// Broadcasts lifecycle, dead-letter, and log events to subscribers.
///
/// Publication snapshots the subscriber list and invokes callbacks after the
/// lock is released, so subscribers can publish recursively.
pub struct EventStream {
  inner: Mutex<EventStreamInner>,
}

impl EventStream {
  /// Creates a stream with no subscribers.
  #[must_use]
  pub fn new() -> Self {
    Self { inner: Mutex::new(EventStreamInner { subscribers: Vec::new(), next_id: 0 }) }
  }

  /// Registers a subscriber; dropping the returned handle unsubscribes.
  #[must_use]
  pub fn subscribe(self: &Arc<Self>, subscriber: Arc<dyn EventStreamSubscriber>) -> EventStreamSubscription {
    let id = {
      let mut inner = lock_unpoisoned(&self.inner);
      let id = inner.next_id;
      inner.next_id += 1;
      inner.subscribers.push((id, subscriber));
      id
    };
    EventStreamSubscription::new(Arc::clone(self), id)
  }

  /// Removes the subscriber with the provided identifier.
  pub(crate) fn unsubscribe(&self, id: u64) {
    lock_unpoisoned(&self.inner).subscribers.retain(|(entry_id, _)| *entry_id != id);
  }

  /// Delivers the event to every current subscriber.
  pub fn publish(&self, event: &EventStreamEvent) {
    let snapshot: Vec<Arc<dyn EventStreamSubscriber>> =
      lock_unpoisoned(&self.inner).subscribers.iter().map(|(_, subscriber)| Arc::clone(subscriber)).collect();
    for subscriber in snapshot {
      subscriber.on_event(event);
    }
  }

  /// Returns the number of live subscriptions.
  #[must_use]
  pub fn subscriber_count(&self) -> usize {
    lock_unpoisoned(&self.inner).subscribers.len()
  }
}

impl Default for EventStream {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use super::EventStream;
  use crate::{
    event_stream_event::EventStreamEvent, event_stream_subscriber::EventStreamSubscriber, log_event::LogEvent,
    log_level::LogLevel,
  };

  struct Counter {
    seen: AtomicUsize,
  }

  impl EventStreamSubscriber for Counter {
    fn on_event(&self, _event: &EventStreamEvent) {
      self.seen.fetch_add(1, Ordering::SeqCst);
    }
  }

  fn log_event() -> EventStreamEvent {
    EventStreamEvent::Log(LogEvent::new(LogLevel::Info, "probe".to_string(), None, std::time::Duration::ZERO))
  }

  #[test]
  fn publish_reaches_every_subscriber() {
    let stream = Arc::new(EventStream::new());
    let counter = Arc::new(Counter { seen: AtomicUsize::new(0) });
    let _subscription = stream.subscribe(counter.clone());
    stream.publish(&log_event());
    stream.publish(&log_event());
    assert_eq!(counter.seen.load(Ordering::SeqCst), 2);
  }

  #[test]
  fn dropping_the_subscription_unsubscribes() {
    let stream = Arc::new(EventStream::new());
    let counter = Arc::new(Counter { seen: AtomicUsize::new(0) });
    let subscription = stream.subscribe(counter.clone());
    drop(subscription);
    assert_eq!(stream.subscriber_count(), 0);
    stream.publish(&log_event());
    assert_eq!(counter.seen.load(Ordering::SeqCst), 0);
  }
}
