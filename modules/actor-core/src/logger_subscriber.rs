//! Event stream subscriber that forwards log records to a writer.

use std::sync::Arc;

use crate::{
  event_stream_event::EventStreamEvent, event_stream_subscriber::EventStreamSubscriber, log_level::LogLevel,
  logger_writer::LoggerWriter,
};

/// Filters log events by severity and delegates to a [`LoggerWriter`].
pub struct LoggerSubscriber {
  level:  LogLevel,
  writer: Arc<dyn LoggerWriter>,
}

impl LoggerSubscriber {
  /// Creates a subscriber forwarding records at or above `level`.
  #[must_use]
  pub fn new(level: LogLevel, writer: Arc<dyn LoggerWriter>) -> Self {
    Self { level, writer }
  }

  /// Returns the minimum severity forwarded.
  #[must_use]
  pub const fn level(&self) -> LogLevel {
    self.level
  }
}

impl EventStreamSubscriber for LoggerSubscriber {
  fn on_event(&self, event: &EventStreamEvent) {
    if let EventStreamEvent::Log(record) = event {
      if record.level() >= self.level {
        self.writer.write(record);
      }
    }
  }
}
