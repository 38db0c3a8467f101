//! Structured log record published on the event stream.

use std::time::Duration;

use crate::{log_level::LogLevel, pid::Pid};

/// One log record, tagged with the emitting actor when known.
#[derive(Clone, Debug)]
pub struct LogEvent {
  level:     LogLevel,
  message:   String,
  pid:       Option<Pid>,
  timestamp: Duration,
}

impl LogEvent {
  /// Creates a log record.
  #[must_use]
  pub const fn new(level: LogLevel, message: String, pid: Option<Pid>, timestamp: Duration) -> Self {
    Self { level, message, pid, timestamp }
  }

  /// Returns the severity.
  #[must_use]
  pub const fn level(&self) -> LogLevel {
    self.level
  }

  /// Returns the message text.
  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }

  /// Returns the emitting actor, if attributed.
  #[must_use]
  pub const fn pid(&self) -> Option<&Pid> {
    self.pid.as_ref()
  }

  /// Returns the monotonic offset from system start.
  #[must_use]
  pub const fn timestamp(&self) -> Duration {
    self.timestamp
  }
}
