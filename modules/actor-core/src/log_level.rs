//! Severity levels for runtime log events.

use std::fmt;

/// Severity of a [`LogEvent`](crate::log_event::LogEvent).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
  /// Diagnostic detail.
  Debug,
  /// Routine operational information.
  Info,
  /// Unexpected but tolerated conditions.
  Warn,
  /// Failures routed to supervision or dropped traffic.
  Error,
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      | Self::Debug => "DEBUG",
      | Self::Info => "INFO",
      | Self::Warn => "WARN",
      | Self::Error => "ERROR",
    };
    f.write_str(label)
  }
}
