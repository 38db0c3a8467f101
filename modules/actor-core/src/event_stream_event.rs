//! Event variants delivered through the event stream.

use crate::{dead_letter::DeadLetter, lifecycle_event::LifecycleEvent, log_event::LogEvent};

/// Event published on the runtime's event stream.
#[derive(Clone, Debug)]
pub enum EventStreamEvent {
  /// Actor lifecycle transition.
  Lifecycle(LifecycleEvent),
  /// Undeliverable message capture.
  DeadLetter(DeadLetter),
  /// Structured log record.
  Log(LogEvent),
}
