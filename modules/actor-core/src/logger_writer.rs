//! Output sink consumed by the logger subscriber.

use crate::log_event::LogEvent;

/// Writes formatted log records to some destination.
///
/// The core stays output-agnostic; runtime crates provide concrete writers
/// (the std crate ships a stderr writer).
pub trait LoggerWriter: Send + Sync + 'static {
  /// Writes one record.
  fn write(&self, event: &LogEvent);
}
