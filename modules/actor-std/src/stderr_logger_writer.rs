//! Stderr sink for the core log stream.

use std::sync::Arc;

use arbor_actor_core_rs::{ActorSystem, EventStreamSubscription, LogEvent, LoggerSubscriber, LoggerWriter};

/// Writes log records to standard error, one line per record.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrLoggerWriter;

impl LoggerWriter for StderrLoggerWriter {
  fn write(&self, event: &LogEvent) {
    let elapsed = event.timestamp().as_secs_f64();
    match event.pid() {
      | Some(pid) => eprintln!("[{elapsed:>12.6}s {:>5}] {pid} - {}", event.level(), event.message()),
      | None => eprintln!("[{elapsed:>12.6}s {:>5}] {}", event.level(), event.message()),
    }
  }
}

/// Subscribes a stderr logger at the system's configured level.
///
/// The returned subscription keeps the logger attached; dropping it detaches
/// the logger.
#[must_use]
pub fn install_stderr_logger(system: &ActorSystem) -> EventStreamSubscription {
  let subscriber = LoggerSubscriber::new(system.config().log_level(), Arc::new(StderrLoggerWriter));
  system.event_stream().subscribe(Arc::new(subscriber))
}
