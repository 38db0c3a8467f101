//! Tunables applied when constructing an actor system.

use std::num::NonZeroUsize;

use crate::log_level::LogLevel;

/// Messages processed per scheduling turn unless props override it.
pub const DEFAULT_THROUGHPUT: NonZeroUsize = match NonZeroUsize::new(300) {
  | Some(value) => value,
  | None => panic!("default throughput must be non-zero"),
};

/// System-wide defaults; per-actor settings on props take precedence.
#[derive(Clone, Copy, Debug)]
pub struct ActorSystemConfig {
  throughput: NonZeroUsize,
  log_level:  LogLevel,
}

impl ActorSystemConfig {
  /// Creates the default configuration.
  #[must_use]
  pub const fn new() -> Self {
    Self { throughput: DEFAULT_THROUGHPUT, log_level: LogLevel::Info }
  }

  /// Overrides the default per-turn throughput.
  #[must_use]
  pub const fn with_throughput(mut self, throughput: NonZeroUsize) -> Self {
    self.throughput = throughput;
    self
  }

  /// Sets the severity threshold suggested to log subscribers.
  #[must_use]
  pub const fn with_log_level(mut self, level: LogLevel) -> Self {
    self.log_level = level;
    self
  }

  /// Returns the default per-turn throughput.
  #[must_use]
  pub const fn throughput(&self) -> NonZeroUsize {
    self.throughput
  }

  /// Returns the suggested log severity threshold.
  #[must_use]
  pub const fn log_level(&self) -> LogLevel {
    self.log_level
  }
}

impl Default for ActorSystemConfig {
  fn default() -> Self {
    Self::new()
  }
}
