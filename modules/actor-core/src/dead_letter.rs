//! Records of undeliverable messages.

use std::time::Duration;

use crate::{any_message::AnyMessage, pid::Pid};

/// A user message whose recipient resolved to no live process.
#[derive(Clone, Debug)]
pub struct DeadLetter {
  message:   AnyMessage,
  recipient: Pid,
  timestamp: Duration,
}

impl DeadLetter {
  /// Creates a dead letter record.
  #[must_use]
  pub const fn new(message: AnyMessage, recipient: Pid, timestamp: Duration) -> Self {
    Self { message, recipient, timestamp }
  }

  /// Returns the undelivered envelope.
  #[must_use]
  pub const fn message(&self) -> &AnyMessage {
    &self.message
  }

  /// Returns the intended recipient.
  #[must_use]
  pub const fn recipient(&self) -> &Pid {
    &self.recipient
  }

  /// Returns the monotonic offset from system start.
  #[must_use]
  pub const fn timestamp(&self) -> Duration {
    self.timestamp
  }
}
