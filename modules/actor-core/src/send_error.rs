//! Errors surfaced when a message cannot be enqueued.

use std::fmt;

use crate::any_message::AnyMessage;

/// Reason a send was rejected. The undelivered envelope is returned to the
/// caller; undeliverable user messages are additionally published to the
/// event stream as dead letters.
#[derive(Debug)]
pub enum SendError {
  /// The target mailbox reached capacity and the overflow strategy rejected
  /// the newest message.
  Full(AnyMessage),
  /// No process is registered under the target identity.
  NoRecipient(AnyMessage),
}

impl SendError {
  /// Returns the undelivered envelope.
  #[must_use]
  pub fn into_message(self) -> AnyMessage {
    match self {
      | Self::Full(message) | Self::NoRecipient(message) => message,
    }
  }
}

impl fmt::Display for SendError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Full(_) => f.write_str("mailbox is full"),
      | Self::NoRecipient(_) => f.write_str("no process registered for recipient"),
    }
  }
}

impl std::error::Error for SendError {}
