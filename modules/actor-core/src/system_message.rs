//! Control messages processed by the cell ahead of user traffic.

use crate::{actor_error::ActorError, pid::Pid};

/// Internal control messages. The mailbox drains every ready system message
/// before the next user message, and suspension never gates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystemMessage {
  /// Enqueued once at spawn; the cell answers by delivering `Started`.
  Create,
  /// Requests a graceful stop of the cell and its children.
  Stop,
  /// Requests the cell to recreate its actor instance.
  Restart,
  /// Pauses user message delivery.
  Suspend,
  /// Re-enables user message delivery.
  Resume,
  /// Registers the given actor as a watcher of this cell.
  Watch(Pid),
  /// Removes the given actor from this cell's watchers.
  Unwatch(Pid),
  /// Notifies that a watched actor finalized its stop.
  Terminated(Pid),
  /// Reports a child failure to its supervising parent.
  Failure(FailurePayload),
}

/// Failure report travelling from a faulted child to its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailurePayload {
  child:  Pid,
  reason: ActorError,
}

impl FailurePayload {
  /// Creates a failure report.
  #[must_use]
  pub const fn new(child: Pid, reason: ActorError) -> Self {
    Self { child, reason }
  }

  /// Returns the identity of the failed actor.
  #[must_use]
  pub const fn child(&self) -> &Pid {
    &self.child
  }

  /// Returns the failure reason.
  #[must_use]
  pub const fn reason(&self) -> &ActorError {
    &self.reason
  }
}
