//! Capacity configuration for the user message queue.

use std::num::NonZeroUsize;

/// Bound on the number of queued user messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MailboxCapacity {
  /// The queue grows without limit.
  Unbounded,
  /// The queue holds at most this many user messages.
  Bounded(NonZeroUsize),
}
