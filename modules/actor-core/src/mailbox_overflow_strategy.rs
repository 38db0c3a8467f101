//! Behavior of a bounded mailbox at capacity.

/// What a bounded user queue does when an enqueue would exceed capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MailboxOverflowStrategy {
  /// Reject the incoming message; the sender receives a send error.
  DropNewest,
  /// Evict the oldest queued message to make room.
  DropOldest,
  /// Ignore the bound and enqueue anyway.
  Grow,
}
