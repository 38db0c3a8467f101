//! Combined mailbox configuration.

use std::num::NonZeroUsize;

use crate::{mailbox_capacity::MailboxCapacity, mailbox_overflow_strategy::MailboxOverflowStrategy};

/// Capacity and overflow configuration applied to a cell's user queue.
///
/// System messages are never bounded; control traffic must not be droppable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MailboxPolicy {
  capacity: MailboxCapacity,
  overflow: MailboxOverflowStrategy,
}

impl MailboxPolicy {
  /// Creates a policy from its parts.
  #[must_use]
  pub const fn new(capacity: MailboxCapacity, overflow: MailboxOverflowStrategy) -> Self {
    Self { capacity, overflow }
  }

  /// Creates an unbounded policy.
  #[must_use]
  pub const fn unbounded() -> Self {
    Self::new(MailboxCapacity::Unbounded, MailboxOverflowStrategy::Grow)
  }

  /// Creates a bounded policy with the provided overflow strategy.
  #[must_use]
  pub const fn bounded(capacity: NonZeroUsize, overflow: MailboxOverflowStrategy) -> Self {
    Self::new(MailboxCapacity::Bounded(capacity), overflow)
  }

  /// Returns the capacity bound.
  #[must_use]
  pub const fn capacity(&self) -> MailboxCapacity {
    self.capacity
  }

  /// Returns the overflow strategy.
  #[must_use]
  pub const fn overflow(&self) -> MailboxOverflowStrategy {
    self.overflow
  }
}

impl Default for MailboxPolicy {
  fn default() -> Self {
    Self::unbounded()
  }
}
