//! Dual-queue mailbox with system priority and suspension.

use std::{
  collections::VecDeque,
  sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
  },
};

use crate::{
  any_message::AnyMessage, mailbox_capacity::MailboxCapacity, mailbox_overflow_strategy::MailboxOverflowStrategy,
  mailbox_policy::MailboxPolicy, send_error::SendError, sync::lock_unpoisoned, system_message::SystemMessage,
};

/// Message handed to the dispatcher by [`Mailbox::dequeue`].
#[derive(Debug)]
pub enum MailboxMessage {
  /// Control message, drained ahead of user traffic.
  System(SystemMessage),
  /// User envelope.
  User(AnyMessage),
}

/// Private queue pair of one cell.
///
/// System messages always enqueue and always dequeue first. User messages
/// respect the capacity policy on enqueue and the suspension flag on dequeue:
/// a suspended mailbox keeps accepting user messages but stops handing them
/// out until resumed.
pub struct Mailbox {
  policy:    MailboxPolicy,
  system:    Mutex<VecDeque<SystemMessage>>,
  user:      Mutex<VecDeque<AnyMessage>>,
  suspended: AtomicBool,
}

impl Mailbox {
  /// Creates a mailbox with the provided policy.
  #[must_use]
  pub fn new(policy: MailboxPolicy) -> Self {
    Self {
      policy,
      system: Mutex::new(VecDeque::new()),
      user: Mutex::new(VecDeque::new()),
      suspended: AtomicBool::new(false),
    }
  }

  /// Appends a control message.
  pub fn enqueue_system(&self, message: SystemMessage) {
    lock_unpoisoned(&self.system).push_back(message);
  }

  /// Appends a user envelope, applying the capacity policy.
  ///
  /// # Errors
  ///
  /// Returns [`SendError::Full`] when the queue is at capacity and the
  /// overflow strategy rejects new messages.
  pub fn enqueue_user(&self, message: AnyMessage) -> Result<(), SendError> {
    let mut queue = lock_unpoisoned(&self.user);
    if let MailboxCapacity::Bounded(capacity) = self.policy.capacity() {
      if queue.len() >= capacity.get() {
        match self.policy.overflow() {
          | MailboxOverflowStrategy::DropNewest => return Err(SendError::Full(message)),
          | MailboxOverflowStrategy::DropOldest => {
            queue.pop_front();
          },
          | MailboxOverflowStrategy::Grow => {},
        }
      }
    }
    queue.push_back(message);
    Ok(())
  }

  /// Removes the next ready message, preferring the system queue.
  ///
  /// Returns `None` when the system queue is empty and the user queue is
  /// either empty or suspended.
  #[must_use]
  pub fn dequeue(&self) -> Option<MailboxMessage> {
    if let Some(message) = lock_unpoisoned(&self.system).pop_front() {
      return Some(MailboxMessage::System(message));
    }
    if self.is_suspended() {
      return None;
    }
    lock_unpoisoned(&self.user).pop_front().map(MailboxMessage::User)
  }

  /// Pauses user message delivery.
  pub fn suspend(&self) {
    self.suspended.store(true, Ordering::Release);
  }

  /// Re-enables user message delivery.
  pub fn resume(&self) {
    self.suspended.store(false, Ordering::Release);
  }

  /// Returns `true` while user delivery is paused.
  #[must_use]
  pub fn is_suspended(&self) -> bool {
    self.suspended.load(Ordering::Acquire)
  }

  /// Returns the number of queued user envelopes.
  #[must_use]
  pub fn user_len(&self) -> usize {
    lock_unpoisoned(&self.user).len()
  }

  /// Returns the number of queued control messages.
  #[must_use]
  pub fn system_len(&self) -> usize {
    lock_unpoisoned(&self.system).len()
  }

  /// Returns `true` when a message is ready for dispatch.
  #[must_use]
  pub fn has_pending_work(&self) -> bool {
    self.system_len() > 0 || (!self.is_suspended() && self.user_len() > 0)
  }
}
