//! Per-cell scheduling of mailbox drain turns.

use std::sync::{
  Arc, Mutex, Weak,
  atomic::{AtomicU8, Ordering},
};

use crate::{
  any_message::AnyMessage,
  dispatch_executor::DispatchExecutor,
  mailbox::{Mailbox, MailboxMessage},
  send_error::SendError,
  sync::lock_unpoisoned,
  system_message::SystemMessage,
};

/// Sink the dispatcher hands dequeued messages to.
///
/// Implemented by the actor cell. The dispatcher holds the invoker weakly so
/// a stopped cell can be reclaimed even while its dispatcher handle lives on
/// in address handles.
pub trait MessageInvoker: Send + Sync {
  /// Processes one user envelope.
  fn invoke_user_message(&self, message: AnyMessage);
  /// Processes one control message.
  fn invoke_system_message(&self, message: SystemMessage);
}

const STATE_IDLE: u8 = 0;
const STATE_RUNNING: u8 = 1;

struct DispatcherCore {
  mailbox:    Arc<Mailbox>,
  executor:   Arc<dyn DispatchExecutor>,
  invoker:    Mutex<Option<Weak<dyn MessageInvoker>>>,
  throughput: usize,
  state:      AtomicU8,
}

/// Drives one cell's mailbox: enqueue, schedule, drain.
///
/// The idle/running flag flips to running exactly once per wake-up, so no two
/// drain turns of the same cell ever overlap, regardless of the executor.
#[derive(Clone)]
pub struct Dispatcher {
  core: Arc<DispatcherCore>,
}

impl Dispatcher {
  /// Creates a dispatcher over the provided mailbox.
  #[must_use]
  pub fn new(mailbox: Arc<Mailbox>, executor: Arc<dyn DispatchExecutor>, throughput: usize) -> Self {
    Self {
      core: Arc::new(DispatcherCore {
        mailbox,
        executor,
        invoker: Mutex::new(None),
        throughput: throughput.max(1),
        state: AtomicU8::new(STATE_IDLE),
      }),
    }
  }

  /// Registers the message sink; called once while the cell is constructed.
  pub fn register_invoker(&self, invoker: Weak<dyn MessageInvoker>) {
    *lock_unpoisoned(&self.core.invoker) = Some(invoker);
  }

  /// Returns the mailbox driven by this dispatcher.
  #[must_use]
  pub fn mailbox(&self) -> &Arc<Mailbox> {
    &self.core.mailbox
  }

  /// Enqueues a user envelope and wakes the drain loop.
  ///
  /// # Errors
  ///
  /// Returns [`SendError::Full`] when the mailbox rejects the envelope.
  pub fn enqueue_user(&self, message: AnyMessage) -> Result<(), SendError> {
    self.core.mailbox.enqueue_user(message)?;
    self.schedule();
    Ok(())
  }

  /// Enqueues a control message and wakes the drain loop.
  pub fn enqueue_system(&self, message: SystemMessage) {
    self.core.mailbox.enqueue_system(message);
    self.schedule();
  }

  /// Hands the dispatcher to the executor if no turn is in flight.
  pub fn schedule(&self) {
    if self
      .core
      .state
      .compare_exchange(STATE_IDLE, STATE_RUNNING, Ordering::AcqRel, Ordering::Acquire)
      .is_ok()
    {
      self.core.executor.execute(self.clone());
    }
  }

  /// Drains the mailbox until it runs dry, in throughput-bounded batches.
  pub fn drive(&self) {
    loop {
      self.process_batch();
      self.core.state.store(STATE_IDLE, Ordering::Release);
      let resume = self.core.mailbox.has_pending_work()
        && self
          .core
          .state
          .compare_exchange(STATE_IDLE, STATE_RUNNING, Ordering::AcqRel, Ordering::Acquire)
          .is_ok();
      if !resume {
        break;
      }
    }
  }

  fn process_batch(&self) {
    let Some(invoker) = self.current_invoker() else {
      // The cell is gone; discard the backlog so the drain loop terminates.
      while self.core.mailbox.dequeue().is_some() {}
      return;
    };
    for _ in 0..self.core.throughput {
      match self.core.mailbox.dequeue() {
        | Some(MailboxMessage::System(message)) => invoker.invoke_system_message(message),
        | Some(MailboxMessage::User(message)) => invoker.invoke_user_message(message),
        | None => break,
      }
    }
  }

  fn current_invoker(&self) -> Option<Arc<dyn MessageInvoker>> {
    lock_unpoisoned(&self.core.invoker).as_ref().and_then(Weak::upgrade)
  }
}
