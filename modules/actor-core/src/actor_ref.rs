//! Address handle for sending to an actor.

use std::{
  fmt,
  hash::{Hash, Hasher},
  sync::Arc,
};

use crate::{
  actor_future::ActorFutureShared, any_message::AnyMessage, ask_response::AskResponse, lifecycle,
  pid::Pid, send_error::SendError, system_message::SystemMessage, system_state::SystemState,
};

/// Shared, copyable capability to reach one actor.
///
/// The handle carries no liveness: every send resolves the pid through the
/// registry, and sends after finalize-stop become dead letters. Equality and
/// hashing are by pid.
pub struct ActorRef {
  pid:   Pid,
  state: Arc<SystemState>,
}

impl ActorRef {
  /// Creates a handle for the pid within the given runtime.
  #[must_use]
  pub(crate) fn new(pid: Pid, state: Arc<SystemState>) -> Self {
    Self { pid, state }
  }

  /// Returns the target identity.
  #[must_use]
  pub const fn pid(&self) -> &Pid {
    &self.pid
  }

  /// Returns the target's registration path.
  #[must_use]
  pub fn path(&self) -> &str {
    self.pid.path()
  }

  /// Enqueues a user message.
  ///
  /// # Errors
  ///
  /// Returns [`SendError::NoRecipient`] when the target is gone and
  /// [`SendError::Full`] when its mailbox rejects the envelope.
  pub fn tell(&self, message: AnyMessage) -> Result<(), SendError> {
    self.state.send_user(&self.pid, message)
  }

  /// Enqueues a user message carrying a reply-to sender.
  ///
  /// # Errors
  ///
  /// Propagates the same failures as [`tell`](Self::tell).
  pub fn request(&self, message: AnyMessage, reply_to: &ActorRef) -> Result<(), SendError> {
    self.tell(message.with_sender(reply_to.clone()))
  }

  /// Sends the message and returns a handle resolving the one-shot reply.
  ///
  /// The reply arrives through an ephemeral address; awaiting with a timeout
  /// is provided by the runtime bindings crate.
  ///
  /// # Errors
  ///
  /// Propagates the same failures as [`tell`](Self::tell); the ephemeral
  /// address is retired on failure.
  pub fn request_future(&self, message: AnyMessage) -> Result<AskResponse, SendError> {
    let (reply, future) = self.state.register_reply_process();
    match self.tell(message.with_sender(reply.clone())) {
      | Ok(()) => Ok(AskResponse::new(reply, future)),
      | Err(error) => {
        self.state.unregister(reply.pid());
        Err(error)
      },
    }
  }

  /// Requests a graceful stop.
  pub fn stop(&self) {
    let _ = self.state.send_system(&self.pid, SystemMessage::Stop);
  }

  /// Requests a stop and returns a future resolving with the
  /// [`Terminated`](lifecycle::Terminated) notice.
  #[must_use]
  pub fn stop_future(&self) -> ActorFutureShared<AnyMessage> {
    let future = self.watch_future();
    self.stop();
    future
  }

  /// Returns a future resolving when the target finalizes its stop.
  #[must_use]
  pub fn watch_future(&self) -> ActorFutureShared<AnyMessage> {
    let (reply, future) = self.state.register_reply_process();
    if !self.state.send_system(&self.pid, SystemMessage::Watch(reply.pid().clone())) {
      // Already gone; resolve immediately instead of waiting forever.
      let _ = future.complete(AnyMessage::new(lifecycle::Terminated { who: self.pid.clone() }));
      self.state.unregister(reply.pid());
    }
    future
  }

  /// Pauses user message delivery to the target.
  pub fn suspend(&self) {
    if let Some(cell) = self.state.cell(&self.pid) {
      cell.mailbox().suspend();
    }
  }

  /// Re-enables user message delivery to the target.
  pub fn resume(&self) {
    if let Some(cell) = self.state.cell(&self.pid) {
      cell.mailbox().resume();
    }
  }
}

impl Clone for ActorRef {
  fn clone(&self) -> Self {
    Self { pid: self.pid.clone(), state: Arc::clone(&self.state) }
  }
}

impl PartialEq for ActorRef {
  fn eq(&self, other: &Self) -> bool {
    self.pid == other.pid
  }
}

impl Eq for ActorRef {}

impl Hash for ActorRef {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.pid.hash(state);
  }
}

impl fmt::Debug for ActorRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ActorRef({})", self.pid)
  }
}

impl fmt::Display for ActorRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.pid, f)
  }
}
