//! Per-dispatch API surface handed to handlers.

use std::sync::Arc;

use crate::{
  actor::Actor,
  actor_cell::ActorCell,
  actor_error::ActorError,
  actor_ref::ActorRef,
  any_message::{AnyMessage, MessagePayload},
  any_message_view::AnyMessageView,
  log_level::LogLevel,
  pid::Pid,
  props::Props,
  receive::Receive,
  send_error::SendError,
  spawn_error::SpawnError,
  system::ActorSystem,
  system_message::SystemMessage,
  system_state::SystemState,
};

/// Error code reported when the behavior stack was observed empty.
pub const NO_BEHAVIOR: &str = "no-behavior";

/// Error code reported when `stash` runs without a current message.
pub const STASH_WITHOUT_MESSAGE: &str = "stash-without-message";

/// Dispatch context: the current message, the chain position, and every
/// runtime operation available to a handler.
///
/// A context exists only for the duration of one dispatch. The current
/// message and sender are undefined outside of it; synchronous re-entry via
/// [`receive_message`](Self::receive_message) swaps the message and chain
/// position and restores them afterwards, leaving the sender untouched.
pub struct ActorContext<'a> {
  system:        ActorSystem,
  cell:          &'a ActorCell,
  payload:       Option<MessagePayload>,
  sender:        Option<ActorRef>,
  receive_index: usize,
}

impl<'a> ActorContext<'a> {
  pub(crate) fn new(
    state: Arc<SystemState>,
    cell: &'a ActorCell,
    payload: Option<MessagePayload>,
    sender: Option<ActorRef>,
  ) -> Self {
    Self { system: ActorSystem::from_state(state), cell, payload, sender, receive_index: 0 }
  }

  /// Returns the actor system running this actor.
  #[must_use]
  pub const fn system(&self) -> &ActorSystem {
    &self.system
  }

  /// Returns the identity of the running actor.
  #[must_use]
  pub const fn pid(&self) -> &Pid {
    self.cell.pid()
  }

  /// Returns the identity of the parent, if any.
  #[must_use]
  pub const fn parent(&self) -> Option<&Pid> {
    self.cell.parent()
  }

  /// Returns an address handle for the running actor.
  #[must_use]
  pub fn self_ref(&self) -> ActorRef {
    self.cell.actor_ref()
  }

  /// Returns a view over the message being dispatched.
  #[must_use]
  pub fn message(&self) -> Option<AnyMessageView<'_>> {
    self.payload.as_deref().map(|payload| AnyMessageView::new(payload, self.sender.as_ref()))
  }

  /// Returns the sender of the current message, if one was attached.
  #[must_use]
  pub const fn sender(&self) -> Option<&ActorRef> {
    self.sender.as_ref()
  }

  /// Returns the identities of the currently supervised children.
  #[must_use]
  pub fn children(&self) -> Vec<Pid> {
    self.cell.children()
  }

  /// Spawns an anonymous child.
  ///
  /// # Errors
  ///
  /// Propagates [`SpawnError`] from the registry.
  pub fn spawn(&self, props: &Props) -> Result<ActorRef, SpawnError> {
    self.system.state().spawn_at(Some(self.cell.pid()), props, None)
  }

  /// Spawns a named child; the full identity is `self-path/name`.
  ///
  /// # Errors
  ///
  /// Returns [`SpawnError::IdentityConflict`] when the identity is taken and
  /// [`SpawnError::InvalidName`] for malformed names.
  pub fn spawn_named(&self, props: &Props, name: &str) -> Result<ActorRef, SpawnError> {
    self.system.state().spawn_at(Some(self.cell.pid()), props, Some(name))
  }

  /// Subscribes to the termination of the target actor.
  ///
  /// Watching a dead target yields an immediate notification; watching
  /// oneself is a no-op.
  pub fn watch(&self, target: &Pid) {
    if target == self.cell.pid() {
      return;
    }
    self.cell.add_watching(target.clone());
    if !self.system.state().send_system(target, SystemMessage::Watch(self.cell.pid().clone())) {
      // Target is already gone; queue the notice to ourselves. The watching
      // entry stays so the notice is recognized as tracked when it arrives.
      let _ = self
        .system
        .state()
        .send_system(self.cell.pid(), SystemMessage::Terminated(target.clone()));
    }
  }

  /// Cancels a subscription; suppresses the notification if the target has
  /// not terminated yet.
  pub fn unwatch(&self, target: &Pid) {
    self.cell.remove_watching(target);
    let _ = self.system.state().send_system(target, SystemMessage::Unwatch(self.cell.pid().clone()));
  }

  /// Clears the behavior stack and installs the provided behavior.
  pub fn become_handler(&self, behavior: Receive) {
    self.cell.become_replace(behavior);
  }

  /// Pushes a behavior on top of the current one.
  pub fn become_stacked(&self, behavior: Receive) {
    self.cell.become_stacked(behavior);
  }

  /// Pops the top behavior.
  ///
  /// # Errors
  ///
  /// Fails with [`UNBECOME_BASE`](crate::actor_error::UNBECOME_BASE) when
  /// only the base behavior remains.
  pub fn unbecome_stacked(&self) -> Result<(), ActorError> {
    self.cell.unbecome_stacked()
  }

  /// Advances the dispatch chain: the next middleware, or the behavior top
  /// once the middleware list is exhausted.
  ///
  /// Middleware not calling `next` short-circuits the dispatch.
  ///
  /// # Errors
  ///
  /// Propagates the invoked handler's failure.
  pub fn next(&mut self, actor: &mut dyn Actor) -> Result<(), ActorError> {
    let handler = if self.receive_index < self.cell.middleware().len() {
      let handler = self.cell.middleware()[self.receive_index].clone();
      self.receive_index += 1;
      handler
    } else {
      match self.cell.behavior_top() {
        | Some(handler) => handler,
        | None => return Err(ActorError::fatal(NO_BEHAVIOR)),
      }
    };
    handler.invoke(actor, self)
  }

  /// Synchronously dispatches `message` through the full chain, then
  /// restores the current message and chain position. The sender and the
  /// stash are not affected.
  ///
  /// # Errors
  ///
  /// Propagates the nested dispatch's failure.
  pub fn receive_message(&mut self, actor: &mut dyn Actor, message: AnyMessage) -> Result<(), ActorError> {
    let (payload, _sender) = message.into_parts();
    let saved_index = self.receive_index;
    let saved_payload = self.payload.take();
    self.payload = Some(payload);
    self.receive_index = 0;
    let result = self.next(actor);
    self.receive_index = saved_index;
    self.payload = saved_payload;
    result
  }

  /// Saves the current message for later replay; the stash survives
  /// restarts and drains FIFO after the post-restart `Started`.
  ///
  /// # Errors
  ///
  /// Fails when no message is being dispatched or the stash is at capacity.
  pub fn stash(&self) -> Result<(), ActorError> {
    let payload = match &self.payload {
      | Some(payload) => Arc::clone(payload),
      | None => return Err(ActorError::recoverable(STASH_WITHOUT_MESSAGE)),
    };
    self.cell.stash_message(AnyMessage::from_parts(payload, self.sender.clone()))
  }

  /// Replies to the sender of the current message.
  ///
  /// # Errors
  ///
  /// Returns [`SendError::NoRecipient`] when the message carried no sender,
  /// or the sender's mailbox rejection.
  pub fn respond(&self, message: AnyMessage) -> Result<(), SendError> {
    match &self.sender {
      | Some(sender) => sender.tell(message.with_sender(self.self_ref())),
      | None => Err(SendError::NoRecipient(message)),
    }
  }

  /// Requests a graceful stop of the running actor.
  pub fn stop_self(&self) {
    let _ = self.system.state().send_system(self.cell.pid(), SystemMessage::Stop);
  }

  /// Emits a log record attributed to the running actor.
  pub fn log(&self, level: LogLevel, message: impl Into<String>) {
    self.system.state().emit_log(level, message.into(), Some(self.cell.pid().clone()));
  }

  /// Runs one full dispatch from the start of the middleware chain.
  pub(crate) fn run_dispatch(&mut self, actor: &mut dyn Actor) -> Result<(), ActorError> {
    self.receive_index = 0;
    self.next(actor)
  }
}
