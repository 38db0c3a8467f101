//! Process-wide runtime state shared by every cell.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use crate::{
  actor_cell::ActorCell,
  actor_future::ActorFutureShared,
  actor_ref::ActorRef,
  actor_system_config::ActorSystemConfig,
  any_message::AnyMessage,
  dead_letter::DeadLetter,
  dispatch_executor::DispatchExecutor,
  event_stream::EventStream,
  event_stream_event::EventStreamEvent,
  lifecycle,
  log_event::LogEvent,
  log_level::LogLevel,
  pid::{PATH_SEPARATOR, Pid},
  process_registry::{AUTO_ID_PREFIX, ProcessHandle, ProcessRegistry},
  props::Props,
  send_error::SendError,
  spawn_error::SpawnError,
  system_message::SystemMessage,
};

/// Registry, event stream, executor, and clock shared across the runtime.
///
/// Cells hold this state strongly; address handles resolve through it on
/// every send, so a removed registry entry makes the target unreachable
/// without invalidating outstanding handles.
pub struct SystemState {
  registry:     ProcessRegistry,
  event_stream: Arc<EventStream>,
  executor:     Arc<dyn DispatchExecutor>,
  config:       ActorSystemConfig,
  start:        Instant,
}

impl SystemState {
  /// Creates runtime state with the provided configuration and executor.
  #[must_use]
  pub fn new(config: ActorSystemConfig, executor: Arc<dyn DispatchExecutor>) -> Self {
    Self {
      registry: ProcessRegistry::new(),
      event_stream: Arc::new(EventStream::new()),
      executor,
      config,
      start: Instant::now(),
    }
  }

  /// Returns the runtime configuration.
  #[must_use]
  pub const fn config(&self) -> &ActorSystemConfig {
    &self.config
  }

  /// Returns the shared event stream.
  #[must_use]
  pub const fn event_stream(&self) -> &Arc<EventStream> {
    &self.event_stream
  }

  /// Returns the dispatch executor cells schedule onto.
  #[must_use]
  pub fn executor(&self) -> Arc<dyn DispatchExecutor> {
    Arc::clone(&self.executor)
  }

  /// Returns the registry of live processes.
  #[must_use]
  pub const fn registry(&self) -> &ProcessRegistry {
    &self.registry
  }

  /// Returns the monotonic offset since system start.
  #[must_use]
  pub fn monotonic_now(&self) -> Duration {
    self.start.elapsed()
  }

  /// Publishes an event to every stream subscriber.
  pub fn publish_event(&self, event: &EventStreamEvent) {
    self.event_stream.publish(event);
  }

  /// Emits a log record on the event stream.
  pub fn emit_log(&self, level: LogLevel, message: String, pid: Option<Pid>) {
    let event = LogEvent::new(level, message, pid, self.monotonic_now());
    self.publish_event(&EventStreamEvent::Log(event));
  }

  /// Resolves a pid to its live cell.
  #[must_use]
  pub fn cell(&self, pid: &Pid) -> Option<Arc<ActorCell>> {
    match self.registry.find(pid.path()) {
      | Some(ProcessHandle::Cell(cell)) => Some(cell),
      | Some(ProcessHandle::Reply(_)) | None => None,
    }
  }

  /// Spawns a cell under the optional parent scope.
  ///
  /// # Errors
  ///
  /// Returns [`SpawnError::InvalidName`] for malformed names and
  /// [`SpawnError::IdentityConflict`] when the composed path is taken.
  pub fn spawn_at(
    self: &Arc<Self>,
    parent: Option<&Pid>,
    props: &Props,
    name: Option<&str>,
  ) -> Result<ActorRef, SpawnError> {
    let local = match name {
      | Some(requested) => {
        validate_name(requested)?;
        requested.to_owned()
      },
      | None => self.registry.next_auto_id(),
    };
    let pid = match parent {
      | Some(parent_pid) => parent_pid.child(&local),
      | None => Pid::root(&local),
    };

    let cell = ActorCell::create(Arc::clone(self), pid.clone(), parent.cloned(), props);
    self
      .registry
      .register(pid.path(), ProcessHandle::Cell(Arc::clone(&cell)))
      .map_err(|_| SpawnError::IdentityConflict(pid.path().to_owned()))?;

    if let Some(parent_pid) = parent {
      if let Some(parent_cell) = self.cell(parent_pid) {
        parent_cell.note_child_spawned(pid.clone());
        cell.add_watcher(parent_pid.clone());
      }
    }

    cell.start();
    Ok(ActorRef::new(pid, Arc::clone(self)))
  }

  /// Removes the process registered under the pid.
  pub fn unregister(&self, pid: &Pid) {
    let _ = self.registry.unregister(pid.path());
  }

  /// Delivers a user envelope to the process registered under the pid.
  ///
  /// # Errors
  ///
  /// Returns [`SendError::NoRecipient`] (after publishing a dead letter)
  /// when nothing is registered, or [`SendError::Full`] from the mailbox.
  pub fn send_user(&self, pid: &Pid, message: AnyMessage) -> Result<(), SendError> {
    match self.registry.find(pid.path()) {
      | Some(ProcessHandle::Cell(cell)) => cell.dispatcher().enqueue_user(message),
      | Some(ProcessHandle::Reply(future)) => {
        let _ = future.complete(message);
        let _ = self.registry.unregister(pid.path());
        Ok(())
      },
      | None => {
        let dead_letter = DeadLetter::new(message.clone(), pid.clone(), self.monotonic_now());
        self.publish_event(&EventStreamEvent::DeadLetter(dead_letter));
        Err(SendError::NoRecipient(message))
      },
    }
  }

  /// Delivers a control message; returns `false` when the pid is dead.
  pub fn send_system(&self, pid: &Pid, message: SystemMessage) -> bool {
    match self.registry.find(pid.path()) {
      | Some(ProcessHandle::Cell(cell)) => {
        cell.dispatcher().enqueue_system(message);
        true
      },
      | Some(ProcessHandle::Reply(future)) => {
        if let SystemMessage::Terminated(who) = message {
          let _ = future.complete(AnyMessage::new(lifecycle::Terminated { who }));
          let _ = self.registry.unregister(pid.path());
        }
        true
      },
      | None => false,
    }
  }

  /// Registers an ephemeral reply slot and returns its address and future.
  pub fn register_reply_process(self: &Arc<Self>) -> (ActorRef, ActorFutureShared<AnyMessage>) {
    let future: ActorFutureShared<AnyMessage> = ActorFutureShared::new();
    loop {
      let pid = Pid::root(&self.registry.next_auto_id());
      if self.registry.register(pid.path(), ProcessHandle::Reply(future.clone())).is_ok() {
        return (ActorRef::new(pid, Arc::clone(self)), future);
      }
    }
  }
}

fn validate_name(name: &str) -> Result<(), SpawnError> {
  if name.is_empty() || name.contains(PATH_SEPARATOR) || name.starts_with(AUTO_ID_PREFIX) {
    return Err(SpawnError::InvalidName(name.to_owned()));
  }
  Ok(())
}
