//! User-facing handle over the runtime state.

use std::sync::Arc;

use crate::{
  actor_ref::ActorRef, actor_system_config::ActorSystemConfig, dispatch_executor::{DispatchExecutor, InlineDispatchExecutor},
  event_stream::EventStream, pid::Pid, props::Props, spawn_error::SpawnError, system_state::SystemState,
};

/// Entry point of the runtime: spawns root actors and exposes the registry
/// and event stream.
///
/// The handle is a cheap clone over shared state. There is no teardown —
/// runtime state lives for the process, matching the registry's contract.
#[derive(Clone)]
pub struct ActorSystem {
  state: Arc<SystemState>,
}

impl ActorSystem {
  /// Creates a system with default configuration and the inline executor.
  ///
  /// Inline dispatch runs handlers synchronously on the sending thread; use
  /// an executor from a runtime bindings crate for concurrent dispatch.
  #[must_use]
  pub fn new() -> Self {
    Self::with_executor(Arc::new(InlineDispatchExecutor))
  }

  /// Creates a system with default configuration and the given executor.
  #[must_use]
  pub fn with_executor(executor: Arc<dyn DispatchExecutor>) -> Self {
    Self::with_config(ActorSystemConfig::default(), executor)
  }

  /// Creates a system from configuration and executor.
  #[must_use]
  pub fn with_config(config: ActorSystemConfig, executor: Arc<dyn DispatchExecutor>) -> Self {
    Self { state: Arc::new(SystemState::new(config, executor)) }
  }

  pub(crate) fn from_state(state: Arc<SystemState>) -> Self {
    Self { state }
  }

  /// Spawns a root actor under an auto-generated identity.
  ///
  /// # Errors
  ///
  /// Propagates [`SpawnError`] from the registry.
  pub fn spawn(&self, props: &Props) -> Result<ActorRef, SpawnError> {
    self.state.spawn_at(None, props, None)
  }

  /// Spawns a root actor under the provided identity.
  ///
  /// # Errors
  ///
  /// Returns [`SpawnError::IdentityConflict`] when the identity is taken and
  /// [`SpawnError::InvalidName`] for malformed names.
  pub fn spawn_named(&self, props: &Props, name: &str) -> Result<ActorRef, SpawnError> {
    self.state.spawn_at(None, props, Some(name))
  }

  /// Resolves a registered identity path to an address handle.
  #[must_use]
  pub fn find(&self, path: &str) -> Option<ActorRef> {
    self
      .state
      .registry()
      .find(path)
      .map(|_| ActorRef::new(Pid::root(path), Arc::clone(&self.state)))
  }

  /// Returns an address handle for a pid without checking liveness.
  #[must_use]
  pub fn address(&self, pid: Pid) -> ActorRef {
    ActorRef::new(pid, Arc::clone(&self.state))
  }

  /// Returns the shared event stream.
  #[must_use]
  pub fn event_stream(&self) -> &Arc<EventStream> {
    self.state.event_stream()
  }

  /// Returns the runtime configuration.
  #[must_use]
  pub fn config(&self) -> &ActorSystemConfig {
    self.state.config()
  }

  /// Returns the shared runtime state (registry, executor, clock).
  #[must_use]
  pub fn state(&self) -> &Arc<SystemState> {
    &self.state
  }
}

impl Default for ActorSystem {
  fn default() -> Self {
    Self::new()
  }
}
