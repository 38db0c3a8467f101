//! Dispatch executor backed by a Tokio runtime.

use arbor_actor_core_rs::{DispatchExecutor, Dispatcher};
use tokio::runtime::Handle;

/// Schedules drain turns onto a Tokio runtime's blocking pool.
///
/// Drain turns run user handlers to completion, so they go through
/// `spawn_blocking` rather than onto the async worker threads.
#[derive(Clone, Debug)]
pub struct TokioDispatchExecutor {
  handle: Handle,
}

impl TokioDispatchExecutor {
  /// Creates an executor over the provided runtime handle.
  #[must_use]
  pub const fn new(handle: Handle) -> Self {
    Self { handle }
  }

  /// Creates an executor over the runtime of the calling context.
  ///
  /// # Panics
  ///
  /// Panics when called outside a Tokio runtime.
  #[must_use]
  pub fn current() -> Self {
    Self::new(Handle::current())
  }

  /// Returns the underlying runtime handle.
  #[must_use]
  pub const fn handle(&self) -> &Handle {
    &self.handle
  }
}

impl DispatchExecutor for TokioDispatchExecutor {
  fn execute(&self, dispatcher: Dispatcher) {
    self.handle.spawn_blocking(move || dispatcher.drive());
  }
}
