//! Deadline adapters for ask and stop futures.

use std::{fmt, future::Future, time::Duration};

use arbor_actor_core_rs::{ActorFutureShared, AnyMessage, AskResponse};

/// The reply did not arrive within the deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AskTimeoutError;

impl fmt::Display for AskTimeoutError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("timed out waiting for a reply")
  }
}

impl std::error::Error for AskTimeoutError {}

/// Awaits a shared actor future with a deadline.
pub trait ListenTimeoutExt<T> {
  /// Resolves the future, failing after `timeout`.
  fn take_or_timeout(&self, timeout: Duration) -> impl Future<Output = Result<T, AskTimeoutError>> + Send;
}

impl<T: Send + 'static> ListenTimeoutExt<T> for ActorFutureShared<T> {
  fn take_or_timeout(&self, timeout: Duration) -> impl Future<Output = Result<T, AskTimeoutError>> + Send {
    let future = self.clone();
    async move {
      match tokio::time::timeout(timeout, future.listener()).await {
        | Ok(value) => Ok(value),
        | Err(_) => Err(AskTimeoutError),
      }
    }
  }
}

/// Awaits the reply of a request with a deadline.
pub trait AskResponseTimeoutExt {
  /// Resolves the reply envelope, failing after `timeout`.
  fn result_or_timeout(&self, timeout: Duration) -> impl Future<Output = Result<AnyMessage, AskTimeoutError>> + Send;
}

impl AskResponseTimeoutExt for AskResponse {
  fn result_or_timeout(&self, timeout: Duration) -> impl Future<Output = Result<AnyMessage, AskTimeoutError>> + Send {
    self.future().take_or_timeout(timeout)
  }
}
