//! Future adapter over the shared completion slot.

use std::{
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};

use crate::actor_future::ActorFutureShared;

/// Awaits the completion of an [`ActorFutureShared`].
pub struct ActorFutureListener<T> {
  future: ActorFutureShared<T>,
}

impl<T: Send + 'static> ActorFutureListener<T> {
  /// Creates a listener over the given slot.
  #[must_use]
  pub fn new(future: ActorFutureShared<T>) -> Self {
    Self { future }
  }
}

impl<T: Send + 'static> Future for ActorFutureListener<T> {
  type Output = T;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    if let Some(value) = self.future.try_take() {
      return Poll::Ready(value);
    }
    self.future.register_waker(cx.waker());
    // Re-check: completion may have raced between the take and the register.
    match self.future.try_take() {
      | Some(value) => Poll::Ready(value),
      | None => Poll::Pending,
    }
  }
}

impl<T> Unpin for ActorFutureListener<T> {}
