//! One-shot completion cell used by ask and stop futures.

use std::{
  sync::{Arc, Mutex},
  task::Waker,
};

use crate::{actor_future_listener::ActorFutureListener, sync::lock_unpoisoned};

struct FutureState<T> {
  value:     Option<T>,
  waker:     Option<Waker>,
  completed: bool,
}

/// Shared one-shot slot completed by the runtime and awaited by callers.
///
/// The first completion wins; later completions are discarded. The value can
/// be taken exactly once, either through [`try_take`](Self::try_take) or by
/// awaiting a [`listener`](Self::listener).
pub struct ActorFutureShared<T> {
  state: Arc<Mutex<FutureState<T>>>,
}

impl<T: Send + 'static> ActorFutureShared<T> {
  /// Creates an empty slot.
  #[must_use]
  pub fn new() -> Self {
    Self { state: Arc::new(Mutex::new(FutureState { value: None, waker: None, completed: false })) }
  }

  /// Completes the slot, waking a registered listener.
  ///
  /// Returns `false` when the slot was already completed.
  pub fn complete(&self, value: T) -> bool {
    let waker = {
      let mut state = lock_unpoisoned(&self.state);
      if state.completed {
        return false;
      }
      state.completed = true;
      state.value = Some(value);
      state.waker.take()
    };
    if let Some(waker) = waker {
      waker.wake();
    }
    true
  }

  /// Takes the value if the slot has completed.
  #[must_use]
  pub fn try_take(&self) -> Option<T> {
    lock_unpoisoned(&self.state).value.take()
  }

  /// Returns `true` once the slot has been completed.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    lock_unpoisoned(&self.state).completed
  }

  /// Registers the waker to notify on completion.
  pub(crate) fn register_waker(&self, waker: &Waker) {
    let mut state = lock_unpoisoned(&self.state);
    let replace = match &state.waker {
      | Some(existing) => !existing.will_wake(waker),
      | None => true,
    };
    if replace {
      state.waker = Some(waker.clone());
    }
  }

  /// Returns a future resolving with the completed value.
  #[must_use]
  pub fn listener(&self) -> ActorFutureListener<T> {
    ActorFutureListener::new(self.clone())
  }
}

impl<T> Clone for ActorFutureShared<T> {
  fn clone(&self) -> Self {
    Self { state: Arc::clone(&self.state) }
  }
}

impl<T: Send + 'static> Default for ActorFutureShared<T> {
  fn default() -> Self {
    Self::new()
  }
}
