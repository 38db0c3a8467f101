//! Small synchronization helpers.

use std::sync::{Mutex, MutexGuard};

/// Acquires a mutex, recovering the guard if a panicking handler poisoned it.
///
/// Cell state is re-validated by the restart path, so a poisoned lock carries
/// no information the supervisor does not already have.
pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  match mutex.lock() {
    | Ok(guard) => guard,
    | Err(poisoned) => poisoned.into_inner(),
  }
}
