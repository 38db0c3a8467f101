//! Process-wide mapping from identity paths to live processes.

use std::{
  fmt,
  sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
  },
};

use ahash::RandomState;
use hashbrown::{HashMap, hash_map::Entry};

use crate::{actor_cell::ActorCell, actor_future::ActorFutureShared, any_message::AnyMessage, sync::lock_unpoisoned};

/// Prefix distinguishing auto-generated identities from user names.
pub const AUTO_ID_PREFIX: char = '$';

/// A registered message destination.
#[derive(Clone)]
pub enum ProcessHandle {
  /// A full actor cell.
  Cell(Arc<ActorCell>),
  /// An ephemeral reply slot backing ask and stop futures.
  Reply(ActorFutureShared<AnyMessage>),
}

/// Error returned when registering an identity that is already taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConflict;

impl fmt::Display for RegistryConflict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("identity already registered")
  }
}

impl std::error::Error for RegistryConflict {}

/// Concurrent map of identity path to process handle.
///
/// The registry is the only process-wide mutable state of the runtime; every
/// cross-actor reference resolves through it, so removing an entry is what
/// makes an actor unreachable.
pub struct ProcessRegistry {
  entries: Mutex<HashMap<String, ProcessHandle, RandomState>>,
  next_id: AtomicU64,
}

impl ProcessRegistry {
  /// Creates an empty registry.
  #[must_use]
  pub fn new() -> Self {
    Self { entries: Mutex::new(HashMap::with_hasher(RandomState::new())), next_id: AtomicU64::new(0) }
  }

  /// Registers a handle under the provided path.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryConflict`] when the path is already taken.
  pub fn register(&self, path: &str, handle: ProcessHandle) -> Result<(), RegistryConflict> {
    match lock_unpoisoned(&self.entries).entry(path.to_owned()) {
      | Entry::Occupied(_) => Err(RegistryConflict),
      | Entry::Vacant(entry) => {
        entry.insert(handle);
        Ok(())
      },
    }
  }

  /// Resolves a path to the registered handle.
  #[must_use]
  pub fn find(&self, path: &str) -> Option<ProcessHandle> {
    lock_unpoisoned(&self.entries).get(path).cloned()
  }

  /// Removes the registration, returning the previous handle.
  pub fn unregister(&self, path: &str) -> Option<ProcessHandle> {
    lock_unpoisoned(&self.entries).remove(path)
  }

  /// Returns the next auto-generated identity (`$1`, `$2`, …).
  #[must_use]
  pub fn next_auto_id(&self) -> String {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{AUTO_ID_PREFIX}{id}")
  }

  /// Returns the number of live registrations.
  #[must_use]
  pub fn len(&self) -> usize {
    lock_unpoisoned(&self.entries).len()
  }

  /// Returns `true` when nothing is registered.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for ProcessRegistry {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::{ProcessHandle, ProcessRegistry};
  use crate::actor_future::ActorFutureShared;

  fn reply_handle() -> ProcessHandle {
    ProcessHandle::Reply(ActorFutureShared::new())
  }

  #[test]
  fn duplicate_registration_conflicts() {
    let registry = ProcessRegistry::new();
    registry.register("worker", reply_handle()).expect("first registration");
    assert!(registry.register("worker", reply_handle()).is_err());
  }

  #[test]
  fn unregister_frees_the_identity() {
    let registry = ProcessRegistry::new();
    registry.register("worker", reply_handle()).expect("register");
    assert!(registry.unregister("worker").is_some());
    registry.register("worker", reply_handle()).expect("identity reusable after unregister");
  }

  #[test]
  fn auto_ids_are_monotonic_and_prefixed() {
    let registry = ProcessRegistry::new();
    assert_eq!(registry.next_auto_id(), "$1");
    assert_eq!(registry.next_auto_id(), "$2");
  }
}
