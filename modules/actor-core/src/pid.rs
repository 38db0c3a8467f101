//! Process identity derived from the actor's registration path.

use std::{fmt, sync::Arc};

/// Identifies an actor by its full registration path.
///
/// Paths compose hierarchically: a child spawned as `worker` under the actor
/// registered at `pool` has the path `pool/worker`. Root actors use their
/// local name alone. Equality and hashing are by path, so a `Pid` remains a
/// stable lookup key across restarts of the same incarnation slot.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pid {
  path: Arc<str>,
}

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

impl Pid {
  /// Creates a root identity from a local name.
  #[must_use]
  pub fn root(name: &str) -> Self {
    Self { path: Arc::from(name) }
  }

  /// Derives the identity of a child with the provided local name.
  #[must_use]
  pub fn child(&self, name: &str) -> Self {
    let mut path = String::with_capacity(self.path.len() + 1 + name.len());
    path.push_str(&self.path);
    path.push(PATH_SEPARATOR);
    path.push_str(name);
    Self { path: Arc::from(path.as_str()) }
  }

  /// Returns the full registration path.
  #[must_use]
  pub fn path(&self) -> &str {
    &self.path
  }

  /// Returns the last path segment.
  #[must_use]
  pub fn local_name(&self) -> &str {
    match self.path.rfind(PATH_SEPARATOR) {
      | Some(index) => &self.path[index + 1..],
      | None => &self.path,
    }
  }

  /// Returns the identity of the parent scope, if any.
  #[must_use]
  pub fn parent(&self) -> Option<Self> {
    self.path.rfind(PATH_SEPARATOR).map(|index| Self { path: Arc::from(&self.path[..index]) })
  }
}

impl fmt::Display for Pid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path)
  }
}

impl fmt::Debug for Pid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Pid({})", self.path)
  }
}
