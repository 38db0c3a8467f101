//! Errors returned synchronously from spawn operations.

use std::fmt;

/// Reason a spawn request was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpawnError {
  /// The composed identity is already registered.
  IdentityConflict(String),
  /// The requested local name is empty, contains the path separator, or
  /// starts with the auto-id prefix.
  InvalidName(String),
}

impl fmt::Display for SpawnError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::IdentityConflict(path) => write!(f, "identity already registered: {path}"),
      | Self::InvalidName(name) => write!(f, "invalid actor name: {name:?}"),
    }
  }
}

impl std::error::Error for SpawnError {}
