//! Failure classification carried through the supervision chain.

use std::{borrow::Cow, fmt};

/// Error code reported when popping the base behavior.
pub const UNBECOME_BASE: &str = "unbecome-base";

/// Error code reported when a handler panicked.
pub const HANDLER_PANIC: &str = "handler-panic";

/// Failure reason produced by actor handlers.
///
/// Recoverable failures are candidates for a restart; fatal failures default
/// to stopping the actor. The code is a short stable identifier; the optional
/// detail carries free-form context for logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActorError {
  /// The actor may be restarted by its supervisor.
  Recoverable {
    /// Stable identifier of the failure.
    code:   Cow<'static, str>,
    /// Optional human readable context.
    detail: Option<String>,
  },
  /// The actor should be stopped; restarting is not expected to help.
  Fatal {
    /// Stable identifier of the failure.
    code:   Cow<'static, str>,
    /// Optional human readable context.
    detail: Option<String>,
  },
}

impl ActorError {
  /// Creates a recoverable error from a code.
  #[must_use]
  pub fn recoverable(code: impl Into<Cow<'static, str>>) -> Self {
    Self::Recoverable { code: code.into(), detail: None }
  }

  /// Creates a recoverable error with additional detail.
  #[must_use]
  pub fn recoverable_with_detail(code: impl Into<Cow<'static, str>>, detail: impl Into<String>) -> Self {
    Self::Recoverable { code: code.into(), detail: Some(detail.into()) }
  }

  /// Creates a fatal error from a code.
  #[must_use]
  pub fn fatal(code: impl Into<Cow<'static, str>>) -> Self {
    Self::Fatal { code: code.into(), detail: None }
  }

  /// Creates a fatal error with additional detail.
  #[must_use]
  pub fn fatal_with_detail(code: impl Into<Cow<'static, str>>, detail: impl Into<String>) -> Self {
    Self::Fatal { code: code.into(), detail: Some(detail.into()) }
  }

  /// Converts a caught panic payload into a fatal error.
  #[must_use]
  pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
    let detail = payload
      .downcast_ref::<&'static str>()
      .map(|message| (*message).to_string())
      .or_else(|| payload.downcast_ref::<String>().cloned());
    match detail {
      | Some(detail) => Self::fatal_with_detail(HANDLER_PANIC, detail),
      | None => Self::fatal(HANDLER_PANIC),
    }
  }

  /// Returns `true` when the error is recoverable.
  #[must_use]
  pub const fn is_recoverable(&self) -> bool {
    matches!(self, Self::Recoverable { .. })
  }

  /// Returns `true` when the error is fatal.
  #[must_use]
  pub const fn is_fatal(&self) -> bool {
    matches!(self, Self::Fatal { .. })
  }

  /// Returns the failure code.
  #[must_use]
  pub fn code(&self) -> &str {
    match self {
      | Self::Recoverable { code, .. } | Self::Fatal { code, .. } => code.as_ref(),
    }
  }

  /// Returns the optional detail text.
  #[must_use]
  pub fn detail(&self) -> Option<&str> {
    match self {
      | Self::Recoverable { detail, .. } | Self::Fatal { detail, .. } => detail.as_deref(),
    }
  }
}

impl fmt::Display for ActorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (kind, code, detail) = match self {
      | Self::Recoverable { code, detail } => ("recoverable", code, detail),
      | Self::Fatal { code, detail } => ("fatal", code, detail),
    };
    match detail {
      | Some(detail) => write!(f, "{kind} failure: {code} ({detail})"),
      | None => write!(f, "{kind} failure: {code}"),
    }
  }
}

impl std::error::Error for ActorError {}

#[cfg(test)]
mod tests {
  use super::ActorError;

  #[test]
  fn panic_payload_strings_become_detail() {
    let error = ActorError::from_panic(&"boom");
    assert!(error.is_fatal());
    assert_eq!(error.detail(), Some("boom"));
  }

  #[test]
  fn display_includes_code_and_detail() {
    let error = ActorError::recoverable_with_detail("db-timeout", "replica lag");
    assert_eq!(error.to_string(), "recoverable failure: db-timeout (replica lag)");
  }
}
