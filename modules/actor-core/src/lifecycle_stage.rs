//! Stages reported through lifecycle events.

/// Transition of a cell observable on the event stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleStage {
  /// The cell delivered its first `Started`.
  Started,
  /// The cell entered its stop cycle.
  Stopping,
  /// A fresh instance was produced after a restart directive.
  Restarted,
  /// The cell finalized its stop and left the registry.
  Stopped,
}
