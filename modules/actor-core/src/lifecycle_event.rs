//! Lifecycle transition record published on the event stream.

use std::time::Duration;

use crate::{lifecycle_stage::LifecycleStage, pid::Pid};

/// One observed lifecycle transition.
#[derive(Clone, Debug)]
pub struct LifecycleEvent {
  pid:       Pid,
  parent:    Option<Pid>,
  stage:     LifecycleStage,
  timestamp: Duration,
}

impl LifecycleEvent {
  /// Creates a lifecycle record.
  #[must_use]
  pub const fn new(pid: Pid, parent: Option<Pid>, stage: LifecycleStage, timestamp: Duration) -> Self {
    Self { pid, parent, stage, timestamp }
  }

  /// Returns the transitioning actor.
  #[must_use]
  pub const fn pid(&self) -> &Pid {
    &self.pid
  }

  /// Returns the actor's parent, if any.
  #[must_use]
  pub const fn parent(&self) -> Option<&Pid> {
    self.parent.as_ref()
  }

  /// Returns the transition stage.
  #[must_use]
  pub const fn stage(&self) -> LifecycleStage {
    self.stage
  }

  /// Returns the monotonic offset from system start.
  #[must_use]
  pub const fn timestamp(&self) -> Duration {
    self.timestamp
  }
}
