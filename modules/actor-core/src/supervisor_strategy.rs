//! Supervision strategies mapping child failures to directives.

use std::time::Duration;

use crate::{actor_error::ActorError, restart_statistics::RestartStatistics};

/// Decision a supervisor takes for a failed child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupervisorDirective {
  /// Re-enable user message delivery for the failing child.
  Resume,
  /// Recreate the failing child's actor instance.
  Restart,
  /// Stop the failing child.
  Stop,
  /// Forward the failure to the supervisor's own parent.
  Escalate,
}

/// Scope of a directive relative to the failing child's siblings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupervisorStrategyKind {
  /// Only the failing child is affected.
  OneForOne,
  /// Every current child of the supervisor is affected.
  AllForOne,
}

/// Maps a failure reason to a directive.
pub type SupervisorDecider = fn(&ActorError) -> SupervisorDirective;

/// Default restart intensity: restarts tolerated inside the window.
pub const DEFAULT_MAX_RESTARTS: u32 = 10;

/// Default restart intensity window.
pub const DEFAULT_RESTART_WINDOW: Duration = Duration::from_secs(10);

/// Supervision policy attached to props.
///
/// The decider chooses the directive; restart decisions are additionally
/// bounded by the intensity limit — a child failing more than `max_restarts`
/// times inside `within` is stopped instead of restarted.
#[derive(Clone, Copy, Debug)]
pub struct SupervisorStrategy {
  kind:         SupervisorStrategyKind,
  max_restarts: u32,
  within:       Duration,
  decider:      SupervisorDecider,
}

impl SupervisorStrategy {
  /// Creates a strategy from its parts.
  #[must_use]
  pub const fn new(
    kind: SupervisorStrategyKind,
    max_restarts: u32,
    within: Duration,
    decider: SupervisorDecider,
  ) -> Self {
    Self { kind, max_restarts, within, decider }
  }

  /// Creates a one-for-one strategy with the default intensity limit.
  #[must_use]
  pub const fn one_for_one(decider: SupervisorDecider) -> Self {
    Self::new(SupervisorStrategyKind::OneForOne, DEFAULT_MAX_RESTARTS, DEFAULT_RESTART_WINDOW, decider)
  }

  /// Creates an all-for-one strategy with the default intensity limit.
  #[must_use]
  pub const fn all_for_one(decider: SupervisorDecider) -> Self {
    Self::new(SupervisorStrategyKind::AllForOne, DEFAULT_MAX_RESTARTS, DEFAULT_RESTART_WINDOW, decider)
  }

  /// Evaluates the decider for the provided failure.
  #[must_use]
  pub fn decide(&self, error: &ActorError) -> SupervisorDirective {
    (self.decider)(error)
  }

  /// Evaluates the directive for a failure at `now`, applying the restart
  /// intensity limit against the child's statistics.
  #[must_use]
  pub fn handle_failure(&self, stats: &mut RestartStatistics, error: &ActorError, now: Duration) -> SupervisorDirective {
    let directive = self.decide(error);
    if directive == SupervisorDirective::Restart {
      let failures = stats.record_failure(now, self.within);
      if failures > self.max_restarts as usize {
        return SupervisorDirective::Stop;
      }
    }
    directive
  }

  /// Returns the sibling scope of this strategy.
  #[must_use]
  pub const fn kind(&self) -> SupervisorStrategyKind {
    self.kind
  }

  /// Returns the restart intensity limit.
  #[must_use]
  pub const fn max_restarts(&self) -> u32 {
    self.max_restarts
  }

  /// Returns the restart intensity window.
  #[must_use]
  pub const fn within(&self) -> Duration {
    self.within
  }
}

impl Default for SupervisorStrategy {
  fn default() -> Self {
    Self::one_for_one(default_decider)
  }
}

/// Default decider: restart on recoverable failures, stop on fatal ones.
#[must_use]
pub fn default_decider(error: &ActorError) -> SupervisorDirective {
  match error {
    | ActorError::Recoverable { .. } => SupervisorDirective::Restart,
    | ActorError::Fatal { .. } => SupervisorDirective::Stop,
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::{SupervisorDirective, SupervisorStrategy, SupervisorStrategyKind};
  use crate::{actor_error::ActorError, restart_statistics::RestartStatistics};

  #[test]
  fn default_strategy_restarts_recoverable_failures() {
    let strategy = SupervisorStrategy::default();
    assert_eq!(strategy.decide(&ActorError::recoverable("x")), SupervisorDirective::Restart);
    assert_eq!(strategy.decide(&ActorError::fatal("x")), SupervisorDirective::Stop);
  }

  #[test]
  fn restart_intensity_degrades_to_stop() {
    let strategy = SupervisorStrategy::new(SupervisorStrategyKind::OneForOne, 2, Duration::from_secs(60), |_| {
      SupervisorDirective::Restart
    });
    let mut stats = RestartStatistics::new();
    let error = ActorError::recoverable("boom");
    assert_eq!(strategy.handle_failure(&mut stats, &error, Duration::from_secs(1)), SupervisorDirective::Restart);
    assert_eq!(strategy.handle_failure(&mut stats, &error, Duration::from_secs(2)), SupervisorDirective::Restart);
    assert_eq!(strategy.handle_failure(&mut stats, &error, Duration::from_secs(3)), SupervisorDirective::Stop);
  }
}
