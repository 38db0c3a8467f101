//! LIFO of receive handlers backing `become`/`unbecome`.

use crate::{actor_error::ActorError, actor_error::UNBECOME_BASE, receive::Receive};

/// Stack of behaviors; the top handler terminates the middleware chain.
///
/// The stack holds at least one entry between incarnation and stop. It is
/// reseeded with the base handler (delegating to `Actor::receive`) whenever a
/// fresh instance is produced.
pub(crate) struct BehaviorStack {
  entries: Vec<Receive>,
}

impl BehaviorStack {
  /// Creates a stack seeded with the base behavior.
  pub(crate) fn new(base: Receive) -> Self {
    Self { entries: vec![base] }
  }

  /// Returns a clone of the top handler.
  pub(crate) fn top(&self) -> Option<Receive> {
    self.entries.last().cloned()
  }

  /// Clears the stack and installs the provided behavior.
  pub(crate) fn replace(&mut self, behavior: Receive) {
    self.entries.clear();
    self.entries.push(behavior);
  }

  /// Pushes a behavior on top of the current one.
  pub(crate) fn push(&mut self, behavior: Receive) {
    self.entries.push(behavior);
  }

  /// Pops the top behavior, refusing to remove the base entry.
  pub(crate) fn pop(&mut self) -> Result<(), ActorError> {
    if self.entries.len() <= 1 {
      return Err(ActorError::recoverable(UNBECOME_BASE));
    }
    self.entries.pop();
    Ok(())
  }

  /// Drops every entry and reinstalls the base behavior.
  pub(crate) fn reseed(&mut self, base: Receive) {
    self.entries.clear();
    self.entries.push(base);
  }

  /// Returns the number of stacked behaviors.
  #[cfg(test)]
  pub(crate) fn depth(&self) -> usize {
    self.entries.len()
  }
}
