//! Immutable actor construction recipe.

use std::{fmt, num::NonZeroUsize, sync::Arc};

use crate::{
  actor::Actor, mailbox_policy::MailboxPolicy, receive::Receive, supervisor_strategy::SupervisorStrategy,
};

/// Factory producing a fresh actor instance per incarnation.
pub type ActorFactory = Arc<dyn Fn() -> Box<dyn Actor> + Send + Sync>;

/// Describes how to construct and run an actor.
///
/// A `Props` value is immutable once built; spawn sites share it freely and
/// the cell keeps a copy so restarts can produce fresh instances. The
/// middleware list is fixed at construction and composed in order ahead of
/// the behavior stack on every dispatch.
#[derive(Clone)]
pub struct Props {
  factory:        ActorFactory,
  supervisor:     SupervisorStrategy,
  mailbox_policy: MailboxPolicy,
  middleware:     Vec<Receive>,
  throughput:     Option<NonZeroUsize>,
  stash_capacity: Option<NonZeroUsize>,
}

impl Props {
  /// Creates props from a factory closure.
  #[must_use]
  pub fn from_fn<A, F>(factory: F) -> Self
  where
    A: Actor,
    F: Fn() -> A + Send + Sync + 'static, {
    Self {
      factory:        Arc::new(move || Box::new(factory())),
      supervisor:     SupervisorStrategy::default(),
      mailbox_policy: MailboxPolicy::default(),
      middleware:     Vec::new(),
      throughput:     None,
      stash_capacity: None,
    }
  }

  /// Replaces the supervisor strategy applied to this actor's children.
  #[must_use]
  pub fn with_supervisor(mut self, supervisor: SupervisorStrategy) -> Self {
    self.supervisor = supervisor;
    self
  }

  /// Replaces the mailbox policy.
  #[must_use]
  pub fn with_mailbox_policy(mut self, policy: MailboxPolicy) -> Self {
    self.mailbox_policy = policy;
    self
  }

  /// Appends a receive middleware; middlewares run in registration order.
  #[must_use]
  pub fn with_middleware(mut self, middleware: Receive) -> Self {
    self.middleware.push(middleware);
    self
  }

  /// Overrides the messages processed per scheduling turn.
  #[must_use]
  pub fn with_throughput(mut self, throughput: NonZeroUsize) -> Self {
    self.throughput = Some(throughput);
    self
  }

  /// Bounds the stash; stashing past the bound fails the handler.
  #[must_use]
  pub fn with_stash_capacity(mut self, capacity: NonZeroUsize) -> Self {
    self.stash_capacity = Some(capacity);
    self
  }

  /// Produces a fresh actor instance.
  #[must_use]
  pub fn produce(&self) -> Box<dyn Actor> {
    (self.factory)()
  }

  /// Returns the supervisor strategy.
  #[must_use]
  pub const fn supervisor(&self) -> &SupervisorStrategy {
    &self.supervisor
  }

  /// Returns the mailbox policy.
  #[must_use]
  pub const fn mailbox_policy(&self) -> MailboxPolicy {
    self.mailbox_policy
  }

  /// Returns the middleware list.
  #[must_use]
  pub fn middleware(&self) -> &[Receive] {
    &self.middleware
  }

  /// Returns the per-turn throughput override.
  #[must_use]
  pub const fn throughput(&self) -> Option<NonZeroUsize> {
    self.throughput
  }

  /// Returns the stash capacity bound.
  #[must_use]
  pub const fn stash_capacity(&self) -> Option<NonZeroUsize> {
    self.stash_capacity
  }
}

impl fmt::Debug for Props {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Props")
      .field("supervisor", &self.supervisor)
      .field("mailbox_policy", &self.mailbox_policy)
      .field("middleware_len", &self.middleware.len())
      .field("throughput", &self.throughput)
      .finish()
  }
}
