//! Lifecycle notifications delivered to user handlers.
//!
//! These values arrive as ordinary user messages so handlers observe them
//! through the same middleware chain and behavior as application traffic.
//! `Started` is always the first message of an incarnation.

use crate::pid::Pid;

/// First message of every incarnation, delivered after spawn and after each
/// restart (before the stash is drained).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Started;

/// Delivered when a stop request is accepted, before children are stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stopping;

/// Delivered when a restart directive is accepted, before children are
/// stopped and the instance is recreated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Restarting;

/// Last message of a cell, delivered after the registry entry is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stopped;

/// Notification that a watched actor finalized its stop.
///
/// Exactly one notification is delivered per watch that was not cancelled
/// before the target terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminated {
  /// Identity of the terminated actor.
  pub who: Pid,
}
