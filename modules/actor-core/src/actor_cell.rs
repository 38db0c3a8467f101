//! Runtime control object executing one actor.

#[cfg(test)]
mod tests;

use std::{
  mem,
  panic::{AssertUnwindSafe, catch_unwind},
  sync::{Arc, Mutex, Weak},
};

use crate::{
  actor::Actor,
  actor_context::ActorContext,
  actor_error::ActorError,
  actor_ref::ActorRef,
  any_message::AnyMessage,
  behavior_stack::BehaviorStack,
  dispatcher::{Dispatcher, MessageInvoker},
  event_stream_event::EventStreamEvent,
  lifecycle,
  lifecycle_event::LifecycleEvent,
  lifecycle_stage::LifecycleStage,
  log_level::LogLevel,
  mailbox::Mailbox,
  pid::Pid,
  props::Props,
  receive::Receive,
  restart_statistics::RestartStatistics,
  stash_buffer::StashBuffer,
  supervisor_strategy::{SupervisorDirective, SupervisorStrategy, SupervisorStrategyKind},
  sync::lock_unpoisoned,
  system_message::{FailurePayload, SystemMessage},
  system_state::SystemState,
};

/// Progress of a cell through its teardown state machine.
///
/// The termination predicate only acts in `Restarting` and `Stopping`;
/// termination notices arriving while `Running` merely update bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CellPhase {
  Running,
  Restarting,
  Stopping,
  Stopped,
}

enum TeardownAction {
  Restart,
  Finalize,
}

struct CellState {
  phase:       CellPhase,
  behavior:    BehaviorStack,
  children:    Vec<Pid>,
  child_stats: Vec<(Pid, RestartStatistics)>,
  watchers:    Vec<Pid>,
  watching:    Vec<Pid>,
  stash:       StashBuffer,
}

/// Per-actor control object.
///
/// Owns the actor instance, the behavior stack, the middleware list, and the
/// supervision bookkeeping. The mailbox dispatcher is the only caller of the
/// invoke paths, so at most one dispatch runs at a time; all other methods
/// touch the cell only under its state lock.
pub struct ActorCell {
  pid:        Pid,
  parent:     Option<Pid>,
  system:     Arc<SystemState>,
  props:      Props,
  supervisor: SupervisorStrategy,
  middleware: Vec<Receive>,
  actor:      Mutex<Box<dyn Actor>>,
  dispatcher: Dispatcher,
  state:      Mutex<CellState>,
}

fn base_behavior() -> Receive {
  Receive::new(|actor: &mut dyn Actor, ctx: &mut ActorContext<'_>| actor.receive(ctx))
}

impl ActorCell {
  /// Creates a cell and wires it to a fresh mailbox and dispatcher.
  #[must_use]
  pub(crate) fn create(system: Arc<SystemState>, pid: Pid, parent: Option<Pid>, props: &Props) -> Arc<Self> {
    let mailbox = Arc::new(Mailbox::new(props.mailbox_policy()));
    let throughput = props.throughput().unwrap_or_else(|| system.config().throughput()).get();
    let dispatcher = Dispatcher::new(mailbox, system.executor(), throughput);
    let actor = props.produce();
    let state = CellState {
      phase:       CellPhase::Running,
      behavior:    BehaviorStack::new(base_behavior()),
      children:    Vec::new(),
      child_stats: Vec::new(),
      watchers:    Vec::new(),
      watching:    Vec::new(),
      stash:       StashBuffer::new(props.stash_capacity()),
    };

    let cell = Arc::new(Self {
      pid,
      parent,
      system,
      props: props.clone(),
      supervisor: *props.supervisor(),
      middleware: props.middleware().to_vec(),
      actor: Mutex::new(actor),
      dispatcher,
      state: Mutex::new(state),
    });

    let trait_cell: Arc<dyn MessageInvoker> = cell.clone();
    let invoker: Weak<dyn MessageInvoker> = Arc::downgrade(&trait_cell);
    cell.dispatcher.register_invoker(invoker);
    cell
  }

  /// Enqueues the creation notice; `Started` becomes the first dispatch.
  pub(crate) fn start(&self) {
    self.dispatcher.enqueue_system(SystemMessage::Create);
  }

  /// Returns the cell identity.
  #[must_use]
  pub const fn pid(&self) -> &Pid {
    &self.pid
  }

  /// Returns the parent identity, if any.
  #[must_use]
  pub const fn parent(&self) -> Option<&Pid> {
    self.parent.as_ref()
  }

  /// Returns an address handle for this cell.
  #[must_use]
  pub fn actor_ref(&self) -> ActorRef {
    ActorRef::new(self.pid.clone(), Arc::clone(&self.system))
  }

  /// Returns the currently supervised children.
  #[must_use]
  pub fn children(&self) -> Vec<Pid> {
    lock_unpoisoned(&self.state).children.clone()
  }

  /// Returns the mailbox owned by this cell.
  #[must_use]
  pub fn mailbox(&self) -> &Arc<Mailbox> {
    self.dispatcher.mailbox()
  }

  /// Returns the dispatcher driving this cell.
  #[must_use]
  pub(crate) fn dispatcher(&self) -> &Dispatcher {
    &self.dispatcher
  }

  pub(crate) fn middleware(&self) -> &[Receive] {
    &self.middleware
  }

  pub(crate) fn behavior_top(&self) -> Option<Receive> {
    lock_unpoisoned(&self.state).behavior.top()
  }

  pub(crate) fn become_replace(&self, behavior: Receive) {
    lock_unpoisoned(&self.state).behavior.replace(behavior);
  }

  pub(crate) fn become_stacked(&self, behavior: Receive) {
    lock_unpoisoned(&self.state).behavior.push(behavior);
  }

  pub(crate) fn unbecome_stacked(&self) -> Result<(), ActorError> {
    lock_unpoisoned(&self.state).behavior.pop()
  }

  pub(crate) fn stash_message(&self, message: AnyMessage) -> Result<(), ActorError> {
    lock_unpoisoned(&self.state).stash.push(message)
  }

  /// Records a freshly spawned child: supervised and watched by this cell.
  pub(crate) fn note_child_spawned(&self, child: Pid) {
    let mut state = lock_unpoisoned(&self.state);
    if !state.children.contains(&child) {
      state.children.push(child.clone());
    }
    if !state.watching.contains(&child) {
      state.watching.push(child);
    }
  }

  pub(crate) fn add_watcher(&self, watcher: Pid) {
    let mut state = lock_unpoisoned(&self.state);
    if !state.watchers.contains(&watcher) {
      state.watchers.push(watcher);
    }
  }

  pub(crate) fn add_watching(&self, target: Pid) {
    let mut state = lock_unpoisoned(&self.state);
    if !state.watching.contains(&target) {
      state.watching.push(target);
    }
  }

  pub(crate) fn remove_watching(&self, target: &Pid) {
    lock_unpoisoned(&self.state).watching.retain(|pid| pid != target);
  }

  /// Dispatches one user envelope through the middleware chain inside the
  /// fault boundary.
  pub(crate) fn invoke_user(&self, message: AnyMessage) {
    let (payload, sender) = message.into_parts();
    let result = {
      let mut guard = lock_unpoisoned(&self.actor);
      let mut ctx = ActorContext::new(Arc::clone(&self.system), self, Some(payload), sender);
      let actor: &mut dyn Actor = &mut **guard;
      match catch_unwind(AssertUnwindSafe(|| ctx.run_dispatch(actor))) {
        | Ok(outcome) => outcome,
        | Err(panic) => Err(ActorError::from_panic(panic.as_ref())),
      }
    };
    if let Err(reason) = result {
      self.report_failure(&reason);
    }
  }

  /// Processes one control message.
  pub(crate) fn invoke_system(&self, message: SystemMessage) {
    match message {
      | SystemMessage::Create => self.handle_create(),
      | SystemMessage::Stop => self.handle_stop(),
      | SystemMessage::Restart => self.handle_restart(),
      | SystemMessage::Suspend => self.mailbox().suspend(),
      | SystemMessage::Resume => self.mailbox().resume(),
      | SystemMessage::Watch(watcher) => self.handle_watch(watcher),
      | SystemMessage::Unwatch(watcher) => self.handle_unwatch(&watcher),
      | SystemMessage::Terminated(who) => self.handle_terminated(who),
      | SystemMessage::Failure(payload) => self.handle_failure(payload),
    }
  }

  fn handle_create(&self) {
    self.invoke_user(AnyMessage::new(lifecycle::Started));
    self.publish_lifecycle(LifecycleStage::Started);
  }

  fn handle_stop(&self) {
    {
      let mut state = lock_unpoisoned(&self.state);
      if state.phase == CellPhase::Stopped {
        return;
      }
      state.phase = CellPhase::Stopping;
    }
    self.publish_lifecycle(LifecycleStage::Stopping);
    self.invoke_user(AnyMessage::new(lifecycle::Stopping));
    self.stop_children();
    self.try_restart_or_terminate();
  }

  fn handle_restart(&self) {
    {
      let mut state = lock_unpoisoned(&self.state);
      if state.phase == CellPhase::Stopped {
        return;
      }
      state.phase = CellPhase::Restarting;
    }
    self.invoke_user(AnyMessage::new(lifecycle::Restarting));
    self.stop_children();
    self.try_restart_or_terminate();
  }

  fn handle_watch(&self, watcher: Pid) {
    let already_stopped = {
      let mut state = lock_unpoisoned(&self.state);
      if state.phase == CellPhase::Stopped {
        true
      } else {
        if !state.watchers.contains(&watcher) {
          state.watchers.push(watcher.clone());
        }
        false
      }
    };
    if already_stopped {
      let _ = self.system.send_system(&watcher, SystemMessage::Terminated(self.pid.clone()));
    }
  }

  fn handle_unwatch(&self, watcher: &Pid) {
    lock_unpoisoned(&self.state).watchers.retain(|pid| pid != watcher);
  }

  fn handle_terminated(&self, who: Pid) {
    let tracked = {
      let mut state = lock_unpoisoned(&self.state);
      let child_count = state.children.len();
      state.children.retain(|pid| *pid != who);
      state.child_stats.retain(|(pid, _)| *pid != who);
      let watch_count = state.watching.len();
      state.watching.retain(|pid| *pid != who);
      child_count != state.children.len() || watch_count != state.watching.len()
    };
    if !tracked {
      // A notice racing an unwatch, or a peer this cell never tracked.
      self.system.emit_log(
        LogLevel::Debug,
        format!("ignoring termination notice from untracked {who}"),
        Some(self.pid.clone()),
      );
      return;
    }
    self.invoke_user(AnyMessage::new(lifecycle::Terminated { who }));
    self.try_restart_or_terminate();
  }

  fn handle_failure(&self, payload: FailurePayload) {
    let now = self.system.monotonic_now();
    let directive = {
      let mut state = lock_unpoisoned(&self.state);
      let stats = find_or_insert_stats(&mut state.child_stats, payload.child());
      self.supervisor.handle_failure(stats, payload.reason(), now)
    };
    let affected = match self.supervisor.kind() {
      | SupervisorStrategyKind::OneForOne => vec![payload.child().clone()],
      | SupervisorStrategyKind::AllForOne => self.children(),
    };
    self.system.emit_log(
      LogLevel::Warn,
      format!("supervising {}: {} -> {:?}", payload.child(), payload.reason(), directive),
      Some(self.pid.clone()),
    );

    match directive {
      | SupervisorDirective::Resume => {
        for target in affected {
          let _ = self.system.send_system(&target, SystemMessage::Resume);
        }
      },
      | SupervisorDirective::Restart => {
        for target in affected {
          let _ = self.system.send_system(&target, SystemMessage::Restart);
        }
      },
      | SupervisorDirective::Stop => {
        self.clear_child_stats(&affected);
        for target in affected {
          let _ = self.system.send_system(&target, SystemMessage::Stop);
        }
      },
      | SupervisorDirective::Escalate => match &self.parent {
        | Some(parent) => {
          let _ = self.system.send_system(parent, SystemMessage::Failure(payload));
        },
        | None => root_escalation(&self.pid),
      },
    }
  }

  /// Fault boundary: log, suspend, and route the failure to the supervisor.
  pub(crate) fn report_failure(&self, reason: &ActorError) {
    self.system.emit_log(
      LogLevel::Error,
      format!("actor {} failed: {reason}", self.pid),
      Some(self.pid.clone()),
    );
    self.mailbox().suspend();
    match &self.parent {
      | Some(parent) => {
        let payload = FailurePayload::new(self.pid.clone(), reason.clone());
        let _ = self.system.send_system(parent, SystemMessage::Failure(payload));
      },
      | None => self.handle_root_failure(reason),
    }
  }

  /// Applies the default strategy to a failure of a root actor.
  fn handle_root_failure(&self, reason: &ActorError) {
    match SupervisorStrategy::default().decide(reason) {
      | SupervisorDirective::Resume => self.mailbox().resume(),
      | SupervisorDirective::Restart => self.dispatcher.enqueue_system(SystemMessage::Restart),
      | SupervisorDirective::Stop => self.dispatcher.enqueue_system(SystemMessage::Stop),
      | SupervisorDirective::Escalate => root_escalation(&self.pid),
    }
  }

  fn stop_children(&self) {
    for child in self.children() {
      let _ = self.system.send_system(&child, SystemMessage::Stop);
    }
  }

  /// Termination predicate: once the last child acknowledged, finish the
  /// pending restart or stop. Outside a teardown phase this does nothing.
  fn try_restart_or_terminate(&self) {
    let action = {
      let state = lock_unpoisoned(&self.state);
      if !state.children.is_empty() {
        None
      } else {
        match state.phase {
          | CellPhase::Restarting => Some(TeardownAction::Restart),
          | CellPhase::Stopping => Some(TeardownAction::Finalize),
          | CellPhase::Running | CellPhase::Stopped => None,
        }
      }
    };
    match action {
      | Some(TeardownAction::Restart) => self.restart_actor(),
      | Some(TeardownAction::Finalize) => self.finalize_stop(),
      | None => {},
    }
  }

  /// Produces a fresh instance and replays the stash. Identity, watchers,
  /// and stash survive; children and behaviors do not.
  fn restart_actor(&self) {
    {
      let mut actor = lock_unpoisoned(&self.actor);
      *actor = self.props.produce();
    }
    {
      let mut state = lock_unpoisoned(&self.state);
      state.phase = CellPhase::Running;
      state.behavior.reseed(base_behavior());
      state.child_stats.clear();
    }
    self.publish_lifecycle(LifecycleStage::Restarted);
    self.mailbox().resume();
    self.invoke_user(AnyMessage::new(lifecycle::Started));
    self.drain_stash();
  }

  fn drain_stash(&self) {
    loop {
      let next = lock_unpoisoned(&self.state).stash.pop();
      match next {
        | Some(message) => self.invoke_user(message),
        | None => break,
      }
    }
  }

  /// Unregisters, delivers `Stopped`, and reconciles both sides of every
  /// watch edge.
  fn finalize_stop(&self) {
    {
      let mut state = lock_unpoisoned(&self.state);
      if state.phase == CellPhase::Stopped {
        return;
      }
      state.phase = CellPhase::Stopped;
    }
    self.system.unregister(&self.pid);
    self.invoke_user(AnyMessage::new(lifecycle::Stopped));

    let watchers = {
      let mut state = lock_unpoisoned(&self.state);
      mem::take(&mut state.watchers)
    };
    for watcher in watchers {
      let _ = self.system.send_system(&watcher, SystemMessage::Terminated(self.pid.clone()));
    }

    let watching = {
      let mut state = lock_unpoisoned(&self.state);
      mem::take(&mut state.watching)
    };
    for target in watching {
      let _ = self.system.send_system(&target, SystemMessage::Unwatch(self.pid.clone()));
    }

    let discarded = {
      let mut state = lock_unpoisoned(&self.state);
      let discarded = state.stash.len();
      state.stash.clear();
      state.children.clear();
      state.child_stats.clear();
      discarded
    };
    if discarded > 0 {
      self.system.emit_log(
        LogLevel::Debug,
        format!("discarding {discarded} stashed messages"),
        Some(self.pid.clone()),
      );
    }
    self.publish_lifecycle(LifecycleStage::Stopped);
  }

  fn clear_child_stats(&self, children: &[Pid]) {
    if children.is_empty() {
      return;
    }
    lock_unpoisoned(&self.state).child_stats.retain(|(pid, _)| !children.contains(pid));
  }

  fn publish_lifecycle(&self, stage: LifecycleStage) {
    let event = LifecycleEvent::new(self.pid.clone(), self.parent.clone(), stage, self.system.monotonic_now());
    self.system.publish_event(&EventStreamEvent::Lifecycle(event));
  }

  #[cfg(test)]
  pub(crate) fn watchers_snapshot(&self) -> Vec<Pid> {
    lock_unpoisoned(&self.state).watchers.clone()
  }

  #[cfg(test)]
  pub(crate) fn watching_snapshot(&self) -> Vec<Pid> {
    lock_unpoisoned(&self.state).watching.clone()
  }
}

impl MessageInvoker for ActorCell {
  fn invoke_user_message(&self, message: AnyMessage) {
    self.invoke_user(message);
  }

  fn invoke_system_message(&self, message: SystemMessage) {
    self.invoke_system(message);
  }
}

/// Escalation above the hierarchy root is an unrecoverable programmer error.
fn root_escalation(pid: &Pid) -> ! {
  panic!("cannot escalate a failure past the root actor {pid}");
}

fn find_or_insert_stats<'a>(entries: &'a mut Vec<(Pid, RestartStatistics)>, pid: &Pid) -> &'a mut RestartStatistics {
  if let Some(index) = entries.iter().position(|(child, _)| child == pid) {
    return &mut entries[index].1;
  }
  entries.push((pid.clone(), RestartStatistics::new()));
  let last = entries.len() - 1;
  &mut entries[last].1
}
