//! Supervision directives: restart, resume, stop, escalate, intensity.

use std::{
  sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use arbor_actor_core_rs::{
  Actor, ActorContext, ActorError, ActorRef, ActorSystem, AnyMessage, Props, Restarting, Started,
  SupervisorDirective, SupervisorStrategy, SupervisorStrategyKind,
};

type Log = Arc<Mutex<Vec<String>>>;

struct Fail;
struct Ping;

struct Flaky {
  log:   Log,
  value: u32,
}

impl Actor for Flaky {
  fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    let Some(view) = ctx.message() else { return Ok(()) };
    if view.is::<Started>() {
      self.log.lock().expect("log").push("started".to_string());
    } else if view.is::<Restarting>() {
      self.log.lock().expect("log").push("restarting".to_string());
    } else if view.is::<Fail>() {
      self.log.lock().expect("log").push("fail".to_string());
      return Err(ActorError::recoverable("induced failure"));
    } else if view.is::<Ping>() {
      self.value += 1;
      self.log.lock().expect("log").push(format!("ping:{}", self.value));
    }
    Ok(())
  }
}

struct SpawnChild {
  props: Props,
}

struct Guardian {
  child_slot: Arc<Mutex<Option<ActorRef>>>,
}

impl Actor for Guardian {
  fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    let spawned = match ctx.message().and_then(|view| view.downcast_ref::<SpawnChild>()) {
      | Some(request) => {
        let child = ctx.spawn(&request.props).map_err(|error| ActorError::fatal_with_detail("spawn", error.to_string()))?;
        Some(child)
      },
      | None => None,
    };
    if let Some(child) = spawned {
      self.child_slot.lock().expect("slot").replace(child);
    }
    Ok(())
  }
}

fn guardian_props(strategy: SupervisorStrategy, child_slot: &Arc<Mutex<Option<ActorRef>>>) -> Props {
  let child_slot = Arc::clone(child_slot);
  Props::from_fn(move || Guardian { child_slot: Arc::clone(&child_slot) }).with_supervisor(strategy)
}

fn flaky_props(log: &Log, instances: &Arc<AtomicUsize>) -> Props {
  let log = Arc::clone(log);
  let instances = Arc::clone(instances);
  Props::from_fn(move || {
    instances.fetch_add(1, Ordering::SeqCst);
    Flaky { log: Arc::clone(&log), value: 0 }
  })
}

fn setup(strategy: SupervisorStrategy) -> (ActorSystem, ActorRef, ActorRef, Log, Arc<AtomicUsize>) {
  let log = Arc::new(Mutex::new(Vec::new()));
  let instances = Arc::new(AtomicUsize::new(0));
  let child_slot = Arc::new(Mutex::new(None));
  let system = ActorSystem::new();
  let parent = system.spawn_named(&guardian_props(strategy, &child_slot), "parent").expect("spawn parent");
  parent
    .tell(AnyMessage::new(SpawnChild { props: flaky_props(&log, &instances) }))
    .expect("spawn child");
  let child = child_slot.lock().expect("slot").clone().expect("child");
  (system, parent, child, log, instances)
}

#[test]
fn restart_directive_recreates_the_child_in_place() {
  let strategy = SupervisorStrategy::one_for_one(|_| SupervisorDirective::Restart);
  let (system, parent, child, log, instances) = setup(strategy);

  child.tell(AnyMessage::new(Fail)).expect("fail");
  child.tell(AnyMessage::new(Ping)).expect("ping");

  // Restarting, then Started, then the next user message handled normally.
  let entries = log.lock().expect("log").clone();
  assert_eq!(entries, vec!["started", "fail", "restarting", "started", "ping:1"]);
  assert_eq!(instances.load(Ordering::SeqCst), 2);

  // The parent never dropped the child from supervision.
  let parent_cell = system.state().cell(parent.pid()).expect("parent cell");
  assert_eq!(parent_cell.children(), vec![child.pid().clone()]);
}

#[test]
fn resume_directive_keeps_the_instance() {
  let strategy = SupervisorStrategy::one_for_one(|_| SupervisorDirective::Resume);
  let (_system, _parent, child, log, instances) = setup(strategy);

  child.tell(AnyMessage::new(Ping)).expect("ping");
  child.tell(AnyMessage::new(Fail)).expect("fail");
  child.tell(AnyMessage::new(Ping)).expect("ping");

  // Same instance, state intact: the counter continues from 1.
  let entries = log.lock().expect("log").clone();
  assert_eq!(entries, vec!["started", "ping:1", "fail", "ping:2"]);
  assert_eq!(instances.load(Ordering::SeqCst), 1);
}

#[test]
fn stop_directive_removes_the_child() {
  let strategy = SupervisorStrategy::one_for_one(|_| SupervisorDirective::Stop);
  let (system, _parent, child, _log, instances) = setup(strategy);

  child.tell(AnyMessage::new(Fail)).expect("fail");

  assert!(system.find(child.path()).is_none());
  assert_eq!(instances.load(Ordering::SeqCst), 1);
}

#[test]
fn escalation_is_decided_by_the_grandparent_alone() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let leaf_instances = Arc::new(AtomicUsize::new(0));
  let leaf_slot = Arc::new(Mutex::new(None));
  let middle_slot = Arc::new(Mutex::new(None));
  let system = ActorSystem::new();

  let restart_all = SupervisorStrategy::one_for_one(|_| SupervisorDirective::Restart);
  let escalate = SupervisorStrategy::one_for_one(|_| SupervisorDirective::Escalate);

  let grandparent = system
    .spawn_named(&guardian_props(restart_all, &middle_slot), "grandparent")
    .expect("spawn grandparent");
  grandparent
    .tell(AnyMessage::new(SpawnChild { props: guardian_props(escalate, &leaf_slot) }))
    .expect("spawn middle");
  let middle = middle_slot.lock().expect("slot").clone().expect("middle");
  middle
    .tell(AnyMessage::new(SpawnChild { props: flaky_props(&log, &leaf_instances) }))
    .expect("spawn leaf");
  let leaf = leaf_slot.lock().expect("slot").clone().expect("leaf");

  leaf.tell(AnyMessage::new(Fail)).expect("fail");
  leaf.tell(AnyMessage::new(Ping)).expect("ping");

  // The failure passed through the middle untouched; the grandparent's
  // directive restarted the failing leaf exactly once.
  let entries = log.lock().expect("log").clone();
  assert_eq!(entries, vec!["started", "fail", "restarting", "started", "ping:1"]);
  assert_eq!(leaf_instances.load(Ordering::SeqCst), 2);
  assert!(system.find(middle.path()).is_some());
}

#[test]
fn restart_intensity_limit_degrades_to_stop() {
  let strategy =
    SupervisorStrategy::new(SupervisorStrategyKind::OneForOne, 1, Duration::from_secs(60), |_| {
      SupervisorDirective::Restart
    });
  let (system, _parent, child, log, instances) = setup(strategy);

  child.tell(AnyMessage::new(Fail)).expect("first failure restarts");
  child.tell(AnyMessage::new(Fail)).expect("second failure stops");

  assert!(system.find(child.path()).is_none());
  assert_eq!(instances.load(Ordering::SeqCst), 2);
  let entries = log.lock().expect("log").clone();
  assert_eq!(entries.iter().filter(|entry| *entry == "restarting").count(), 1);
}

#[test]
fn handler_panics_are_captured_as_failures() {
  struct Panicking;
  impl Actor for Panicking {
    fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
      if ctx.message().is_some_and(|view| view.is::<Fail>()) {
        panic!("boom");
      }
      Ok(())
    }
  }

  let child_slot = Arc::new(Mutex::new(None));
  let system = ActorSystem::new();
  let strategy = SupervisorStrategy::one_for_one(|error| {
    debug_assert!(error.is_fatal());
    SupervisorDirective::Stop
  });
  let parent = system.spawn_named(&guardian_props(strategy, &child_slot), "parent").expect("spawn parent");
  parent.tell(AnyMessage::new(SpawnChild { props: Props::from_fn(|| Panicking) })).expect("spawn child");
  let child = child_slot.lock().expect("slot").clone().expect("child");

  child.tell(AnyMessage::new(Fail)).expect("fail");

  assert!(system.find(child.path()).is_none());
}
