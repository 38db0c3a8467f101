use std::sync::{Arc, Mutex};

use crate::{
  actor::Actor, actor_context::ActorContext, actor_error::ActorError, actor_ref::ActorRef, any_message::AnyMessage,
  lifecycle::{Started, Stopped, Stopping, Terminated}, props::Props, system::ActorSystem, system_message::SystemMessage,
};

type Log = Arc<Mutex<Vec<String>>>;

struct Recorder {
  log: Log,
}

impl Actor for Recorder {
  fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    let Some(view) = ctx.message() else { return Ok(()) };
    let entry = if view.is::<Started>() {
      "started".to_string()
    } else if view.is::<Stopping>() {
      "stopping".to_string()
    } else if view.is::<Stopped>() {
      "stopped".to_string()
    } else if let Some(terminated) = view.downcast_ref::<Terminated>() {
      format!("terminated:{}", terminated.who)
    } else if let Some(text) = view.downcast_ref::<&str>() {
      (*text).to_string()
    } else {
      "other".to_string()
    };
    self.log.lock().expect("log").push(entry);
    Ok(())
  }
}

struct SpawnOnStart {
  log:        Log,
  child_slot: Arc<Mutex<Option<ActorRef>>>,
}

impl Actor for SpawnOnStart {
  fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    if let Some(terminated) = ctx.message().and_then(|view| view.downcast_ref::<Terminated>()) {
      self.log.lock().expect("log").push(format!("terminated:{}", terminated.who));
      return Ok(());
    }
    let is_started = ctx.message().is_some_and(|view| view.is::<Started>());
    if is_started {
      let log = Arc::clone(&self.log);
      let child = ctx
        .spawn_named(&Props::from_fn(move || Recorder { log: Arc::clone(&log) }), "child")
        .map_err(|error| ActorError::fatal_with_detail("spawn", error.to_string()))?;
      self.child_slot.lock().expect("slot").replace(child);
    }
    Ok(())
  }
}

fn new_log() -> Log {
  Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn started_is_the_first_dispatch() {
  let log = new_log();
  let system = ActorSystem::new();
  let props = Props::from_fn({
    let log = Arc::clone(&log);
    move || Recorder { log: Arc::clone(&log) }
  });
  let actor = system.spawn(&props).expect("spawn");
  actor.tell(AnyMessage::new("ping")).expect("tell");
  assert_eq!(*log.lock().expect("log"), vec!["started".to_string(), "ping".to_string()]);
}

#[test]
fn spawned_child_is_linked_and_watched() {
  let log = new_log();
  let child_slot = Arc::new(Mutex::new(None));
  let system = ActorSystem::new();
  let props = Props::from_fn({
    let log = Arc::clone(&log);
    let child_slot = Arc::clone(&child_slot);
    move || SpawnOnStart { log: Arc::clone(&log), child_slot: Arc::clone(&child_slot) }
  });
  let parent = system.spawn_named(&props, "parent").expect("spawn");

  let child = child_slot.lock().expect("slot").clone().expect("child spawned");
  assert_eq!(child.path(), "parent/child");

  let parent_cell = system.state().cell(parent.pid()).expect("parent cell");
  let child_cell = system.state().cell(child.pid()).expect("child cell");
  assert_eq!(parent_cell.children(), vec![child.pid().clone()]);
  assert_eq!(parent_cell.watching_snapshot(), vec![child.pid().clone()]);
  assert_eq!(child_cell.watchers_snapshot(), vec![parent.pid().clone()]);
}

#[test]
fn stop_tears_down_children_and_removes_registrations() {
  let log = new_log();
  let child_slot = Arc::new(Mutex::new(None));
  let system = ActorSystem::new();
  let props = Props::from_fn({
    let log = Arc::clone(&log);
    let child_slot = Arc::clone(&child_slot);
    move || SpawnOnStart { log: Arc::clone(&log), child_slot: Arc::clone(&child_slot) }
  });
  let parent = system.spawn_named(&props, "parent").expect("spawn");
  let child = child_slot.lock().expect("slot").clone().expect("child spawned");

  parent.stop();

  assert!(system.state().cell(parent.pid()).is_none());
  assert!(system.state().cell(child.pid()).is_none());
  let entries = log.lock().expect("log").clone();
  assert!(entries.contains(&"stopping".to_string()));
  assert!(entries.contains(&"stopped".to_string()));
}

#[test]
fn termination_notice_from_untracked_peer_is_ignored() {
  let log = new_log();
  let system = ActorSystem::new();
  let props = Props::from_fn({
    let log = Arc::clone(&log);
    move || Recorder { log: Arc::clone(&log) }
  });
  let actor = system.spawn_named(&props, "observer").expect("spawn");
  let stranger = crate::pid::Pid::root("stranger");

  assert!(system.state().send_system(actor.pid(), SystemMessage::Terminated(stranger)));

  // No user-visible notification, and the cell is still alive.
  assert_eq!(*log.lock().expect("log"), vec!["started".to_string()]);
  assert!(system.state().cell(actor.pid()).is_some());
}

#[test]
fn watcher_list_drains_on_finalize() {
  let log = new_log();
  let child_slot = Arc::new(Mutex::new(None));
  let system = ActorSystem::new();
  let props = Props::from_fn({
    let log = Arc::clone(&log);
    let child_slot = Arc::clone(&child_slot);
    move || SpawnOnStart { log: Arc::clone(&log), child_slot: Arc::clone(&child_slot) }
  });
  let parent = system.spawn_named(&props, "parent").expect("spawn");
  let child = child_slot.lock().expect("slot").clone().expect("child spawned");

  child.stop();

  // Parent observed the child's termination and dropped it from supervision.
  let parent_cell = system.state().cell(parent.pid()).expect("parent cell");
  assert!(parent_cell.children().is_empty());
  assert!(parent_cell.watching_snapshot().is_empty());
  let entries = log.lock().expect("log").clone();
  assert!(entries.iter().any(|entry| entry == &format!("terminated:{}", child.pid())));
}
