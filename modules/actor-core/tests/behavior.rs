//! Behavior stack: become, stacked become, and unbecome.

use std::sync::{Arc, Mutex};

use arbor_actor_core_rs::{
  Actor, ActorContext, ActorError, ActorSystem, AnyMessage, Props, Receive, UNBECOME_BASE,
};

type Log = Arc<Mutex<Vec<String>>>;

struct Switcher {
  log: Log,
}

impl Switcher {
  fn push(&self, entry: impl Into<String>) {
    self.log.lock().expect("log").push(entry.into());
  }
}

fn listening(actor: &mut Switcher, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
  let Some(text) = ctx.message().and_then(|view| view.downcast_ref::<&str>()) else { return Ok(()) };
  actor.push(format!("listening:{text}"));
  if *text == "mute" {
    ctx.unbecome_stacked()?;
  }
  Ok(())
}

impl Actor for Switcher {
  fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    let Some(text) = ctx.message().and_then(|view| view.downcast_ref::<&str>()) else { return Ok(()) };
    match *text {
      | "stack" => {
        self.push("base:stack");
        ctx.become_stacked(Receive::of::<Switcher>(listening));
      },
      | "replace" => {
        self.push("base:replace");
        ctx.become_handler(Receive::of::<Switcher>(listening));
      },
      | "pop-base" => {
        let error = ctx.unbecome_stacked().expect_err("base behavior must not pop");
        self.push(format!("error:{}", error.code()));
      },
      | other => self.push(format!("base:{other}")),
    }
    Ok(())
  }
}

fn spawn_switcher(system: &ActorSystem, log: &Log) -> arbor_actor_core_rs::ActorRef {
  let log = Arc::clone(log);
  system
    .spawn_named(&Props::from_fn(move || Switcher { log: Arc::clone(&log) }), "switcher")
    .expect("spawn")
}

#[test]
fn stacked_behavior_handles_until_unbecome() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let system = ActorSystem::new();
  let actor = spawn_switcher(&system, &log);

  actor.tell(AnyMessage::new("stack")).expect("tell");
  actor.tell(AnyMessage::new("hello")).expect("tell");
  actor.tell(AnyMessage::new("mute")).expect("tell");
  actor.tell(AnyMessage::new("hello")).expect("tell");

  assert_eq!(
    *log.lock().expect("log"),
    vec!["base:stack", "listening:hello", "listening:mute", "base:hello"]
  );
}

#[test]
fn become_replaces_the_whole_stack() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let system = ActorSystem::new();
  let actor = spawn_switcher(&system, &log);

  actor.tell(AnyMessage::new("replace")).expect("tell");
  actor.tell(AnyMessage::new("hello")).expect("tell");

  assert_eq!(*log.lock().expect("log"), vec!["base:replace", "listening:hello"]);
}

#[test]
fn popping_the_base_behavior_is_an_error() {
  let log = Arc::new(Mutex::new(Vec::new()));
  let system = ActorSystem::new();
  let actor = spawn_switcher(&system, &log);

  actor.tell(AnyMessage::new("pop-base")).expect("tell");

  assert_eq!(*log.lock().expect("log"), vec![format!("error:{UNBECOME_BASE}")]);
}

#[test]
fn restart_reseeds_the_base_behavior() {
  struct FailInListening {
    log: Log,
  }

  fn deaf(actor: &mut FailInListening, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    let Some(text) = ctx.message().and_then(|view| view.downcast_ref::<&str>()) else { return Ok(()) };
    actor.log.lock().expect("log").push(format!("deaf:{text}"));
    if *text == "crash" {
      return Err(ActorError::recoverable("crash in stacked behavior"));
    }
    Ok(())
  }

  impl Actor for FailInListening {
    fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
      let Some(text) = ctx.message().and_then(|view| view.downcast_ref::<&str>()) else { return Ok(()) };
      self.log.lock().expect("log").push(format!("base:{text}"));
      if *text == "stack" {
        ctx.become_stacked(Receive::of::<FailInListening>(deaf));
      }
      Ok(())
    }
  }

  let log: Log = Arc::new(Mutex::new(Vec::new()));
  let system = ActorSystem::new();
  let props = Props::from_fn({
    let log = Arc::clone(&log);
    move || FailInListening { log: Arc::clone(&log) }
  });
  let actor = system.spawn_named(&props, "resettable").expect("spawn");

  actor.tell(AnyMessage::new("stack")).expect("tell");
  actor.tell(AnyMessage::new("crash")).expect("tell");
  actor.tell(AnyMessage::new("after")).expect("tell");

  // The stacked behavior died with the old instance; the fresh incarnation
  // answers with its base behavior.
  assert_eq!(
    *log.lock().expect("log"),
    vec!["base:stack", "deaf:crash", "base:after"]
  );
}
