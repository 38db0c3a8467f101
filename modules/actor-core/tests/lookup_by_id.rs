//! Identity reuse across stop plus request-reply through ephemeral addresses.

use arbor_actor_core_rs::{
  Actor, ActorContext, ActorError, ActorSystem, AnyMessage, Props, SpawnError, Terminated,
};

struct Increment;

struct Counter {
  value: i64,
}

impl Actor for Counter {
  fn receive(&mut self, ctx: &mut ActorContext<'_>) -> Result<(), ActorError> {
    let is_increment = ctx.message().is_some_and(|view| view.is::<Increment>());
    if is_increment {
      self.value += 1;
      ctx.respond(AnyMessage::new(self.value)).map_err(|_| ActorError::recoverable("reply failed"))?;
    }
    Ok(())
  }
}

fn counter_props() -> Props {
  Props::from_fn(|| Counter { value: 0 })
}

fn increment_once(system: &ActorSystem, name: &str) -> i64 {
  let actor = system.find(name).unwrap_or_else(|| panic!("{name} not registered"));
  let response = actor.request_future(AnyMessage::new(Increment)).expect("request");
  let reply = response.future().try_take().expect("reply resolved");
  *reply.downcast_ref::<i64>().expect("counter reply")
}

#[test]
fn identity_is_reusable_after_stop_and_replies_accumulate() {
  let system = ActorSystem::new();
  let mut accumulated = 0;

  {
    let actor = system.spawn_named(&counter_props(), "UniqueID").expect("first spawn");
    accumulated += increment_once(&system, "UniqueID");
    assert_eq!(accumulated, 1);

    let stopped = actor.stop_future();
    let notice = stopped.try_take().expect("termination notice");
    assert_eq!(notice.downcast_ref::<Terminated>().map(|t| t.who.path()), Some("UniqueID"));
  }

  {
    // Same identity, fresh counter: the registry slot was released.
    let _actor = system.spawn_named(&counter_props(), "UniqueID").expect("respawn under the same identity");
    accumulated += increment_once(&system, "UniqueID");
    assert_eq!(accumulated, 2);
  }
}

#[test]
fn duplicate_identity_is_rejected_while_alive() {
  let system = ActorSystem::new();
  let _first = system.spawn_named(&counter_props(), "UniqueID").expect("spawn");
  let error = system.spawn_named(&counter_props(), "UniqueID").expect_err("conflict");
  assert!(matches!(error, SpawnError::IdentityConflict(path) if path == "UniqueID"));
}

#[test]
fn auto_ids_never_collide_with_user_names() {
  let system = ActorSystem::new();
  let anonymous = system.spawn(&counter_props()).expect("anonymous spawn");
  assert!(anonymous.path().starts_with('$'));
  let error = system.spawn_named(&counter_props(), "$imposter").expect_err("reserved prefix");
  assert!(matches!(error, SpawnError::InvalidName(_)));
}
