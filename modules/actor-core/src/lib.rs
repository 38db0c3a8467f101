#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::print_stdout, clippy::dbg_macro)]
#![deny(clippy::todo, clippy::unimplemented)]

//! Actor cell runtime.
//!
//! Each actor is an isolated unit of state served by a private mailbox; a
//! cell dispatches one message at a time into the actor's current behavior
//! through a fixed middleware chain, supervises the actor's children, tracks
//! watch subscriptions, and preserves a stash across restarts. Scheduling is
//! delegated to a pluggable [`DispatchExecutor`]; this crate ships inline and
//! thread-spawning executors, and the companion std crate binds Tokio.

mod actor;
mod actor_cell;
mod actor_context;
mod actor_error;
mod actor_future;
mod actor_future_listener;
mod actor_ref;
mod actor_system_config;
mod any_message;
mod any_message_view;
mod ask_response;
mod behavior_stack;
mod dead_letter;
mod dispatch_executor;
mod dispatcher;
mod event_stream;
mod event_stream_event;
mod event_stream_subscriber;
mod event_stream_subscription;
mod lifecycle;
mod lifecycle_event;
mod lifecycle_stage;
mod log_event;
mod log_level;
mod logger_subscriber;
mod logger_writer;
mod mailbox;
mod mailbox_capacity;
mod mailbox_overflow_strategy;
mod mailbox_policy;
mod pid;
mod process_registry;
mod props;
mod receive;
mod restart_statistics;
mod send_error;
mod spawn_error;
mod stash_buffer;
mod supervisor_strategy;
mod sync;
mod system;
mod system_message;
mod system_state;

pub use actor::Actor;
pub use actor_cell::ActorCell;
pub use actor_context::{ActorContext, NO_BEHAVIOR, STASH_WITHOUT_MESSAGE};
pub use actor_error::{ActorError, HANDLER_PANIC, UNBECOME_BASE};
pub use actor_future::ActorFutureShared;
pub use actor_future_listener::ActorFutureListener;
pub use actor_ref::ActorRef;
pub use actor_system_config::{ActorSystemConfig, DEFAULT_THROUGHPUT};
pub use any_message::{AnyMessage, MessagePayload};
pub use any_message_view::AnyMessageView;
pub use ask_response::AskResponse;
pub use dead_letter::DeadLetter;
pub use dispatch_executor::{DispatchExecutor, InlineDispatchExecutor, ThreadDispatchExecutor};
pub use dispatcher::{Dispatcher, MessageInvoker};
pub use event_stream::EventStream;
pub use event_stream_event::EventStreamEvent;
pub use event_stream_subscriber::EventStreamSubscriber;
pub use event_stream_subscription::EventStreamSubscription;
pub use lifecycle::{Restarting, Started, Stopped, Stopping, Terminated};
pub use lifecycle_event::LifecycleEvent;
pub use lifecycle_stage::LifecycleStage;
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger_subscriber::LoggerSubscriber;
pub use logger_writer::LoggerWriter;
pub use mailbox::{Mailbox, MailboxMessage};
pub use mailbox_capacity::MailboxCapacity;
pub use mailbox_overflow_strategy::MailboxOverflowStrategy;
pub use mailbox_policy::MailboxPolicy;
pub use pid::{PATH_SEPARATOR, Pid};
pub use process_registry::{AUTO_ID_PREFIX, ProcessHandle, ProcessRegistry, RegistryConflict};
pub use props::{ActorFactory, Props};
pub use receive::{BEHAVIOR_TYPE_MISMATCH, Receive};
pub use restart_statistics::RestartStatistics;
pub use send_error::SendError;
pub use spawn_error::SpawnError;
pub use stash_buffer::STASH_OVERFLOW;
pub use supervisor_strategy::{
  DEFAULT_MAX_RESTARTS, DEFAULT_RESTART_WINDOW, SupervisorDecider, SupervisorDirective, SupervisorStrategy,
  SupervisorStrategyKind, default_decider,
};
pub use system::ActorSystem;
pub use system_message::{FailurePayload, SystemMessage};
pub use system_state::SystemState;
