#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::print_stdout, clippy::dbg_macro)]

//! Tokio bindings for the arbor actor runtime.
//!
//! Provides a [`TokioDispatchExecutor`] scheduling mailbox drain turns on a
//! Tokio runtime, deadline adapters for ask and stop futures, and a stderr
//! log writer for the core event stream.

mod ask_timeout;
mod stderr_logger_writer;
mod tokio_dispatch_executor;

pub use ask_timeout::{AskResponseTimeoutExt, AskTimeoutError, ListenTimeoutExt};
pub use stderr_logger_writer::{StderrLoggerWriter, install_stderr_logger};
pub use tokio_dispatch_executor::TokioDispatchExecutor;
