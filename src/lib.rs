#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Facade crate for the arbor actor runtime workspace.
//!
//! Re-exports the runtime core and the standard-runtime bindings so embedders
//! can depend on a single crate. The core crate is runtime-agnostic; the std
//! crate wires dispatch onto Tokio.

pub use arbor_actor_core_rs as actor_core;
pub use arbor_actor_std_rs as actor_std;

/// Returns the semantic version of the workspace.
#[must_use]
pub const fn crate_version() -> &'static str {
  env!("CARGO_PKG_VERSION")
}
