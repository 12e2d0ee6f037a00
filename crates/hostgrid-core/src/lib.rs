//! hostgrid-core — volume binding model and raw-parameter boundary.
//!
//! The data model for host-directory volume bindings used by the
//! hostgrid resource plugin:
//!
//! - **`binding`** — a single `source:destination:size` mount
//! - **`set`** — ordered, identity-keyed binding collections with
//!   merge and validation semantics
//! - **`workload`** — typed request/state wrappers around a set
//! - **`params`** — the orchestrator's untyped parameter maps and the
//!   decode boundary in front of the typed structs
//! - **`bytesize`** — human-readable byte quantity parsing
//! - **`config`** — plugin configuration
//!
//! Everything here is a plain value type: no I/O, no shared state.
//! Each plugin invocation builds fresh values from its inputs and
//! returns fresh outputs.

pub mod binding;
pub mod bytesize;
pub mod config;
pub mod error;
pub mod params;
pub mod set;
pub mod workload;

pub use binding::VolumeBinding;
pub use config::HostgridConfig;
pub use error::{VolumeError, VolumeResult};
pub use params::RawParams;
pub use set::VolumeBindingSet;
pub use workload::{EngineParams, WorkloadResource, WorkloadResourceRequest};
