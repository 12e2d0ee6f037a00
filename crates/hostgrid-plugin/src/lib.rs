//! hostgrid-plugin — the host-directory resource plugin facade.
//!
//! Implements the resource-accounting side of the orchestrator's
//! plugin protocol for host-directory volume bindings:
//!
//! - **`calculate`** — deploy / realloc / remap operations over the
//!   core volume model, producing engine parameters and resource
//!   deltas
//! - **`metrics`** — metric description/collection stubs
//! - **`plugin`** — the [`Plugin`] facade the CLI shell dispatches to
//!
//! The engine is purely functional over its inputs: no I/O, no shared
//! mutable state, nothing outlives a single call.

pub mod calculate;
pub mod metrics;
pub mod plugin;

pub use calculate::{DeployResponse, ReallocResponse, RemapResponse};
pub use metrics::{Metric, MetricsDescription};
pub use plugin::Plugin;
