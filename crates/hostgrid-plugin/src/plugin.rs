//! The plugin facade the dispatch shell talks to.

use hostgrid_core::HostgridConfig;

/// Host-directory resource plugin.
///
/// Stateless: every operation computes its result from the parameters
/// it is handed and keeps nothing between calls. Concurrent calls for
/// different workloads are safe; calls mutating the same workload's
/// current resource must be serialized by the orchestrator.
#[derive(Debug, Clone)]
pub struct Plugin {
    name: String,
}

impl Plugin {
    pub fn new(config: &HostgridConfig) -> Self {
        Self {
            name: config.plugin.name.clone(),
        }
    }

    /// The name reported to the orchestrator's plugin registry.
    pub fn name(&self) -> &str {
        &self.name
    }
}
