//! Metrics entry points.
//!
//! Host directories expose no per-node gauges today, but the
//! orchestrator still polls both entry points, so they return
//! well-formed empty lists rather than missing fields.

use serde::{Deserialize, Serialize};

use crate::plugin::Plugin;

/// Description of one metric the plugin can report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsDescription {
    pub name: String,
    pub help: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub labels: Vec<String>,
}

/// One reported metric sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub labels: Vec<String>,
    pub value: String,
    pub key: String,
}

impl Plugin {
    pub fn metrics_description(&self) -> Vec<MetricsDescription> {
        Vec::new()
    }

    pub fn metrics(&self, _podname: &str, _nodename: &str) -> Vec<Metric> {
        Vec::new()
    }
}
