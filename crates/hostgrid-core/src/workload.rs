//! Typed request/state wrappers around a volume binding set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VolumeResult;
use crate::params::RawParams;
use crate::set::VolumeBindingSet;

/// Keys under which a request's volume list may arrive.
const VOLUME_REQUEST_KEYS: &[&str] = &["volumes", "volume-request", "volumes-request"];

/// What a workload *wants* mounted — decoded from a raw request
/// without merging against anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadResourceRequest {
    #[serde(default)]
    pub volumes: VolumeBindingSet,
}

impl WorkloadResourceRequest {
    /// Decode a request from raw parameters. The volume list is looked
    /// up under each accepted alias in order.
    pub fn parse(raw: &RawParams) -> VolumeResult<Self> {
        let volumes = VolumeBindingSet::parse(raw.one_of_string_slice(VOLUME_REQUEST_KEYS))?;
        Ok(Self { volumes })
    }

    pub fn validate(&self) -> VolumeResult<()> {
        self.volumes.validate()
    }
}

/// What a workload *currently has* mounted — the origin state during
/// reallocation. Serialized both ways between the raw-parameter form
/// and the typed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadResource {
    #[serde(default)]
    pub volumes: VolumeBindingSet,
}

impl WorkloadResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode from the raw-parameter form. Binding strings inside the
    /// payload are parsed and field-validated on the way in.
    pub fn parse(raw: &RawParams) -> VolumeResult<Self> {
        Ok(serde_json::from_value(Value::from(raw.clone()))?)
    }

    /// Encode to the raw-parameter form.
    pub fn as_raw_params(&self) -> RawParams {
        let mut raw = RawParams::new();
        raw.insert("volumes", Value::from(self.volumes.to_strings()));
        raw
    }

    /// Total quota across all bindings, for capacity accounting.
    pub fn total_size(&self) -> i64 {
        self.volumes.total_size()
    }
}

/// Flattened mount instructions handed to the execution engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Canonical binding strings, in set order.
    #[serde(default)]
    pub volumes: Vec<String>,
    /// Whether the mount table differs from the origin (new or removed
    /// entries). A pure size change on an existing mount leaves this
    /// false so the engine can resize in place instead of remounting.
    #[serde(default)]
    pub volume_changed: bool,
}

impl EngineParams {
    /// Decode from the raw-parameter form.
    pub fn parse(raw: &RawParams) -> VolumeResult<Self> {
        Ok(serde_json::from_value(Value::from(raw.clone()))?)
    }

    /// Encode to the raw-parameter form.
    pub fn as_raw_params(&self) -> RawParams {
        let mut raw = RawParams::new();
        raw.insert("volumes", Value::from(self.volumes.clone()));
        raw.insert("volume_changed", Value::from(self.volume_changed));
        raw
    }
}
