//! The calculation engine: deploy, realloc, remap.
//!
//! Each operation is stateless and atomic. All prior state (the
//! workload's current resource) arrives as a parameter; any decode or
//! validation failure aborts the whole call with no partial result.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use hostgrid_core::{
    EngineParams, RawParams, VolumeBindingSet, VolumeResult, WorkloadResource,
    WorkloadResourceRequest,
};

use crate::plugin::Plugin;

/// Per-slot engine parameters and resources for a deploy request.
#[derive(Debug, Clone, Serialize)]
pub struct DeployResponse {
    pub engines_params: Vec<EngineParams>,
    pub workloads_resource: Vec<WorkloadResource>,
}

/// Result of merging a realloc request into the current resource.
#[derive(Debug, Clone, Serialize)]
pub struct ReallocResponse {
    pub engine_params: EngineParams,
    pub delta_resource: WorkloadResource,
    pub workload_resource: WorkloadResource,
}

/// Engine parameters per workload ID after a remap.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemapResponse {
    pub engine_params_map: HashMap<String, EngineParams>,
}

impl Plugin {
    /// Produce `deploy_count` independent copies of the requested
    /// volume set, one per deploy slot.
    ///
    /// The two returned sequences are index-aligned; each slot's set
    /// is a deep copy so a later per-workload realloc cannot leak into
    /// another slot.
    pub fn calculate_deploy(
        &self,
        nodename: &str,
        deploy_count: usize,
        resource_request: &RawParams,
    ) -> VolumeResult<DeployResponse> {
        let request = WorkloadResourceRequest::parse(resource_request)?;
        if let Err(err) = request.validate() {
            warn!(node = nodename, %err, "invalid volume request");
            return Err(err);
        }

        let mut engines_params = Vec::with_capacity(deploy_count);
        let mut workloads_resource = Vec::with_capacity(deploy_count);
        for _ in 0..deploy_count {
            let volumes = request.volumes.clone();
            engines_params.push(EngineParams {
                volumes: volumes.to_strings(),
                volume_changed: false,
            });
            workloads_resource.push(WorkloadResource { volumes });
        }

        debug!(
            node = nodename,
            slots = deploy_count,
            volumes = request.volumes.len(),
            "deploy calculated"
        );
        Ok(DeployResponse {
            engines_params,
            workloads_resource,
        })
    }

    /// Merge a realloc request into the workload's current resource.
    ///
    /// Returns the engine parameters for the target mount table, the
    /// per-binding delta the engine applies, and the full target
    /// resource the orchestrator persists as the new ground truth.
    pub fn calculate_realloc(
        &self,
        nodename: &str,
        resource: &RawParams,
        resource_request: &RawParams,
    ) -> VolumeResult<ReallocResponse> {
        let request = WorkloadResourceRequest::parse(resource_request)?;
        request.validate()?;
        let origin = WorkloadResource::parse(resource)?;

        let target = WorkloadResource {
            volumes: VolumeBindingSet::merge(
                &request.volumes,
                std::slice::from_ref(&origin.volumes),
            ),
        };
        // Merge dedups by identity key, but the merged set must still
        // hold the per-workload invariants (unique source, unique
        // destination) before it can be handed to the engine.
        if let Err(err) = target.volumes.validate() {
            warn!(node = nodename, %err, "merged volumes are invalid");
            return Err(err);
        }

        // The mount table changed if an entry appeared or disappeared.
        // A size-only change on an existing key stays false: the
        // engine resizes in place from the delta instead of
        // remounting.
        let mut volume_changed = origin.volumes.len() != target.volumes.len();
        let mut volumes = Vec::with_capacity(target.volumes.len());
        for binding in &target.volumes {
            if !origin.volumes.contains_key(&binding.source, &binding.destination) {
                volume_changed = true;
            }
            volumes.push(binding.to_string());
        }

        let delta_resource = delta_resource(&origin, &target);
        debug!(
            node = nodename,
            volume_changed,
            target_size = target.total_size(),
            "realloc calculated"
        );
        Ok(ReallocResponse {
            engine_params: EngineParams {
                volumes,
                volume_changed,
            },
            delta_resource,
            workload_resource: target,
        })
    }

    /// Host-directory mounts are path-stable across engine identities,
    /// so remapping a workload needs no engine parameters. Always
    /// returns a well-formed empty map.
    pub fn calculate_remap(
        &self,
        _nodename: &str,
        _workloads_resource: &HashMap<String, RawParams>,
    ) -> VolumeResult<RemapResponse> {
        Ok(RemapResponse::default())
    }
}

/// Per-binding difference between the target state and the origin: the
/// full target size for new keys, target minus origin for kept keys.
/// Target ordering is preserved.
fn delta_resource(origin: &WorkloadResource, target: &WorkloadResource) -> WorkloadResource {
    let mut volumes = VolumeBindingSet::new();
    for binding in &target.volumes {
        let mut delta = binding.clone();
        if let Some(existing) = origin.volumes.get(&binding.source, &binding.destination) {
            delta.size_in_bytes = binding.size_in_bytes - existing.size_in_bytes;
        }
        volumes.push(delta);
    }
    WorkloadResource { volumes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostgrid_core::{HostgridConfig, VolumeError};
    use serde_json::json;

    fn plugin() -> Plugin {
        Plugin::new(&HostgridConfig::default())
    }

    fn raw(value: serde_json::Value) -> RawParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn deploy_produces_index_aligned_slots() {
        let response = plugin()
            .calculate_deploy("node-1", 2, &raw(json!({"volumes": ["/h/a:/c/a:10M"]})))
            .unwrap();

        assert_eq!(response.engines_params.len(), 2);
        assert_eq!(response.workloads_resource.len(), 2);
        for params in &response.engines_params {
            assert_eq!(params.volumes, ["/h/a:/c/a:10485760"]);
            assert!(!params.volume_changed);
        }
    }

    #[test]
    fn deploy_slots_are_independent_copies() {
        let mut response = plugin()
            .calculate_deploy("node-1", 2, &raw(json!({"volumes": ["/h/a:/c/a:10M"]})))
            .unwrap();

        let grown: VolumeBindingSet =
            serde_json::from_value(json!(["/h/a:/c/a:20971520"])).unwrap();
        response.workloads_resource[0].volumes = grown;

        assert_eq!(
            response.workloads_resource[1].volumes.to_strings(),
            ["/h/a:/c/a:10485760"]
        );
    }

    #[test]
    fn deploy_zero_count_is_empty() {
        let response = plugin()
            .calculate_deploy("node-1", 0, &raw(json!({"volumes": ["/h/a:/c/a:10M"]})))
            .unwrap();
        assert!(response.engines_params.is_empty());
        assert!(response.workloads_resource.is_empty());
    }

    #[test]
    fn deploy_rejects_invalid_request() {
        let err = plugin()
            .calculate_deploy("node-1", 1, &raw(json!({"volumes": ["rel:/c/a:10M"]})))
            .unwrap_err();
        assert!(matches!(err, VolumeError::InvalidVolume(_)));

        let err = plugin()
            .calculate_deploy(
                "node-1",
                1,
                &raw(json!({"volumes": ["/h/a:/c/x:1", "/h/b:/c/x:1"]})),
            )
            .unwrap_err();
        assert!(matches!(err, VolumeError::InvalidVolumes(_)));
    }

    #[test]
    fn realloc_same_path_grow_keeps_mount_table() {
        let response = plugin()
            .calculate_realloc(
                "node-1",
                &raw(json!({"volumes": ["/h/a:/c/a:10485760"]})),
                &raw(json!({"volumes": ["/h/a:/c/a:20971520"]})),
            )
            .unwrap();

        assert_eq!(response.engine_params.volumes, ["/h/a:/c/a:31457280"]);
        assert!(!response.engine_params.volume_changed);
        assert_eq!(
            response.delta_resource.volumes.to_strings(),
            ["/h/a:/c/a:20971520"]
        );
    }

    #[test]
    fn realloc_delta_request_resizes_in_place() {
        // A grow-by-10M delta on an existing 10M mount: same key, no
        // table change, delta mirrors the increment.
        let response = plugin()
            .calculate_realloc(
                "node-1",
                &raw(json!({"volumes": ["/h/a:/c/a:10485760"]})),
                &raw(json!({"volumes": ["/h/a:/c/a:10485760"]})),
            )
            .unwrap();

        assert_eq!(
            response.workload_resource.volumes.to_strings(),
            ["/h/a:/c/a:20971520"]
        );
        assert!(!response.engine_params.volume_changed);
        assert_eq!(
            response.delta_resource.volumes.to_strings(),
            ["/h/a:/c/a:10485760"]
        );
    }

    #[test]
    fn realloc_added_path_flags_change() {
        let response = plugin()
            .calculate_realloc(
                "node-1",
                &raw(json!({"volumes": ["/h/a:/c/a:10485760"]})),
                &raw(json!({"volumes": ["/h/b:/c/b:5242880"]})),
            )
            .unwrap();

        assert_eq!(response.workload_resource.volumes.len(), 2);
        assert!(response.engine_params.volume_changed);
        let delta = response
            .delta_resource
            .volumes
            .get("/h/b", "/c/b")
            .unwrap();
        assert_eq!(delta.size_in_bytes, 5242880);
        // The kept mount contributes a zero delta.
        let kept = response.delta_resource.volumes.get("/h/a", "/c/a").unwrap();
        assert_eq!(kept.size_in_bytes, 0);
    }

    #[test]
    fn realloc_negated_quota_removes_mount() {
        let response = plugin()
            .calculate_realloc(
                "node-1",
                &raw(json!({"volumes": ["/h/a:/c/a:10485760", "/h/b:/c/b:1024"]})),
                &raw(json!({"volumes": ["/h/b:/c/b:-1024"]})),
            )
            .unwrap();

        assert_eq!(
            response.workload_resource.volumes.to_strings(),
            ["/h/a:/c/a:10485760"]
        );
        assert!(response.engine_params.volume_changed);
    }

    #[test]
    fn realloc_shrink_keeps_mount_and_reports_negative_delta() {
        let response = plugin()
            .calculate_realloc(
                "node-1",
                &raw(json!({"volumes": ["/h/a:/c/a:20971520"]})),
                &raw(json!({"volumes": ["/h/a:/c/a:-10485760"]})),
            )
            .unwrap();

        assert_eq!(
            response.workload_resource.volumes.to_strings(),
            ["/h/a:/c/a:10485760"]
        );
        assert!(!response.engine_params.volume_changed);
        assert_eq!(
            response.delta_resource.volumes.to_strings(),
            ["/h/a:/c/a:-10485760"]
        );
    }

    #[test]
    fn realloc_rejects_invalid_delta_request() {
        let err = plugin()
            .calculate_realloc(
                "node-1",
                &raw(json!({"volumes": []})),
                &raw(json!({"volumes": ["/h/a:relative:1G"]})),
            )
            .unwrap_err();
        assert!(matches!(err, VolumeError::InvalidVolume(_)));
    }

    #[test]
    fn realloc_rejects_merged_duplicate_source() {
        // Two distinct keys that survive the merge but collide on
        // source — only the post-merge validation catches this.
        let err = plugin()
            .calculate_realloc(
                "node-1",
                &raw(json!({"volumes": ["/h/x:/c/a:1024"]})),
                &raw(json!({"volumes": ["/h/x:/c/b:1024"]})),
            )
            .unwrap_err();
        assert!(matches!(err, VolumeError::InvalidVolumes(_)));
    }

    #[test]
    fn remap_is_always_empty() {
        let mut workloads = HashMap::new();
        workloads.insert(
            "workload-1".to_string(),
            raw(json!({"volumes": ["/h/a:/c/a:1G"]})),
        );
        let response = plugin().calculate_remap("node-1", &workloads).unwrap();
        assert!(response.engine_params_map.is_empty());

        let response = plugin().calculate_remap("node-1", &HashMap::new()).unwrap();
        assert!(response.engine_params_map.is_empty());
    }
}
