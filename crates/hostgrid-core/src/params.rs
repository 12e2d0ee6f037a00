//! The orchestrator's untyped parameter maps.
//!
//! Every plugin invocation carries one JSON object of loosely typed
//! key/value pairs. `RawParams` is the explicit boundary between that
//! wire form and the typed structs in [`crate::workload`]; the
//! calculation logic itself never reads the untyped form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped key/value parameter map exchanged with the orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawParams(Map<String, Value>);

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key is present, regardless of its value.
    pub fn is_set(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// String value for `key`; empty when missing or not a string.
    pub fn string(&self, key: &str) -> String {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Signed integer for `key`; accepts JSON numbers and numeric
    /// strings, defaulting to 0 otherwise.
    pub fn i64(&self, key: &str) -> i64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or_default(),
            Some(Value::String(s)) => s.parse().unwrap_or_default(),
            _ => 0,
        }
    }

    /// String list for `key`; empty when missing. Non-string elements
    /// are skipped.
    pub fn string_slice(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// String list under the first alias that is present.
    pub fn one_of_string_slice(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .find(|key| self.is_set(key))
            .map(|key| self.string_slice(key))
            .unwrap_or_default()
    }

    /// Nested parameter map for `key`; empty when missing or not an
    /// object.
    pub fn raw_params(&self, key: &str) -> RawParams {
        match self.0.get(key) {
            Some(Value::Object(map)) => RawParams(map.clone()),
            _ => RawParams::new(),
        }
    }

    /// Nested parameter maps keyed by ID — the shape of the remap
    /// payload's `workloads_resource` field.
    pub fn raw_params_map(&self, key: &str) -> HashMap<String, RawParams> {
        match self.0.get(key) {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(id, value)| match value {
                    Value::Object(inner) => Some((id.clone(), RawParams(inner.clone()))),
                    _ => None,
                })
                .collect(),
            _ => HashMap::new(),
        }
    }
}

impl From<Map<String, Value>> for RawParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawParams> for Value {
    fn from(params: RawParams) -> Self {
        Value::Object(params.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> RawParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn string_defaults_to_empty() {
        let p = params(json!({"nodename": "node-1", "count": 3}));
        assert_eq!(p.string("nodename"), "node-1");
        assert_eq!(p.string("missing"), "");
        assert_eq!(p.string("count"), "");
    }

    #[test]
    fn i64_accepts_numbers_and_numeric_strings() {
        let p = params(json!({"a": 3, "b": "7", "c": "nope", "d": [1]}));
        assert_eq!(p.i64("a"), 3);
        assert_eq!(p.i64("b"), 7);
        assert_eq!(p.i64("c"), 0);
        assert_eq!(p.i64("d"), 0);
        assert_eq!(p.i64("missing"), 0);
    }

    #[test]
    fn string_slice_skips_non_strings() {
        let p = params(json!({"volumes": ["/a:/b:1G", 42, "/c:/d"]}));
        assert_eq!(p.string_slice("volumes"), ["/a:/b:1G", "/c:/d"]);
        assert!(p.string_slice("missing").is_empty());
    }

    #[test]
    fn one_of_string_slice_takes_first_present_alias() {
        let p = params(json!({"volume-request": ["/a:/b"], "volumes-request": ["/x:/y"]}));
        assert_eq!(
            p.one_of_string_slice(&["volumes", "volume-request", "volumes-request"]),
            ["/a:/b"]
        );
        assert!(p.one_of_string_slice(&["nope", "nothing"]).is_empty());
    }

    #[test]
    fn nested_raw_params() {
        let p = params(json!({"workloads_resource": {"volumes": ["/a:/b:1G"]}}));
        let nested = p.raw_params("workloads_resource");
        assert_eq!(nested.string_slice("volumes"), ["/a:/b:1G"]);
        assert!(p.raw_params("missing").string("x").is_empty());
    }

    #[test]
    fn raw_params_map_collects_objects() {
        let p = params(json!({
            "workloads_resource": {
                "w1": {"volumes": ["/a:/b:1G"]},
                "w2": {"volumes": []},
                "junk": "not-an-object"
            }
        }));
        let by_id = p.raw_params_map("workloads_resource");
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id["w1"].string_slice("volumes"), ["/a:/b:1G"]);
    }
}
