//! Ordered, identity-keyed collections of volume bindings.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::binding::VolumeBinding;
use crate::error::{VolumeError, VolumeResult};

/// An ordered sequence of bindings, semantically a set keyed by
/// `(source, destination)`.
///
/// Insertion order is preserved so the canonical output order of
/// engine parameter strings is deterministic. On the wire the set is a
/// plain list of canonical `source:destination:size` strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct VolumeBindingSet {
    bindings: Vec<VolumeBinding>,
}

impl VolumeBindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of volume strings. The first parse failure aborts
    /// the whole operation; no partial sets are produced.
    pub fn parse<I>(volumes: I) -> VolumeResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut bindings = Vec::new();
        for volume in volumes {
            bindings.push(volume.as_ref().parse()?);
        }
        Ok(Self { bindings })
    }

    /// Enforce the set invariants: every member individually valid, no
    /// two members sharing a destination, no two members sharing a
    /// source. The first violation found is reported; for a given
    /// member the destination check runs before the source check.
    pub fn validate(&self) -> VolumeResult<()> {
        let mut seen_destinations = HashSet::new();
        let mut seen_sources = HashSet::new();
        for binding in &self.bindings {
            binding
                .validate()
                .map_err(|err| VolumeError::InvalidVolumes(format!("invalid binding: {err}")))?;
            if !seen_destinations.insert(binding.destination.as_str()) {
                return Err(VolumeError::InvalidVolumes(format!(
                    "duplicated destination: {}",
                    binding.destination
                )));
            }
            if !seen_sources.insert(binding.source.as_str()) {
                return Err(VolumeError::InvalidVolumes(format!(
                    "duplicated source: {}",
                    binding.source
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn push(&mut self, binding: VolumeBinding) {
        self.bindings.push(binding);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VolumeBinding> {
        self.bindings.iter()
    }

    /// Look up a binding by its identity key.
    pub fn get(&self, source: &str, destination: &str) -> Option<&VolumeBinding> {
        self.bindings
            .iter()
            .find(|b| b.source == source && b.destination == destination)
    }

    pub fn contains_key(&self, source: &str, destination: &str) -> bool {
        self.get(source, destination).is_some()
    }

    /// Sum of all members' sizes, for capacity accounting.
    pub fn total_size(&self) -> i64 {
        self.bindings.iter().map(|b| b.size_in_bytes).sum()
    }

    /// Canonical strings of all members, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.bindings.iter().map(ToString::to_string).collect()
    }

    /// Combine sets by summing sizes per identity key.
    ///
    /// Additional sets are accumulated before the primary, so the
    /// primary's entries land on top of whatever the others built up.
    /// Keys whose summed size is not strictly positive are dropped:
    /// the orchestrator reads a fully negated quota as "remove this
    /// mount". Output preserves first-seen order.
    pub fn merge(primary: &Self, additional: &[Self]) -> Self {
        let mut merged: Vec<VolumeBinding> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();

        for set in additional.iter().chain(std::iter::once(primary)) {
            for binding in &set.bindings {
                let key = (binding.source.clone(), binding.destination.clone());
                match index.get(&key) {
                    Some(&slot) => merged[slot].size_in_bytes += binding.size_in_bytes,
                    None => {
                        index.insert(key, merged.len());
                        merged.push(binding.clone());
                    }
                }
            }
        }

        merged.retain(|b| b.size_in_bytes > 0);
        Self { bindings: merged }
    }

    /// Drop entries with a non-positive size, preserving order.
    pub fn remove_empty(&self) -> Self {
        Self {
            bindings: self
                .bindings
                .iter()
                .filter(|b| b.size_in_bytes > 0)
                .cloned()
                .collect(),
        }
    }
}

/// Order-insensitive equality: equal cardinality, and every member of
/// `other` matches the binding under the same identity key here,
/// field for field.
impl PartialEq for VolumeBindingSet {
    fn eq(&self, other: &Self) -> bool {
        if self.bindings.len() != other.bindings.len() {
            return false;
        }
        let by_key: HashMap<(&str, &str), &VolumeBinding> =
            self.bindings.iter().map(|b| (b.map_key(), b)).collect();
        other
            .bindings
            .iter()
            .all(|b| by_key.get(&b.map_key()).is_some_and(|own| *own == b))
    }
}

impl Eq for VolumeBindingSet {}

impl<'a> IntoIterator for &'a VolumeBindingSet {
    type Item = &'a VolumeBinding;
    type IntoIter = std::slice::Iter<'a, VolumeBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

impl TryFrom<Vec<String>> for VolumeBindingSet {
    type Error = VolumeError;

    fn try_from(volumes: Vec<String>) -> VolumeResult<Self> {
        Self::parse(&volumes)
    }
}

impl From<VolumeBindingSet> for Vec<String> {
    fn from(set: VolumeBindingSet) -> Self {
        set.to_strings()
    }
}
