//! A single host-directory volume binding.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::bytesize::parse_byte_size;
use crate::error::{VolumeError, VolumeResult};

/// One host directory bound into a workload: `source:destination:size`.
///
/// Identity is the `(source, destination)` pair; two bindings with the
/// same pair describe the same logical mount. The size is a signed
/// quota — negative values are produced by reallocation requests that
/// shrink a mount and never survive into an accepted final state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeBinding {
    pub source: String,
    pub destination: String,
    pub size_in_bytes: i64,
}

impl VolumeBinding {
    /// Identity key used for deduplication and lookup.
    pub fn map_key(&self) -> (&str, &str) {
        (&self.source, &self.destination)
    }

    /// Check field-level invariants.
    ///
    /// Negative `size_in_bytes` is explicitly allowed: realloc uses
    /// negative sizes to shrink an existing mount.
    pub fn validate(&self) -> VolumeResult<()> {
        if self.destination.is_empty() {
            return Err(VolumeError::InvalidVolume(format!(
                "destination must be provided: {self}"
            )));
        }
        if !Path::new(&self.destination).is_absolute() {
            return Err(VolumeError::InvalidVolume(format!(
                "destination must be absolute: {self}"
            )));
        }
        if self.source.is_empty() {
            return Err(VolumeError::InvalidVolume(format!(
                "source must be provided: {self}"
            )));
        }
        if !Path::new(&self.source).is_absolute() {
            return Err(VolumeError::InvalidVolume(format!(
                "source must be absolute: {self}"
            )));
        }
        Ok(())
    }
}

impl FromStr for VolumeBinding {
    type Err = VolumeError;

    /// Parse a colon-delimited volume string: `source:destination`
    /// (size defaults to 0) or `source:destination:size` with a
    /// human-readable size. Any other segment count is invalid.
    fn from_str(volume: &str) -> VolumeResult<Self> {
        let parts: Vec<&str> = volume.split(':').collect();
        let (source, destination, size_in_bytes) = match parts.as_slice() {
            [source, destination] => (*source, *destination, 0),
            [source, destination, size] => {
                let size = parse_byte_size(size)
                    .ok_or_else(|| VolumeError::InvalidVolume(volume.to_string()))?;
                (*source, *destination, size)
            }
            _ => return Err(VolumeError::InvalidVolume(volume.to_string())),
        };

        let binding = Self {
            source: source.to_string(),
            destination: destination.to_string(),
            size_in_bytes,
        };
        binding.validate()?;
        Ok(binding)
    }
}

impl fmt::Display for VolumeBinding {
    /// Canonical form fed to the execution engine. Round-trips through
    /// [`FromStr`] for any previously produced value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.destination, self.size_in_bytes)
    }
}
