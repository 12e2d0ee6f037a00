//! Error types for the hostgrid volume model.

use thiserror::Error;

/// Result type alias for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors produced while parsing, validating, or combining volume bindings.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// A single binding failed parsing or field-level validation.
    #[error("invalid volume: {0}")]
    InvalidVolume(String),

    /// A binding set violated a set-level invariant.
    #[error("invalid volumes: {0}")]
    InvalidVolumes(String),

    /// A calculate operation was dispatched without a node name.
    #[error("node name must not be empty")]
    EmptyNodeName,

    /// The raw parameter payload could not be decoded.
    #[error("failed to decode raw params: {0}")]
    Decode(#[from] serde_json::Error),
}
