//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or validating a
/// checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint was written by an unsupported format version
    #[error("unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint data failed consistency validation
    #[error("checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
