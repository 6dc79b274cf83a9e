//! Checkpoint and restore for token editing sessions.
//!
//! A checkpoint is a serializable capture of the full session state
//! (values, hash, locks, undo history, parameters, ordinal) plus engine
//! metadata. It supports replaying or resuming an editing session; where
//! the bytes go is the caller's concern, the engine itself never touches
//! disk or network.

use crate::core::{encode, TokenState};
use crate::engine::EngineMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the checkpoint format.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable capture of one editing session.
///
/// Automation state is deliberately excluded: a timer handle cannot be
/// serialized, and a restored session starts idle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When the checkpoint was captured
    pub created_at: DateTime<Utc>,

    /// Full token session state
    pub state: TokenState,

    /// Engine bookkeeping at capture time
    pub metadata: EngineMetadata,
}

impl Checkpoint {
    /// Capture the given session state.
    pub fn capture(state: &TokenState, metadata: &EngineMetadata) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: state.clone(),
            metadata: metadata.clone(),
        }
    }

    /// Check version and internal consistency.
    ///
    /// A checkpoint whose hash does not re-derive from its values, or
    /// whose randomization range is inverted, came from a tampered or
    /// corrupted source and must not be restored.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if encode(self.state.values()) != *self.state.hash() {
            return Err(CheckpointError::ValidationFailed(
                "hash does not match values".to_string(),
            ));
        }
        if self.state.params().min > self.state.params().max {
            return Err(CheckpointError::ValidationFailed(
                "randomization range is inverted".to_string(),
            ));
        }
        Ok(())
    }

    /// Encode as JSON, for readability.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Encode as binary, for compactness.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from binary and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}
