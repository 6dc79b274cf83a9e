//! Engine-level error type.

use crate::automation::InvalidAutomationConfig;
use crate::core::{CodecError, HistoryError};
use crate::render::RenderError;
use thiserror::Error;

/// Everything a dispatched command or automation tick can fail with.
///
/// All variants are local-recoverable: the engine state is left exactly as
/// it was before the failing operation, never partially mutated.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A hash string failed to decode; the caller keeps the prior state.
    #[error("invalid hash format: {0}")]
    InvalidFormat(#[from] CodecError),

    /// A byte index outside the token's 32 slots.
    #[error("byte index {index} is out of range for a 32-byte token")]
    IndexOutOfRange { index: usize },

    /// A value that does not fit in a byte.
    #[error("value {value} does not fit in a byte")]
    InvalidByteValue { value: u16 },

    /// Undo with nothing recorded.
    #[error(transparent)]
    EmptyHistory(#[from] HistoryError),

    /// A start request the automation loop rejected; it stays idle.
    #[error(transparent)]
    InvalidAutomationConfig(#[from] InvalidAutomationConfig),

    /// Snapshot dispatch failed mid-automation; the loop is stopped before
    /// this surfaces so the timer never outlives a broken cycle.
    #[error("snapshot dispatch failed: {0}")]
    Snapshot(#[from] RenderError),
}
