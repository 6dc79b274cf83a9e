//! Tagged commands and the pure transition function over them.

use super::error::EngineError;
use crate::core::{decode, TokenState};
use crate::random::randomize_values;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Every mutation the engine knows how to perform.
///
/// Commands are plain data, so hosts can queue, log, or replay them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Replace one byte. `value` is validated into byte range.
    SetValue { index: usize, value: u16 },
    /// Replace the whole array from a hash string.
    SetHash { text: String },
    /// Rewind to the most recent history entry.
    Undo,
    /// Full reset: all-zero values/hash, unlocked mask, empty history.
    Reset,
    /// Flip the lock flag on one slot.
    ToggleLock { index: usize },
    /// Redraw every unlocked byte.
    Randomize,
    /// Set the token ordinal used to address the renderer.
    SetNumber { number: u64 },
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Self::SetValue { .. } => "SetValue",
            Self::SetHash { .. } => "SetHash",
            Self::Undo => "Undo",
            Self::Reset => "Reset",
            Self::ToggleLock { .. } => "ToggleLock",
            Self::Randomize => "Randomize",
            Self::SetNumber { .. } => "SetNumber",
        }
    }
}

/// Compute the state a command transitions to.
///
/// Pure except for `Randomize`, which draws replacement bytes from `rng`;
/// given a seeded generator the whole function is deterministic. The input
/// state is never mutated, and on error it is returned untouched to the
/// caller by virtue of never having been moved.
pub fn apply<R: Rng>(
    state: &TokenState,
    command: &Command,
    rng: &mut R,
) -> Result<TokenState, EngineError> {
    match command {
        Command::SetValue { index, value } => {
            let byte = u8::try_from(*value)
                .map_err(|_| EngineError::InvalidByteValue { value: *value })?;
            let values = state
                .values()
                .with_value(*index, byte)
                .ok_or(EngineError::IndexOutOfRange { index: *index })?;
            Ok(state.committed(values))
        }

        Command::SetHash { text } => {
            let values = decode(text)?;
            Ok(state.committed(values))
        }

        Command::Undo => {
            let (history, hash) = state.history.popped()?;
            let values = decode(hash.as_str())?;
            Ok(TokenState {
                values,
                hash,
                history,
                locked: state.locked,
                params: state.params,
                number: state.number,
            })
        }

        Command::Reset => Ok(TokenState {
            params: state.params,
            ..TokenState::new()
        }),

        Command::ToggleLock { index } => {
            let locked = state
                .locked
                .toggled(*index)
                .ok_or(EngineError::IndexOutOfRange { index: *index })?;
            Ok(TokenState {
                locked,
                ..state.clone()
            })
        }

        Command::Randomize => {
            let values = randomize_values(rng, &state.values, &state.locked, &state.params);
            Ok(state.committed(values))
        }

        Command::SetNumber { number } => Ok(TokenState {
            number: *number,
            ..state.clone()
        }),
    }
}
