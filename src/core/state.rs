//! The immutable token state snapshot.
//!
//! A `TokenState` bundles everything a host needs to render and edit one
//! token: the value array, its canonical hash, the lock mask, the undo
//! history, randomization parameters, and the token ordinal. Snapshots are
//! values; commands in [`crate::engine`] produce a new snapshot rather
//! than mutating the current one.

use super::codec::{encode, TokenHash};
use super::history::HashHistory;
use super::mask::LockMask;
use super::token::{TokenParams, TokenValues};
use serde::{Deserialize, Serialize};

/// One consistent snapshot of a token editing session.
///
/// Invariant: `hash` is always `encode(values)`; both are replaced together
/// by every committing operation.
///
/// # Example
///
/// ```rust
/// use tokenlab::core::{TokenHash, TokenState};
///
/// let state = TokenState::new();
/// assert_eq!(*state.hash(), TokenHash::zero());
/// assert!(state.history().is_empty());
/// assert_eq!(state.locked().locked_count(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    pub(crate) values: TokenValues,
    pub(crate) hash: TokenHash,
    pub(crate) locked: LockMask,
    pub(crate) history: HashHistory,
    pub(crate) params: TokenParams,
    pub(crate) number: u64,
}

impl TokenState {
    /// The initial state: 32 zero bytes, the all-zero hash, nothing locked,
    /// empty history.
    pub fn new() -> Self {
        Self::with_params(TokenParams::default())
    }

    /// Initial state with custom randomization parameters.
    pub fn with_params(params: TokenParams) -> Self {
        let values = TokenValues::zero();
        let hash = encode(&values);
        Self {
            values,
            hash,
            locked: LockMask::unlocked(),
            history: HashHistory::new(),
            params,
            number: 0,
        }
    }

    /// Commit a new value array: the current hash is pushed onto history
    /// and the canonical hash is re-derived from `values`.
    pub fn committed(&self, values: TokenValues) -> Self {
        let hash = encode(&values);
        Self {
            values,
            history: self.history.pushed(self.hash.clone()),
            hash,
            locked: self.locked,
            params: self.params,
            number: self.number,
        }
    }

    pub fn values(&self) -> &TokenValues {
        &self.values
    }

    pub fn hash(&self) -> &TokenHash {
        &self.hash
    }

    pub fn locked(&self) -> &LockMask {
        &self.locked
    }

    pub fn history(&self) -> &HashHistory {
        &self.history
    }

    pub fn params(&self) -> &TokenParams {
        &self.params
    }

    pub fn number(&self) -> u64 {
        self.number
    }
}

impl Default for TokenState {
    fn default() -> Self {
        Self::new()
    }
}
