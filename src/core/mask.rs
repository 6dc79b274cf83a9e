//! Per-byte lock flags that exclude slots from randomization.

use super::token::TOKEN_WIDTH;
use serde::{Deserialize, Serialize};

/// Lock flags aligned index-for-index with the token's value array.
///
/// A locked slot keeps its current byte through every randomization pass.
/// Toggling is copy-on-write: the receiver is never mutated.
///
/// # Example
///
/// ```rust
/// use tokenlab::core::LockMask;
///
/// let mask = LockMask::unlocked();
/// let mask = mask.toggled(3).unwrap();
///
/// assert!(mask.is_locked(3));
/// assert!(!mask.is_locked(4));
///
/// // Toggling again unlocks.
/// assert!(!mask.toggled(3).unwrap().is_locked(3));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LockMask([bool; TOKEN_WIDTH]);

impl LockMask {
    /// All slots unlocked, the initial and reset state.
    pub fn unlocked() -> Self {
        Self([false; TOKEN_WIDTH])
    }

    /// Return a copy with the flag at `index` flipped.
    ///
    /// `None` when `index` is out of range.
    pub fn toggled(&self, index: usize) -> Option<Self> {
        if index >= TOKEN_WIDTH {
            return None;
        }
        let mut flags = self.0;
        flags[index] = !flags[index];
        Some(Self(flags))
    }

    /// Whether the slot at `index` is locked. Out-of-range reads as unlocked.
    pub fn is_locked(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Number of locked slots.
    pub fn locked_count(&self) -> usize {
        self.0.iter().filter(|locked| **locked).count()
    }
}

impl Default for LockMask {
    fn default() -> Self {
        Self::unlocked()
    }
}
