//! Undo history of committed token hashes.
//!
//! Every state-changing command pushes the hash it is about to replace, so
//! undo always rewinds exactly one observed commit. The stack is immutable:
//! `pushed`/`popped`/`cleared` return a new history and never mutate the
//! receiver.

use super::codec::TokenHash;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when there is nothing to rewind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history is empty, nothing to undo")]
    Empty,
}

/// Ordered record of prior hashes; the last entry is the most recent.
///
/// Two invariants hold at all times:
/// - no two consecutive entries are equal (a push of the current top is a
///   no-op, so repeated no-op edits cannot pollute the stack);
/// - entries only ever hold canonical hashes, since callers push values
///   produced by the codec.
///
/// # Example
///
/// ```rust
/// use tokenlab::core::{HashHistory, TokenHash};
///
/// let history = HashHistory::new().pushed(TokenHash::zero());
/// assert_eq!(history.len(), 1);
///
/// // Pushing the same hash again is a no-op.
/// let history = history.pushed(TokenHash::zero());
/// assert_eq!(history.len(), 1);
///
/// let (rest, top) = history.popped().unwrap();
/// assert_eq!(top, TokenHash::zero());
/// assert!(rest.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashHistory {
    entries: Vec<TokenHash>,
}

impl Default for HashHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HashHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a hash, returning a new history.
    ///
    /// No-op (returns an equal history) when `hash` matches the current
    /// top, keeping consecutive entries distinct.
    pub fn pushed(&self, hash: TokenHash) -> Self {
        if self.entries.last() == Some(&hash) {
            return self.clone();
        }
        let mut entries = self.entries.clone();
        entries.push(hash);
        Self { entries }
    }

    /// Remove the most recent entry, returning the shortened history and
    /// the removed hash.
    pub fn popped(&self) -> Result<(Self, TokenHash), HistoryError> {
        let mut entries = self.entries.clone();
        let hash = entries.pop().ok_or(HistoryError::Empty)?;
        Ok((Self { entries }, hash))
    }

    /// An emptied history.
    pub fn cleared(&self) -> Self {
        Self::new()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&TokenHash> {
        self.entries.last()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TokenHash] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::encode;
    use crate::core::token::{TokenValues, TOKEN_WIDTH};

    fn hash_of(byte: u8) -> TokenHash {
        encode(&TokenValues::from_bytes([byte; TOKEN_WIDTH]))
    }

    #[test]
    fn new_history_is_empty() {
        let history = HashHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
    }

    #[test]
    fn pushed_appends_in_order() {
        let history = HashHistory::new().pushed(hash_of(1)).pushed(hash_of(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0], hash_of(1));
        assert_eq!(history.last(), Some(&hash_of(2)));
    }

    #[test]
    fn pushed_skips_duplicate_top() {
        let history = HashHistory::new()
            .pushed(hash_of(1))
            .pushed(hash_of(1))
            .pushed(hash_of(2))
            .pushed(hash_of(1));

        // 1, 2, 1 is fine; only *consecutive* duplicates collapse.
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn pushed_is_immutable() {
        let history = HashHistory::new();
        let grown = history.pushed(hash_of(1));

        assert!(history.is_empty());
        assert_eq!(grown.len(), 1);
    }

    #[test]
    fn popped_returns_last_entry() {
        let history = HashHistory::new().pushed(hash_of(1)).pushed(hash_of(2));
        let (rest, top) = history.popped().unwrap();

        assert_eq!(top, hash_of(2));
        assert_eq!(rest.len(), 1);
        assert_eq!(history.len(), 2); // original unchanged
    }

    #[test]
    fn popped_empty_fails() {
        assert_eq!(
            HashHistory::new().popped().unwrap_err(),
            HistoryError::Empty
        );
    }

    #[test]
    fn cleared_drops_everything() {
        let history = HashHistory::new().pushed(hash_of(1)).pushed(hash_of(2));
        assert!(history.cleared().is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = HashHistory::new().pushed(hash_of(9));
        let json = serde_json::to_string(&history).unwrap();
        let deserialized: HashHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history, deserialized);
    }
}
