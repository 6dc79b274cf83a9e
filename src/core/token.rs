//! The token value array and its randomization parameters.

use serde::{Deserialize, Serialize};

/// Number of byte slots in a token.
pub const TOKEN_WIDTH: usize = 32;

/// The 32-byte value being edited.
///
/// Slot order is significant: it determines the byte order of the encoded
/// hash. Values are immutable; editing methods return a new array.
///
/// # Example
///
/// ```rust
/// use tokenlab::core::{TokenValues, TOKEN_WIDTH};
///
/// let values = TokenValues::zero();
/// assert_eq!(values.get(0), Some(0));
/// assert_eq!(values.get(TOKEN_WIDTH), None);
///
/// let edited = values.with_value(0, 0xff).unwrap();
/// assert_eq!(edited.get(0), Some(0xff));
/// assert_eq!(values.get(0), Some(0)); // original unchanged
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TokenValues([u8; TOKEN_WIDTH]);

impl TokenValues {
    /// The all-zero initial array.
    pub fn zero() -> Self {
        Self([0; TOKEN_WIDTH])
    }

    /// Wrap an existing byte array.
    pub fn from_bytes(bytes: [u8; TOKEN_WIDTH]) -> Self {
        Self(bytes)
    }

    /// Read the byte at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Return a copy with the byte at `index` replaced.
    ///
    /// `None` when `index` is out of range; the receiver is never mutated.
    pub fn with_value(&self, index: usize, value: u8) -> Option<Self> {
        if index >= TOKEN_WIDTH {
            return None;
        }
        let mut bytes = self.0;
        bytes[index] = value;
        Some(Self(bytes))
    }

    /// Borrow the underlying bytes.
    pub fn bytes(&self) -> &[u8; TOKEN_WIDTH] {
        &self.0
    }
}

impl Default for TokenValues {
    fn default() -> Self {
        Self::zero()
    }
}

/// Randomization parameters carried alongside the token.
///
/// `min`/`max` bound the values drawn for unlocked bytes; `step` is a UI
/// increment hint carried for hosts, not interpreted by the engine.
/// Invariant: `min <= max` (enforced at engine construction).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TokenParams {
    pub min: u8,
    pub max: u8,
    pub step: u8,
}

impl Default for TokenParams {
    fn default() -> Self {
        Self {
            min: 0,
            max: 255,
            step: 1,
        }
    }
}
