//! Canonical hexadecimal codec for token hashes.
//!
//! A hash is the string `"0x"` followed by exactly 64 lowercase hex digits,
//! two per byte, in slot order. `encode` and `decode` are pure inverses:
//! `decode(encode(v)) == v` for every value array, and
//! `encode(decode(h)) == h` for every canonical hash.

use super::token::{TokenValues, TOKEN_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Prefix carried by every hash string.
pub const HASH_PREFIX: &str = "0x";

/// Hex digits in a hash payload (two per byte).
const PAYLOAD_LEN: usize = TOKEN_WIDTH * 2;

/// Canonical 66-character hash representation of a token.
///
/// Only produced by [`encode`], so a `TokenHash` is always canonical:
/// prefixed, lowercase, exactly [`TOKEN_WIDTH`] byte pairs.
///
/// # Example
///
/// ```rust
/// use tokenlab::core::{decode, encode, TokenValues};
///
/// let values = TokenValues::zero();
/// let hash = encode(&values);
///
/// assert!(hash.as_str().starts_with("0x"));
/// assert_eq!(hash.as_str().len(), 66);
/// assert_eq!(decode(hash.as_str()).unwrap(), values);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenHash(String);

impl TokenHash {
    /// The all-zero hash: `"0x"` followed by 64 `'0'` characters.
    ///
    /// Canonical initial and reset state for the whole engine.
    pub fn zero() -> Self {
        encode(&TokenValues::zero())
    }

    /// Borrow the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TokenHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reasons a hash string fails to decode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("hash must start with '0x'")]
    MissingPrefix,

    #[error("hash payload must be 64 hex digits, found {found}")]
    InvalidLength { found: usize },

    #[error("invalid hex pair '{pair}' for byte {index}")]
    InvalidHexPair { index: usize, pair: String },
}

/// Encode a value array into its canonical hash. Never fails.
pub fn encode(values: &TokenValues) -> TokenHash {
    let payload: String = values.bytes().iter().map(|b| format!("{b:02x}")).collect();
    TokenHash(format!("{HASH_PREFIX}{payload}"))
}

/// Decode a hash string back into a value array.
///
/// Accepts uppercase digits (the result re-encodes to lowercase canonical
/// form); rejects a missing prefix, a payload that is not exactly 64
/// digits, and any non-hexadecimal pair.
pub fn decode(text: &str) -> Result<TokenValues, CodecError> {
    let payload = text
        .strip_prefix(HASH_PREFIX)
        .ok_or(CodecError::MissingPrefix)?;

    if payload.len() != PAYLOAD_LEN {
        return Err(CodecError::InvalidLength {
            found: payload.len(),
        });
    }

    let mut bytes = [0u8; TOKEN_WIDTH];
    for (index, pair) in payload.as_bytes().chunks(2).enumerate() {
        let hi = (pair[0] as char).to_digit(16);
        let lo = (pair[1] as char).to_digit(16);
        match (hi, lo) {
            (Some(hi), Some(lo)) => bytes[index] = (hi * 16 + lo) as u8,
            _ => {
                return Err(CodecError::InvalidHexPair {
                    index,
                    pair: String::from_utf8_lossy(pair).into_owned(),
                })
            }
        }
    }

    Ok(TokenValues::from_bytes(bytes))
}
