//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Sha1`] - Git commit identity (20-byte SHA-1)
//!
//! # Validation
//!
//! Identities are validated at construction time. An invalid hash cannot
//! be represented, so every `Sha1` renders as exactly 40 lowercase hex
//! characters.
//!
//! # Examples
//!
//! ```
//! use gitrev::core::types::Sha1;
//!
//! let id = Sha1::parse("4E59B72440188E7C2578299FC28EA425FBE9AECE").unwrap();
//! assert_eq!(id.to_string(), "4e59b72440188e7c2578299fc28ea425fbe9aece");
//!
//! assert!(Sha1::parse("not-a-sha").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id '{text}': {reason}")]
    InvalidFormat { text: String, reason: String },
}

/// A Git commit identity.
///
/// Stored as the raw 20 bytes of the SHA-1 digest. Equality, ordering and
/// hashing are byte-wise.
///
/// # Example
///
/// ```
/// use gitrev::core::types::Sha1;
///
/// let id = Sha1::parse("0eedd79eba4394bbef888c804e899731644367fe").unwrap();
/// assert_eq!(id.short(7), "0eedd79");
/// assert!(id.has_prefix("0EEDD79"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sha1([u8; 20]);

impl Sha1 {
    /// Length of the hex rendering.
    pub const HEX_LEN: usize = 40;

    /// Parse a 40-character hex string (either case).
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFormat` if the text is not exactly 40 hex
    /// characters.
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        if text.len() != Self::HEX_LEN {
            return Err(TypeError::InvalidFormat {
                text: text.to_string(),
                reason: format!("expected 40 hex characters, got {}", text.len()),
            });
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(text, &mut bytes).map_err(|e| TypeError::InvalidFormat {
            text: text.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(bytes))
    }

    /// Build an identity from raw digest bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Get an abbreviated form of the identity.
    ///
    /// Returns the first `len` hex characters, or the full form if `len`
    /// exceeds 40.
    pub fn short(&self, len: usize) -> String {
        let mut full = self.to_string();
        full.truncate(len.min(Self::HEX_LEN));
        full
    }

    /// Check whether the hex form starts with `prefix` (case-insensitive).
    ///
    /// An empty prefix or one longer than 40 characters never matches.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() || prefix.len() > Self::HEX_LEN {
            return false;
        }
        self.to_string()
            .starts_with(prefix.to_ascii_lowercase().as_str())
    }
}

impl FromStr for Sha1 {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Sha1 {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Sha1> for String {
    fn from(id: Sha1) -> Self {
        id.to_string()
    }
}

impl fmt::Display for Sha1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Sha1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha1({})", self)
    }
}
