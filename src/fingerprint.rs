//! BLAKE3 fingerprinting for artifact change detection
//!
//! A fingerprint is a stable hash over an artifact's bytes: identical bytes
//! always produce an identical fingerprint, independent of when the artifact
//! was generated. Fingerprints are rendered and persisted as
//! `blake3:<hex>` strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hash prefix for BLAKE3 fingerprints
pub const HASH_PREFIX: &str = "blake3:";

/// A stable content fingerprint over artifact bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a byte slice
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let hash = blake3::hash(bytes);
        Self(format!("{}{}", HASH_PREFIX, hash.to_hex()))
    }

    /// Wrap an already-formatted fingerprint string (ensures the prefix)
    #[allow(dead_code)] // used in tests
    pub fn from_string(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.starts_with(HASH_PREFIX) {
            Self(s)
        } else {
            Self(format!("{HASH_PREFIX}{s}"))
        }
    }

    /// Full `blake3:<hex>` representation
    #[allow(dead_code)] // used in tests
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short hex prefix for commit messages and run summaries
    pub fn short(&self) -> &str {
        let hex = &self.0[HASH_PREFIX.len()..];
        &hex[..hex.len().min(8)]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
