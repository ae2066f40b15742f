//! The generated artifact handed from the generator to the publisher

use chrono::{DateTime, Utc};

use crate::fingerprint::Fingerprint;

/// A content artifact produced by one run: the card bytes, their
/// fingerprint, and the generation timestamp.
///
/// Immutable once produced. The timestamp is metadata only and never part of
/// the fingerprinted bytes, so logically identical cards fingerprint
/// identically across runs.
#[derive(Debug, Clone)]
pub struct Artifact {
    bytes: Vec<u8>,
    fingerprint: Fingerprint,
    generated_at: DateTime<Utc>,
}

impl Artifact {
    /// Seal bytes into an artifact, computing their fingerprint
    pub fn new(bytes: Vec<u8>, generated_at: DateTime<Utc>) -> Self {
        let fingerprint = Fingerprint::of_bytes(&bytes);
        Self {
            bytes,
            fingerprint,
            generated_at,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}
