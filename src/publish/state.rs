//! Publish state persisted in the target repository
//!
//! The lock file lives beside the card and records the fingerprint of the
//! last published artifact. It is read once at the start of a run for the
//! compare step, rewritten as part of the write set, and carried to the
//! remote by the publish commit, so any fresh clone starts from the state of
//! the last successful publish.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Gl1tchError, Result};
use crate::fingerprint::Fingerprint;

/// Relative path of the state file inside the target repository
pub const STATE_FILE: &str = "assets/gl1tch-card.lock";

/// Record of the last successful publish (gl1tch-card.lock)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishState {
    /// Fingerprint of the published artifact bytes
    pub fingerprint: Fingerprint,

    /// Generation timestamp of the published artifact
    pub published_at: DateTime<Utc>,
}

impl PublishState {
    /// Parse publish state from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Gl1tchError::StateReadFailed {
            path: STATE_FILE.to_string(),
            reason: e.to_string(),
        })
    }

    /// Serialize publish state to JSON (pretty-printed)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Gl1tchError::StateReadFailed {
            path: STATE_FILE.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Read/write access to the last published fingerprint
///
/// The publisher's compare step only needs this narrow interface, so its
/// logic stays testable without a cloned working tree.
pub trait StateStore {
    /// Fingerprint of the last published artifact, or `None` when nothing
    /// has ever been published
    fn last_fingerprint(&self) -> Result<Option<Fingerprint>>;

    /// Record a new publish
    fn record(&mut self, state: &PublishState) -> Result<()>;
}

/// State store backed by the lock file in a working tree
pub struct WorktreeStateStore {
    root: PathBuf,
}

impl WorktreeStateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of the lock file
    pub fn path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    /// Read the full publish state, or `None` when nothing has ever been
    /// published
    pub fn read(&self) -> Result<Option<PublishState>> {
        let path = self.path();
        if !path.exists() {
            // Never published
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|e| Gl1tchError::StateReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(PublishState::from_json(&json)?))
    }
}

impl StateStore for WorktreeStateStore {
    fn last_fingerprint(&self) -> Result<Option<Fingerprint>> {
        Ok(self.read()?.map(|state| state.fingerprint))
    }

    fn record(&mut self, state: &PublishState) -> Result<()> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Gl1tchError::WriteFailed {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let json = state.to_json()?;
        write_text(&path, &format!("{json}\n"))
    }
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Gl1tchError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state_with(fingerprint: &str) -> PublishState {
        PublishState {
            fingerprint: Fingerprint::from_string(fingerprint),
            published_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_roundtrip_json() {
        let state = state_with("blake3:abcdef1234567890");
        let json = state.to_json().unwrap();
        let parsed = PublishState::from_json(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_json_shape_is_stable() {
        let state = state_with("blake3:abcdef1234567890");
        let json = state.to_json().unwrap();
        assert!(json.contains("\"fingerprint\": \"blake3:abcdef1234567890\""));
        assert!(json.contains("\"published_at\""));
    }

    #[test]
    fn test_missing_state_file_means_never_published() {
        let temp = TempDir::new().unwrap();
        let store = WorktreeStateStore::new(temp.path());
        assert_eq!(store.last_fingerprint().unwrap(), None);
    }

    #[test]
    fn test_record_then_read_back() {
        let temp = TempDir::new().unwrap();
        let mut store = WorktreeStateStore::new(temp.path());

        let state = state_with("blake3:abcdef1234567890");
        store.record(&state).unwrap();

        assert!(temp.path().join(STATE_FILE).exists());
        assert_eq!(
            store.last_fingerprint().unwrap(),
            Some(Fingerprint::from_string("blake3:abcdef1234567890"))
        );
    }

    #[test]
    fn test_corrupt_state_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = WorktreeStateStore::new(temp.path());

        fs::create_dir_all(temp.path().join("assets")).unwrap();
        fs::write(temp.path().join(STATE_FILE), "not json").unwrap();

        let result = store.last_fingerprint();
        assert!(matches!(
            result.unwrap_err(),
            Gl1tchError::StateReadFailed { .. }
        ));
    }

    #[test]
    fn test_record_overwrites_previous_state() {
        let temp = TempDir::new().unwrap();
        let mut store = WorktreeStateStore::new(temp.path());

        store.record(&state_with("blake3:aaaa")).unwrap();
        store.record(&state_with("blake3:bbbb")).unwrap();

        assert_eq!(
            store.last_fingerprint().unwrap(),
            Some(Fingerprint::from_string("blake3:bbbb"))
        );
    }
}
