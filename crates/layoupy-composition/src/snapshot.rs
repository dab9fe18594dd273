//! Forest snapshots
//!
//! The persistence contract: after every settled structural change the
//! session hands a [`ForestSnapshot`] to its [`SnapshotSink`]; at startup a
//! previously stored snapshot becomes the initial forest. Storage itself
//! belongs to whoever implements the sink.
//!
//! Stored layout is JSON. Version 1 wraps the elements in an envelope:
//!
//! ```json
//! {"version": 1, "elements": [ ... ]}
//! ```
//!
//! A bare element array (what the editor wrote before versioning) is read as
//! version 0 and upgraded in memory; the element shape is the same.

use crate::error::SnapshotError;
use layoupy_element::Forest;
use layoupy_tree::{check_integrity, check_stage_activity};
use serde::{Deserialize, Serialize};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Key the editor stores its snapshot under
pub const STORAGE_KEY: &str = "layoupy-elements";

/// Serializable copy of a session's forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestSnapshot {
    /// Schema version the snapshot was written with
    pub version: u32,
    /// Top-level elements, in canvas order
    pub elements: Forest,
}

impl ForestSnapshot {
    /// Snapshot of `forest` at the current version
    #[inline]
    #[must_use]
    pub fn new(forest: Forest) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            elements: forest,
        }
    }

    /// Encode as compact JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode either layout, upgrade to the current version, check ids
    ///
    /// # Errors
    /// - [`SnapshotError::Json`] for malformed input
    /// - [`SnapshotError::Layout`] for JSON that is neither object nor array
    /// - [`SnapshotError::UnsupportedVersion`] for newer envelopes
    /// - [`SnapshotError::Integrity`] for duplicate ids or several active
    ///   stages
    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(source)?;
        let snapshot = match value {
            Value::Array(_) => {
                let elements: Forest = serde_json::from_value(value)?;
                tracing::debug!("Upgrading unversioned snapshot ({} top-level elements)", elements.len());
                Self::new(elements)
            }
            Value::Object(_) => {
                let stored: ForestSnapshot = serde_json::from_value(value)?;
                if stored.version > SNAPSHOT_VERSION {
                    return Err(SnapshotError::UnsupportedVersion {
                        found: stored.version,
                        supported: SNAPSHOT_VERSION,
                    });
                }
                Self::new(stored.elements)
            }
            Value::Null => return Err(SnapshotError::Layout("null")),
            Value::Bool(_) => return Err(SnapshotError::Layout("boolean")),
            Value::Number(_) => return Err(SnapshotError::Layout("number")),
            Value::String(_) => return Err(SnapshotError::Layout("string")),
        };
        check_integrity(&snapshot.elements)?;
        check_stage_activity(&snapshot.elements)?;
        Ok(snapshot)
    }

    /// Take the forest
    #[inline]
    #[must_use]
    pub fn into_forest(self) -> Forest {
        self.elements
    }
}

/// Receiver of snapshots after each settled structural change
///
/// Failures are reported back to the session, which logs them; they never
/// undo the change that produced the snapshot.
pub trait SnapshotSink: Send {
    /// Store `snapshot`, replacing whatever was stored before
    ///
    /// # Errors
    /// Returns error if the snapshot could not be stored
    fn persist(&mut self, snapshot: &ForestSnapshot) -> Result<(), SnapshotError>;
}

/// In-memory sink; clones share the same history
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    saved: Arc<Mutex<Vec<ForestSnapshot>>>,
}

impl MemorySink {
    /// Empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every snapshot persisted so far, oldest first
    #[must_use]
    pub fn saved(&self) -> Vec<ForestSnapshot> {
        self.saved.lock().clone()
    }

    /// Most recent snapshot
    #[must_use]
    pub fn latest(&self) -> Option<ForestSnapshot> {
        self.saved.lock().last().cloned()
    }
}

impl SnapshotSink for MemorySink {
    fn persist(&mut self, snapshot: &ForestSnapshot) -> Result<(), SnapshotError> {
        self.saved.lock().push(snapshot.clone());
        Ok(())
    }
}
