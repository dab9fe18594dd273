//! Error types for the composition layer
//!
//! Structural misses are not errors (see [`crate::Outcome`]). What remains:
//! - Answers rejected under a strict policy
//! - Snapshots that cannot be loaded
//! - Unreadable configuration

use layoupy_tree::TreeError;
use layoupy_visibility::AnswerError;

/// Main composition error type
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    /// Answer rejected by the session's answer policy
    #[error("invalid answer: {0}")]
    InvalidAnswer(#[from] AnswerError),

    /// Snapshot could not be decoded or adopted
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Snapshot encoding/decoding and sink errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Malformed JSON or element shape
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither an envelope object nor a bare element array
    #[error("unrecognised snapshot layout: expected object or array, got {0}")]
    Layout(&'static str),

    /// Written by a newer schema than this build understands
    #[error("unsupported snapshot version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Decoded forest repeats an id or has several active stages
    #[error("inconsistent forest: {0}")]
    Integrity(#[from] TreeError),

    /// A sink could not store the snapshot
    #[error("sink failed: {0}")]
    Sink(String),
}

impl CompositionError {
    /// Whether the error came from a user action (as opposed to loading)
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidAnswer(_))
    }
}
