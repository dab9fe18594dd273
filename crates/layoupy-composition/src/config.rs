//! Session configuration
//!
//! Every field has a default matching the long-standing editor behaviour;
//! a TOML file only needs the keys it changes.

use crate::error::CompositionError;
use layoupy_visibility::AnswerPolicy;
use serde::{Deserialize, Serialize};

/// What dropping a canvas element onto the canvas background does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasDropPolicy {
    /// Nothing; the element stays where it is
    #[default]
    Ignore,
    /// Move the element to the end of the top level
    MoveToEnd,
}

/// Configuration of a composition session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Checking applied to answer selections
    pub answer_policy: AnswerPolicy,
    /// Canvas-to-canvas drop behaviour
    pub canvas_drop: CanvasDropPolicy,
    /// Journal entries kept (0 disables the journal)
    pub journal_capacity: usize,
    /// Forget answers of radios removed from the forest
    pub prune_stale_answers: bool,
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML or has unknown values
    pub fn from_toml_str(source: &str) -> Result<Self, CompositionError> {
        Ok(toml::from_str(source)?)
    }

    /// With answer policy
    #[inline]
    #[must_use]
    pub fn with_answer_policy(mut self, policy: AnswerPolicy) -> Self {
        self.answer_policy = policy;
        self
    }

    /// With canvas drop policy
    #[inline]
    #[must_use]
    pub fn with_canvas_drop(mut self, policy: CanvasDropPolicy) -> Self {
        self.canvas_drop = policy;
        self
    }

    /// With journal capacity
    #[inline]
    #[must_use]
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity;
        self
    }

    /// With stale answer pruning on or off
    #[inline]
    #[must_use]
    pub fn with_prune_stale_answers(mut self, prune: bool) -> Self {
        self.prune_stale_answers = prune;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            answer_policy: AnswerPolicy::Permissive,
            canvas_drop: CanvasDropPolicy::Ignore,
            journal_capacity: 1024,
            prune_stale_answers: true,
        }
    }
}
