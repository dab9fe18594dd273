//! Session journal
//!
//! Append-only record of every event the session processed and what came
//! of it. Bounded: once full, the oldest entry is dropped.

use crate::event::EventKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What happened to a journalled event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "detail", rename_all = "snake_case")]
pub enum JournalOutcome {
    /// The event took effect
    Changed,
    /// The event was a no-op; why
    Unchanged(String),
    /// The event failed with this error
    Rejected(String),
}

/// One processed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the session, counting dropped entries
    pub seq: u64,
    /// When the event was processed
    pub at: DateTime<Utc>,
    /// Which event was processed
    pub event: EventKind,
    /// What it did
    pub outcome: JournalOutcome,
}

/// Bounded event log
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
    next_seq: u64,
}

impl Journal {
    /// Journal keeping at most `capacity` entries (0 keeps none)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            next_seq: 0,
        }
    }

    /// Record an outcome, returning its sequence number
    pub fn record(&mut self, event: EventKind, outcome: JournalOutcome) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.capacity == 0 {
            return seq;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(JournalEntry {
            seq,
            at: Utc::now(),
            event,
            outcome,
        });
        seq
    }

    /// Retained entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> + '_ {
        self.entries.iter()
    }

    /// Most recent entry
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    /// Retained entry count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are retained
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events recorded over the session, including dropped ones
    #[inline]
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.next_seq
    }
}
