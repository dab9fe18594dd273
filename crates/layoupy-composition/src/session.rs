//! Composition session
//!
//! [`CompositionSession`] owns one editing session's forest and answers.
//! Events are processed one at a time and to completion; readers only ever
//! see settled state.
//!
//! | Event | Origin | Effect |
//! |---|---|---|
//! | drop into canvas | palette | fresh-id copy appended to the top level |
//! | drop into canvas | canvas | per [`CanvasDropPolicy`] |
//! | drop into section | palette | fresh-id copy appended to the section |
//! | drop into section | canvas | element moved, id kept |
//! | drop into palette | canvas | element removed |
//! | delete | | element and subtree removed |
//! | activate stage | | that stage active, all others inactive |
//! | select answer | | answer recorded (checked per [`AnswerPolicy`](layoupy_visibility::AnswerPolicy)) |
//!
//! Events addressed to ids that are gone leave everything as it was and
//! report why through [`Outcome::Unchanged`].

use crate::config::{CanvasDropPolicy, SessionConfig};
use crate::error::{CompositionError, SnapshotError};
use crate::event::{CompositionEvent, DropOrigin, DropPayload, EventKind};
use crate::journal::{Journal, JournalOutcome};
use crate::snapshot::{ForestSnapshot, SnapshotSink};
use crate::view::CanvasView;
use layoupy_element::{Element, ElementId, Forest};
use layoupy_tree::{
    check_integrity, check_stage_activity, clone_with_ids, deactivate_stages, IdSource, Miss,
    RandomIds, TreeEdit,
};
use layoupy_visibility::{visible_sections, AnswerStore, RadioIndex};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};

/// Why an event left the session as it was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unchanged {
    /// Addressed element or section is gone
    TargetMissing,
    /// Element being moved is gone
    SourceMissing,
    /// Section target lies inside the element being moved
    WouldCreateCycle,
    /// Canvas element dropped on the canvas under [`CanvasDropPolicy::Ignore`]
    CanvasSelfDrop,
    /// Palette template dropped back on the palette
    FromPalette,
}

impl From<Miss> for Unchanged {
    fn from(miss: Miss) -> Self {
        match miss {
            Miss::TargetMissing => Self::TargetMissing,
            Miss::SourceMissing => Self::SourceMissing,
            Miss::WouldCreateCycle => Self::WouldCreateCycle,
        }
    }
}

impl Display for Unchanged {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TargetMissing => "target missing",
            Self::SourceMissing => "source missing",
            Self::WouldCreateCycle => "target inside moved element",
            Self::CanvasSelfDrop => "canvas element dropped on canvas",
            Self::FromPalette => "palette element dropped on palette",
        })
    }
}

/// Result of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The forest or the answers changed
    Changed(EventKind),
    /// Nothing changed, with the reason
    Unchanged(Unchanged),
}

impl Outcome {
    /// Whether the event changed anything
    #[inline]
    #[must_use]
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

enum Step {
    Edit(TreeEdit),
    Skip(Unchanged),
}

/// One editing session
pub struct CompositionSession {
    forest: Forest,
    answers: AnswerStore,
    config: SessionConfig,
    ids: Box<dyn IdSource + Send>,
    journal: Journal,
    sink: Option<Box<dyn SnapshotSink>>,
}

impl CompositionSession {
    /// Empty session
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            forest: Forest::new(),
            answers: AnswerStore::new(),
            journal: Journal::with_capacity(config.journal_capacity),
            config,
            ids: Box::new(RandomIds),
            sink: None,
        }
    }

    /// Start from an existing forest
    ///
    /// # Errors
    /// Returns error if ids in `forest` are not unique or more than one
    /// stage is active
    pub fn with_forest(mut self, forest: Forest) -> Result<Self, CompositionError> {
        check_integrity(&forest)
            .and_then(|()| check_stage_activity(&forest))
            .map_err(SnapshotError::from)?;
        self.forest = forest;
        Ok(self)
    }

    /// Start from a stored snapshot
    ///
    /// # Errors
    /// Returns error if the snapshot cannot be decoded
    pub fn from_snapshot_json(source: &str, config: SessionConfig) -> Result<Self, CompositionError> {
        let snapshot = ForestSnapshot::from_json(source)?;
        tracing::info!(
            "Loaded snapshot with {} elements",
            snapshot.elements.total_len()
        );
        Ok(Self {
            forest: snapshot.into_forest(),
            ..Self::new(config)
        })
    }

    /// With id source for palette copies
    #[must_use]
    pub fn with_id_source(mut self, ids: impl IdSource + Send + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// With snapshot sink
    #[must_use]
    pub fn with_sink(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Current forest
    #[inline]
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Answers recorded so far
    #[inline]
    #[must_use]
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Configuration the session was opened with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Events processed so far, newest last
    #[inline]
    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Snapshot of the current forest
    #[must_use]
    pub fn snapshot(&self) -> ForestSnapshot {
        ForestSnapshot::new(self.forest.clone())
    }

    /// Whether section `section_id` is shown; false for anything else
    #[must_use]
    pub fn is_visible(&self, section_id: ElementId) -> bool {
        layoupy_tree::find_by_id(&self.forest, section_id)
            .and_then(Element::as_section)
            .is_some_and(|section| RadioIndex::build(&self.forest).is_visible(section, &self.answers))
    }

    /// Ids of every section currently shown, pre-order
    #[must_use]
    pub fn visible_sections(&self) -> Vec<ElementId> {
        visible_sections(&self.forest, &self.answers)
    }

    /// Render projection of the current state
    #[must_use]
    pub fn view(&self) -> CanvasView<'_> {
        CanvasView::build(&self.forest, &self.answers)
    }

    /// Process one event
    ///
    /// # Errors
    /// Returns error only for answers rejected by the answer policy;
    /// structural misses come back as [`Outcome::Unchanged`]
    pub fn apply(&mut self, event: CompositionEvent) -> Result<Outcome, CompositionError> {
        let kind = event.kind();
        let step = match event {
            CompositionEvent::SelectAnswer { radio_id, value } => {
                return self.select_answer(radio_id, value);
            }
            CompositionEvent::DropIntoCanvas { payload } => match payload.origin {
                DropOrigin::Palette => {
                    Step::Edit(TreeEdit::AppendTopLevel(self.fresh_copy(&payload)))
                }
                DropOrigin::Canvas { source_id } => match self.config.canvas_drop {
                    CanvasDropPolicy::Ignore => Step::Skip(Unchanged::CanvasSelfDrop),
                    CanvasDropPolicy::MoveToEnd => Step::Edit(TreeEdit::Relocate {
                        id: source_id,
                        container: None,
                    }),
                },
            },
            CompositionEvent::DropIntoSection {
                section_id,
                payload,
            } => match payload.origin {
                DropOrigin::Palette => Step::Edit(TreeEdit::InsertInto {
                    container: section_id,
                    element: self.fresh_copy(&payload),
                }),
                DropOrigin::Canvas { source_id } => Step::Edit(TreeEdit::Relocate {
                    id: source_id,
                    container: Some(section_id),
                }),
            },
            CompositionEvent::DropIntoPalette { payload } => match payload.origin {
                DropOrigin::Palette => Step::Skip(Unchanged::FromPalette),
                DropOrigin::Canvas { source_id } => Step::Edit(TreeEdit::Remove(source_id)),
            },
            CompositionEvent::Delete { id } => Step::Edit(TreeEdit::Remove(id)),
            CompositionEvent::ActivateStage { id } => Step::Edit(TreeEdit::ActivateStage(id)),
        };

        let outcome = match step {
            Step::Skip(reason) => Outcome::Unchanged(reason),
            Step::Edit(edit) => self.commit(kind, edit),
        };
        self.log(kind, outcome);
        Ok(outcome)
    }

    /// Process events in order, stopping at the first rejected one
    ///
    /// # Errors
    /// Returns the first error from [`Self::apply`]
    pub fn apply_all(
        &mut self,
        events: impl IntoIterator<Item = CompositionEvent>,
    ) -> Result<Vec<Outcome>, CompositionError> {
        events.into_iter().map(|event| self.apply(event)).collect()
    }

    /// Palette copies get fresh ids and arrive with every stage inactive
    fn fresh_copy(&mut self, payload: &DropPayload) -> Element {
        deactivate_stages(clone_with_ids(&payload.element, self.ids.as_mut()))
    }

    fn commit(&mut self, kind: EventKind, edit: TreeEdit) -> Outcome {
        let removes = matches!(edit, TreeEdit::Remove(_));
        let result = edit.apply(&self.forest);
        if let Err(miss) = result.status {
            return Outcome::Unchanged(miss.into());
        }
        self.forest = result.forest;

        if removes && self.config.prune_stale_answers {
            let dropped = self.answers.retain_known(&self.forest);
            if dropped > 0 {
                tracing::debug!("Dropped {} answers of removed radios", dropped);
            }
        }
        self.persist();
        Outcome::Changed(kind)
    }

    fn select_answer(&mut self, radio_id: ElementId, value: String) -> Result<Outcome, CompositionError> {
        if let Err(err) = self.config.answer_policy.check(&self.forest, radio_id, &value) {
            tracing::debug!("Rejected answer for {}: {}", radio_id.short(), err);
            self.journal
                .record(EventKind::SelectAnswer, JournalOutcome::Rejected(err.to_string()));
            return Err(err.into());
        }
        self.answers.set_answer(radio_id, value);
        let outcome = Outcome::Changed(EventKind::SelectAnswer);
        self.log(EventKind::SelectAnswer, outcome);
        Ok(outcome)
    }

    fn persist(&mut self) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let snapshot = ForestSnapshot::new(self.forest.clone());
        if let Err(err) = sink.persist(&snapshot) {
            tracing::warn!("Snapshot not persisted: {}", err);
        }
    }

    fn log(&mut self, kind: EventKind, outcome: Outcome) {
        let entry = match outcome {
            Outcome::Changed(_) => {
                tracing::info!("Applied {} ({} elements)", kind, self.forest.total_len());
                JournalOutcome::Changed
            }
            Outcome::Unchanged(reason) => {
                tracing::debug!("Ignored {}: {}", kind, reason);
                JournalOutcome::Unchanged(reason.to_string())
            }
        };
        self.journal.record(kind, entry);
    }
}

impl Default for CompositionSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Debug for CompositionSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionSession")
            .field("forest", &self.forest)
            .field("answers", &self.answers)
            .field("config", &self.config)
            .field("journal_len", &self.journal.len())
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}
