//! Structural edits
//!
//! A [`TreeEdit`] names one change to a forest, addressed by id. Callers
//! decide which edits a user action means; [`TreeEdit::apply`] carries them
//! out with the pure operations in [`crate::ops`] and reports whether the
//! forest actually changed.

use crate::ops;
use layoupy_element::{Element, ElementId, Forest};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// One structural change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEdit {
    /// Append to the top-level sequence
    AppendTopLevel(Element),

    /// Append to the children of a section
    InsertInto {
        container: ElementId,
        element: Element,
    },

    /// Remove an element and its subtree
    Remove(ElementId),

    /// Move an existing element, keeping its id
    ///
    /// `container: None` moves it to the end of the top-level sequence.
    Relocate {
        id: ElementId,
        container: Option<ElementId>,
    },

    /// Make one stage the only active stage
    ActivateStage(ElementId),
}

/// Why an edit left the forest as it was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Miss {
    /// Target container or element is not in the forest
    TargetMissing,
    /// Element to move is not in the forest
    SourceMissing,
    /// Target lies inside the element being moved
    WouldCreateCycle,
}

impl Display for Miss {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TargetMissing => "target missing",
            Self::SourceMissing => "source missing",
            Self::WouldCreateCycle => "target inside moved element",
        })
    }
}

/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// Forest after the edit; an unchanged copy on a miss
    pub forest: Forest,
    /// Why nothing changed, if it didn't
    pub status: Result<(), Miss>,
}

impl EditResult {
    #[inline]
    fn applied(forest: Forest) -> Self {
        Self {
            forest,
            status: Ok(()),
        }
    }

    #[inline]
    fn missed(forest: &Forest, miss: Miss) -> Self {
        Self {
            forest: forest.clone(),
            status: Err(miss),
        }
    }

    /// Whether the forest changed
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.status.is_ok()
    }
}

impl TreeEdit {
    /// Id the edit is addressed to
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::AppendTopLevel(_) => None,
            Self::InsertInto { container, .. } => Some(*container),
            Self::Remove(id) | Self::ActivateStage(id) => Some(*id),
            Self::Relocate { container, id } => container.or(Some(*id)),
        }
    }

    /// Apply to `forest`, leaving it untouched
    #[must_use]
    pub fn apply(self, forest: &Forest) -> EditResult {
        match self {
            Self::AppendTopLevel(element) => {
                EditResult::applied(ops::append_top_level(forest, element))
            }
            Self::InsertInto { container, element } => {
                match ops::try_insert_into_container(forest, container, element) {
                    Some(next) => EditResult::applied(next),
                    None => EditResult::missed(forest, Miss::TargetMissing),
                }
            }
            Self::Remove(id) => match ops::take_by_id(forest, id) {
                (next, Some(_)) => EditResult::applied(next),
                (_, None) => EditResult::missed(forest, Miss::TargetMissing),
            },
            Self::Relocate { id, container } => relocate(forest, id, container),
            Self::ActivateStage(id) => {
                let is_stage = ops::find_by_id(forest, id).is_some_and(|e| e.as_stage().is_some());
                if is_stage {
                    EditResult::applied(ops::activate_stage(forest, id))
                } else {
                    EditResult::missed(forest, Miss::TargetMissing)
                }
            }
        }
    }
}

/// Remove-then-insert, checked up front so a failed move never loses the
/// element
fn relocate(forest: &Forest, id: ElementId, container: Option<ElementId>) -> EditResult {
    if !ops::contains_id(forest, id) {
        return EditResult::missed(forest, Miss::SourceMissing);
    }
    if let Some(container) = container {
        let is_section = ops::find_by_id(forest, container).is_some_and(Element::is_container);
        if !is_section {
            return EditResult::missed(forest, Miss::TargetMissing);
        }
        if container == id || ops::is_descendant_of(forest, id, container) {
            return EditResult::missed(forest, Miss::WouldCreateCycle);
        }
    }

    let (without, taken) = ops::take_by_id(forest, id);
    let Some(element) = taken else {
        return EditResult::missed(forest, Miss::SourceMissing);
    };
    match container {
        None => EditResult::applied(ops::append_top_level(&without, element)),
        Some(container) => match ops::try_insert_into_container(&without, container, element) {
            Some(next) => EditResult::applied(next),
            None => EditResult::missed(forest, Miss::TargetMissing),
        },
    }
}

/// Apply edits in order, each on the previous result
///
/// Returns the final forest and one status per edit.
#[must_use]
pub fn apply_all(forest: &Forest, edits: Vec<TreeEdit>) -> (Forest, Vec<Result<(), Miss>>) {
    let mut current = forest.clone();
    let mut statuses = Vec::with_capacity(edits.len());
    for edit in edits {
        let result = edit.apply(&current);
        current = result.forest;
        statuses.push(result.status);
    }
    (current, statuses)
}
