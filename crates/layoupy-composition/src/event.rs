//! Structural and answer events
//!
//! What the host UI reports once a gesture has settled: a drop resolved to a
//! target, a delete click, a stage click, an option selection.

use layoupy_element::{Element, ElementId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Where a dragged element came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum DropOrigin {
    /// A palette template; dropping it creates a copy
    Palette,
    /// An element already on the canvas; dropping it moves it
    Canvas { source_id: ElementId },
}

/// Element carried by a drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPayload {
    /// Element being dragged
    pub element: Element,
    /// Where the drag started
    pub origin: DropOrigin,
}

impl DropPayload {
    /// Payload dragged from the palette
    #[inline]
    #[must_use]
    pub fn from_palette(element: Element) -> Self {
        Self {
            element,
            origin: DropOrigin::Palette,
        }
    }

    /// Payload dragged from the canvas
    #[inline]
    #[must_use]
    pub fn from_canvas(element: Element) -> Self {
        let source_id = element.id();
        Self {
            element,
            origin: DropOrigin::Canvas { source_id },
        }
    }
}

/// One settled user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CompositionEvent {
    /// Dropped on the canvas background
    DropIntoCanvas { payload: DropPayload },

    /// Dropped on a section
    DropIntoSection {
        section_id: ElementId,
        payload: DropPayload,
    },

    /// Dropped back on the palette (removes a canvas element)
    DropIntoPalette { payload: DropPayload },

    /// Delete button
    Delete { id: ElementId },

    /// Stage clicked
    ActivateStage { id: ElementId },

    /// Option selected on a radio
    SelectAnswer { radio_id: ElementId, value: String },
}

impl CompositionEvent {
    /// Event tag
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DropIntoCanvas { .. } => EventKind::DropIntoCanvas,
            Self::DropIntoSection { .. } => EventKind::DropIntoSection,
            Self::DropIntoPalette { .. } => EventKind::DropIntoPalette,
            Self::Delete { .. } => EventKind::Delete,
            Self::ActivateStage { .. } => EventKind::ActivateStage,
            Self::SelectAnswer { .. } => EventKind::SelectAnswer,
        }
    }

    /// Whether the event edits the forest (as opposed to answer state)
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::SelectAnswer { .. })
    }
}

/// Fieldless mirror of [`CompositionEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// [`CompositionEvent::DropIntoCanvas`]
    DropIntoCanvas,
    /// [`CompositionEvent::DropIntoSection`]
    DropIntoSection,
    /// [`CompositionEvent::DropIntoPalette`]
    DropIntoPalette,
    /// [`CompositionEvent::Delete`]
    Delete,
    /// [`CompositionEvent::ActivateStage`]
    ActivateStage,
    /// [`CompositionEvent::SelectAnswer`]
    SelectAnswer,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DropIntoCanvas => "drop_into_canvas",
            Self::DropIntoSection => "drop_into_section",
            Self::DropIntoPalette => "drop_into_palette",
            Self::Delete => "delete",
            Self::ActivateStage => "activate_stage",
            Self::SelectAnswer => "select_answer",
        })
    }
}
