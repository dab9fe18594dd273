//! Element variants
//!
//! Defines [`Element`], the closed set of node kinds a document is composed
//! of. Every structural operation and the visibility evaluator match on it
//! exhaustively, so adding a variant is a compile error until each of them
//! handles it.
//!
//! The serialized form is internally tagged on `"type"` with camelCase
//! fields, e.g. `{"type":"stage","id":"…","name":"Intro","icon":"person","isActive":false}`.

use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Icon key a renderer falls back to when a stage's key is unknown
pub const DEFAULT_STAGE_ICON: &str = "person";

/// One node of a forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// Free-form text
    Text(TextElement),

    /// Single-select question
    Radio(RadioElement),

    /// Display-only button
    Button(ButtonElement),

    /// Container gated on an optional condition
    Section(SectionElement),

    /// Step marker of a multi-stage flow
    Stage(StageElement),
}

/// Fieldless mirror of [`Element`]'s variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// [`Element::Text`]
    Text,
    /// [`Element::Radio`]
    Radio,
    /// [`Element::Button`]
    Button,
    /// [`Element::Section`]
    Section,
    /// [`Element::Stage`]
    Stage,
}

impl ElementKind {
    /// Serialized tag
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Radio => "radio",
            Self::Button => "button",
            Self::Section => "section",
            Self::Stage => "stage",
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Element {
    /// Element id
    #[inline]
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Text(e) => e.id,
            Self::Radio(e) => e.id,
            Self::Button(e) => e.id,
            Self::Section(e) => e.id,
            Self::Stage(e) => e.id,
        }
    }

    /// Variant tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Radio(_) => ElementKind::Radio,
            Self::Button(_) => ElementKind::Button,
            Self::Section(_) => ElementKind::Section,
            Self::Stage(_) => ElementKind::Stage,
        }
    }

    /// Same element under a different id (children untouched)
    #[must_use]
    pub fn with_id(self, id: ElementId) -> Self {
        match self {
            Self::Text(e) => Self::Text(TextElement { id, ..e }),
            Self::Radio(e) => Self::Radio(RadioElement { id, ..e }),
            Self::Button(e) => Self::Button(ButtonElement { id, ..e }),
            Self::Section(e) => Self::Section(SectionElement { id, ..e }),
            Self::Stage(e) => Self::Stage(StageElement { id, ..e }),
        }
    }

    /// Children, if this element is a container
    #[inline]
    #[must_use]
    pub fn children(&self) -> Option<&[Element]> {
        match self {
            Self::Section(s) => Some(&s.children),
            Self::Text(_) | Self::Radio(_) | Self::Button(_) | Self::Stage(_) => None,
        }
    }

    /// Whether elements can be inserted into this one
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    /// Section view
    #[inline]
    #[must_use]
    pub fn as_section(&self) -> Option<&SectionElement> {
        match self {
            Self::Section(s) => Some(s),
            _ => None,
        }
    }

    /// Radio view
    #[inline]
    #[must_use]
    pub fn as_radio(&self) -> Option<&RadioElement> {
        match self {
            Self::Radio(r) => Some(r),
            _ => None,
        }
    }

    /// Stage view
    #[inline]
    #[must_use]
    pub fn as_stage(&self) -> Option<&StageElement> {
        match self {
            Self::Stage(s) => Some(s),
            _ => None,
        }
    }

    /// Number of elements in this subtree, itself included
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(Element::subtree_len).sum())
    }

    /// Short human label used in logs and outlines
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text(e) => &e.text,
            Self::Radio(e) => &e.name,
            Self::Button(e) => &e.label,
            Self::Section(e) => &e.title,
            Self::Stage(e) => &e.name,
        }
    }

    /// New text element with a fresh id
    #[must_use]
    pub fn text(text: impl Into<String>, text_type: TextKind) -> Self {
        Self::Text(TextElement::new(ElementId::generate(), text, text_type))
    }

    /// New radio element with a fresh id
    #[must_use]
    pub fn radio<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Radio(RadioElement::new(ElementId::generate(), name, options))
    }

    /// New button element with a fresh id
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self::Button(ButtonElement::new(ElementId::generate(), label))
    }

    /// New, empty section with a fresh id
    #[must_use]
    pub fn section(title: impl Into<String>, condition: Option<Condition>) -> Self {
        let mut section = SectionElement::new(ElementId::generate(), title);
        section.condition = condition;
        Self::Section(section)
    }

    /// New inactive stage with a fresh id
    #[must_use]
    pub fn stage(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self::Stage(StageElement::new(ElementId::generate(), name, icon))
    }
}

impl From<TextElement> for Element {
    fn from(e: TextElement) -> Self {
        Self::Text(e)
    }
}

impl From<RadioElement> for Element {
    fn from(e: RadioElement) -> Self {
        Self::Radio(e)
    }
}

impl From<ButtonElement> for Element {
    fn from(e: ButtonElement) -> Self {
        Self::Button(e)
    }
}

impl From<SectionElement> for Element {
    fn from(e: SectionElement) -> Self {
        Self::Section(e)
    }
}

impl From<StageElement> for Element {
    fn from(e: StageElement) -> Self {
        Self::Stage(e)
    }
}

/// Presentation subtype of a text element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextKind {
    /// Plain statement read to the caller
    #[default]
    Statement,
    /// Note for the agent only
    AgentNote,
    /// Must be read word for word
    VerbatimDisclosure,
    /// Question asked to the caller
    RegularQuestion,
}

/// Free-form text, may carry inline markup (see [`crate::markup`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Unique element id
    pub id: ElementId,
    /// Content, possibly with inline markup
    pub text: String,
    /// Presentation role
    #[serde(default)]
    pub text_type: TextKind,
}

impl TextElement {
    /// Create text element
    #[must_use]
    pub fn new(id: ElementId, text: impl Into<String>, text_type: TextKind) -> Self {
        Self {
            id,
            text: text.into(),
            text_type,
        }
    }
}

/// Single-select question
///
/// `name` is the handle sections refer to in their [`Condition`]. Naming
/// rules and option bounds are enforced by whoever creates the element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioElement {
    /// Unique element id
    pub id: ElementId,
    /// Name conditions refer to
    pub name: String,
    /// Selectable options, in display order
    pub options: Vec<String>,
}

impl RadioElement {
    /// Create radio element
    #[must_use]
    pub fn new<I, S>(id: ElementId, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `value` is one of the declared options
    #[inline]
    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// Display-only button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonElement {
    /// Unique element id
    pub id: ElementId,
    /// Caption
    pub label: String,
}

impl ButtonElement {
    /// Create button element
    #[must_use]
    pub fn new(id: ElementId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Visibility gate of a section: shown when the radio named `depends_on`
/// currently holds `value`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Name of the radio to check
    pub depends_on: String,
    /// Option that shows the section
    pub value: String,
}

impl Condition {
    /// Create condition
    #[inline]
    #[must_use]
    pub fn new(depends_on: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            depends_on: depends_on.into(),
            value: value.into(),
        }
    }
}

/// Container element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionElement {
    /// Unique element id
    pub id: ElementId,
    /// Heading
    pub title: String,
    /// Gate; `None` means always shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Nested elements, in order
    #[serde(default)]
    pub children: Vec<Element>,
}

impl SectionElement {
    /// Create an unconditional, empty section
    #[must_use]
    pub fn new(id: ElementId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            condition: None,
            children: Vec::new(),
        }
    }

    /// Gate on a condition
    #[inline]
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Replace children
    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }
}

/// Step marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageElement {
    /// Unique element id
    pub id: ElementId,
    /// Display name
    pub name: String,
    /// Opaque key into the renderer's icon registry
    pub icon: String,
    /// Whether this is the current step
    #[serde(default)]
    pub is_active: bool,
}

impl StageElement {
    /// Create an inactive stage
    #[must_use]
    pub fn new(id: ElementId, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: icon.into(),
            is_active: false,
        }
    }
}
