//! Section visibility
//!
//! A section without a condition is always shown. A gated section is shown
//! only when the radio its condition names exists somewhere in the forest
//! and its current answer equals the condition's value. Everything else
//! (no such radio, no answer, another answer) hides it. Conditions do not
//! chain: a section nested in a hidden section is still evaluated on its own
//! condition only.

use crate::answers::AnswerStore;
use crate::index::RadioIndex;
use layoupy_element::{Element, ElementId, Forest, SectionElement};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Outcome of evaluating a section, with the reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// No condition
    Unconditional,
    /// Condition met
    Satisfied,
    /// Referenced radio has no answer yet
    Unanswered,
    /// Referenced radio holds a different value
    Mismatch,
    /// No radio has the referenced name
    DanglingReference,
}

impl Visibility {
    /// Whether the section is shown
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Unconditional | Self::Satisfied)
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unconditional => "always",
            Self::Satisfied => "shown",
            Self::Unanswered => "hidden (unanswered)",
            Self::Mismatch => "hidden (other answer)",
            Self::DanglingReference => "hidden (no such radio)",
        })
    }
}

/// Whether `section` is shown, given the whole `forest` and `answers`
#[must_use]
pub fn is_visible(section: &SectionElement, forest: &Forest, answers: &AnswerStore) -> bool {
    explain(section, forest, answers).is_visible()
}

/// [`is_visible`] with the reason
#[must_use]
pub fn explain(section: &SectionElement, forest: &Forest, answers: &AnswerStore) -> Visibility {
    judge(section, answers, |name| {
        forest
            .walk()
            .filter_map(Element::as_radio)
            .find(|r| r.name == name)
            .map(|r| r.id)
    })
}

/// Evaluate `section` with `radio_for` resolving a radio name to its id
pub(crate) fn judge(
    section: &SectionElement,
    answers: &AnswerStore,
    radio_for: impl FnOnce(&str) -> Option<ElementId>,
) -> Visibility {
    let Some(condition) = &section.condition else {
        return Visibility::Unconditional;
    };
    let Some(radio_id) = radio_for(&condition.depends_on) else {
        return Visibility::DanglingReference;
    };
    match answers.get_answer(radio_id) {
        None => Visibility::Unanswered,
        Some(value) if value == condition.value => Visibility::Satisfied,
        Some(_) => Visibility::Mismatch,
    }
}

/// Ids of every section, at any depth, that is visible on its own condition
#[must_use]
pub fn visible_sections(forest: &Forest, answers: &AnswerStore) -> Vec<ElementId> {
    let index = RadioIndex::build(forest);
    forest
        .walk()
        .filter_map(Element::as_section)
        .filter(|s| index.is_visible(s, answers))
        .map(|s| s.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoupy_test_utils::{call_script, gated_section, id, radio, section};
    use pretty_assertions::assert_eq;

    fn section_of(forest: &Forest, n: u128) -> SectionElement {
        forest
            .walk()
            .filter_map(Element::as_section)
            .find(|s| s.id == id(n))
            .cloned()
            .unwrap()
    }

    #[test]
    fn unconditional_section_is_visible() {
        let forest = Forest::from(vec![section(1, "plain", vec![])]);
        let s = section_of(&forest, 1);
        assert_eq!(explain(&s, &forest, &AnswerStore::new()), Visibility::Unconditional);
    }

    #[test]
    fn gated_section_follows_answer() {
        let forest = call_script();
        let adults = section_of(&forest, 4);
        let mut answers = AnswerStore::new();

        assert_eq!(explain(&adults, &forest, &answers), Visibility::Unanswered);
        answers.set_answer(id(3), "Yes");
        assert_eq!(explain(&adults, &forest, &answers), Visibility::Satisfied);
        answers.set_answer(id(3), "No");
        assert_eq!(explain(&adults, &forest, &answers), Visibility::Mismatch);
    }

    #[test]
    fn dangling_reference_is_hidden() {
        let forest = Forest::from(vec![gated_section(1, "ghost", "Nobody", "Yes", vec![])]);
        let s = section_of(&forest, 1);
        let mut answers = AnswerStore::new();
        answers.set_answer(id(1), "Yes");
        assert_eq!(explain(&s, &forest, &answers), Visibility::DanglingReference);
        assert!(!is_visible(&s, &forest, &answers));
    }

    #[test]
    fn radio_nested_in_section_is_found() {
        let forest = Forest::from(vec![
            section(1, "wrapper", vec![radio(2, "Inner", &["A", "B"])]),
            gated_section(3, "gated", "Inner", "B", vec![]),
        ]);
        let mut answers = AnswerStore::new();
        answers.set_answer(id(2), "B");
        assert!(is_visible(&section_of(&forest, 3), &forest, &answers));
    }

    #[test]
    fn nested_conditions_do_not_chain() {
        let forest = call_script();
        let mut answers = AnswerStore::new();
        answers.set_answer(id(8), "Plus");
        // "Plans" (6) sits inside hidden "Adults" (4) but is judged alone
        assert_eq!(visible_sections(&forest, &answers), vec![id(6)]);
        answers.set_answer(id(3), "Yes");
        assert_eq!(visible_sections(&forest, &answers), vec![id(4), id(6)]);
    }

    #[test]
    fn judge_uses_resolved_radio() {
        let forest = Forest::from(vec![gated_section(1, "g", "Pick", "A", vec![])]);
        let s = section_of(&forest, 1);
        let mut answers = AnswerStore::new();
        answers.set_answer(id(9), "A");
        assert_eq!(judge(&s, &answers, |_| Some(id(9))), Visibility::Satisfied);
        assert_eq!(judge(&s, &answers, |_| Some(id(8))), Visibility::Unanswered);
        assert_eq!(judge(&s, &answers, |_| None), Visibility::DanglingReference);
    }

    #[test]
    fn index_and_tree_search_agree() {
        let forest = call_script();
        let index = RadioIndex::build(&forest);
        let mut answers = AnswerStore::new();
        answers.set_answer(id(3), "Yes");
        for s in forest.walk().filter_map(Element::as_section) {
            assert_eq!(index.explain(s, &answers), explain(s, &forest, &answers));
        }
    }
}
