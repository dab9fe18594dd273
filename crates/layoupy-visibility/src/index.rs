//! Radio name index
//!
//! Sections refer to radios by `name`, not by id. [`RadioIndex`] resolves
//! those names once per forest snapshot instead of searching the tree for
//! every section.

use crate::answers::AnswerStore;
use crate::evaluator::{judge, Visibility};
use layoupy_element::{Element, ElementId, Forest, SectionElement};
use std::collections::HashMap;

/// Radio lookup built from one forest snapshot
///
/// If two radios share a name (creation is supposed to prevent it), the
/// first in pre-order wins, matching a tree search.
#[derive(Debug, Clone, Default)]
pub struct RadioIndex {
    by_name: HashMap<String, ElementId>,
    options: HashMap<ElementId, Vec<String>>,
}

impl RadioIndex {
    /// Index every radio in `forest`
    #[must_use]
    pub fn build(forest: &Forest) -> Self {
        let mut index = Self::default();
        for radio in forest.walk().filter_map(Element::as_radio) {
            index.by_name.entry(radio.name.clone()).or_insert(radio.id);
            index.options.insert(radio.id, radio.options.clone());
        }
        index
    }

    /// Id of the radio named `name`
    #[inline]
    #[must_use]
    pub fn radio_id(&self, name: &str) -> Option<ElementId> {
        self.by_name.get(name).copied()
    }

    /// Declared options of radio `id`
    #[inline]
    #[must_use]
    pub fn options(&self, id: ElementId) -> Option<&[String]> {
        self.options.get(&id).map(Vec::as_slice)
    }

    /// Whether a radio with this name exists
    #[inline]
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct radio names
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// No radios indexed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Visibility of `section` under `answers`, with the reason
    #[must_use]
    pub fn explain(&self, section: &SectionElement, answers: &AnswerStore) -> Visibility {
        judge(section, answers, |name| self.radio_id(name))
    }

    /// Whether `section` is shown under `answers`
    #[inline]
    #[must_use]
    pub fn is_visible(&self, section: &SectionElement, answers: &AnswerStore) -> bool {
        self.explain(section, answers).is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoupy_test_utils::{call_script, id, radio};

    #[test]
    fn indexes_nested_radios() {
        let index = RadioIndex::build(&call_script());
        assert_eq!(index.len(), 2);
        assert_eq!(index.radio_id("AreYouAdult"), Some(id(3)));
        assert_eq!(index.radio_id("Plan"), Some(id(8)));
        assert_eq!(
            index.options(id(8)),
            Some(&["Basic".to_string(), "Plus".to_string()][..])
        );
        assert!(!index.contains_name("Missing"));
    }

    #[test]
    fn first_radio_wins_on_duplicate_names() {
        let forest = Forest::from(vec![
            radio(1, "Dup", &["A", "B"]),
            radio(2, "Dup", &["C", "D"]),
        ]);
        assert_eq!(RadioIndex::build(&forest).radio_id("Dup"), Some(id(1)));
    }
}
