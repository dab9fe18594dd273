//! Answer state
//!
//! Provides [`AnswerStore`], the per-session record of which option is
//! selected on each radio, and [`AnswerPolicy`], which decides whether a
//! selection must be one of the radio's declared options.

use indexmap::IndexMap;
use layoupy_element::{Element, ElementId, Forest};
use serde::{Deserialize, Serialize};

/// Selected option per radio id
///
/// Last write wins. Iteration follows the order radios were first answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    values: IndexMap<ElementId, String>,
}

impl AnswerStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `radio_id`, returning the previous value
    pub fn set_answer(&mut self, radio_id: ElementId, value: impl Into<String>) -> Option<String> {
        self.values.insert(radio_id, value.into())
    }

    /// Current value for `radio_id`
    #[inline]
    #[must_use]
    pub fn get_answer(&self, radio_id: ElementId) -> Option<&str> {
        self.values.get(&radio_id).map(String::as_str)
    }

    /// Number of answered radios
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Nothing answered yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Answers in first-answered order
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &str)> + '_ {
        self.values.iter().map(|(id, v)| (*id, v.as_str()))
    }

    /// Drop answers whose radio is no longer in `forest`
    ///
    /// Returns how many were dropped.
    pub fn retain_known(&mut self, forest: &Forest) -> usize {
        let before = self.values.len();
        let radios: std::collections::HashSet<ElementId> = forest
            .walk()
            .filter_map(Element::as_radio)
            .map(|r| r.id)
            .collect();
        self.values.retain(|id, _| radios.contains(id));
        before - self.values.len()
    }
}

/// How strictly selections are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPolicy {
    /// Accept any value for any id
    #[default]
    Permissive,
    /// Value must be a declared option of a radio in the forest
    Strict,
}

/// Rejected selection under [`AnswerPolicy::Strict`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    /// No radio with this id
    #[error("no radio with id {0}")]
    UnknownRadio(ElementId),

    /// Value is not a declared option
    #[error("'{value}' is not an option of radio '{name}'")]
    NotAnOption { name: String, value: String },
}

impl AnswerPolicy {
    /// Check a selection against `forest`
    ///
    /// # Errors
    /// Under `Strict`, fails for unknown radios and undeclared values
    pub fn check(self, forest: &Forest, radio_id: ElementId, value: &str) -> Result<(), AnswerError> {
        match self {
            Self::Permissive => Ok(()),
            Self::Strict => {
                let radio = forest
                    .walk()
                    .filter_map(Element::as_radio)
                    .find(|r| r.id == radio_id)
                    .ok_or(AnswerError::UnknownRadio(radio_id))?;
                if radio.has_option(value) {
                    Ok(())
                } else {
                    Err(AnswerError::NotAnOption {
                        name: radio.name.clone(),
                        value: value.to_string(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoupy_test_utils::{button, call_script, id};

    #[test]
    fn last_write_wins() {
        let mut store = AnswerStore::new();
        assert_eq!(store.get_answer(id(3)), None);
        assert_eq!(store.set_answer(id(3), "Yes"), None);
        assert_eq!(store.set_answer(id(3), "No"), Some("Yes".to_string()));
        assert_eq!(store.get_answer(id(3)), Some("No"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn iteration_in_first_answered_order() {
        let mut store = AnswerStore::new();
        store.set_answer(id(8), "Plus");
        store.set_answer(id(3), "Yes");
        store.set_answer(id(8), "Basic");
        let order: Vec<_> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![id(8), id(3)]);
    }

    #[test]
    fn retain_known_drops_stale_answers() {
        let mut store = AnswerStore::new();
        store.set_answer(id(3), "Yes");
        store.set_answer(id(99), "Gone");
        assert_eq!(store.retain_known(&call_script()), 1);
        assert_eq!(store.get_answer(id(3)), Some("Yes"));
    }

    #[test]
    fn permissive_accepts_anything() {
        let forest = Forest::from(vec![button(1, "b")]);
        assert!(AnswerPolicy::Permissive.check(&forest, id(42), "whatever").is_ok());
    }

    #[test]
    fn strict_checks_radio_and_option() {
        let forest = call_script();
        let strict = AnswerPolicy::Strict;
        assert!(strict.check(&forest, id(3), "Yes").is_ok());
        assert_eq!(
            strict.check(&forest, id(3), "Maybe"),
            Err(AnswerError::NotAnOption {
                name: "AreYouAdult".to_string(),
                value: "Maybe".to_string(),
            })
        );
        assert_eq!(
            strict.check(&forest, id(7), "Yes"),
            Err(AnswerError::UnknownRadio(id(7)))
        );
    }

    #[test]
    fn serializes_as_object_keyed_by_id() {
        let mut store = AnswerStore::new();
        store.set_answer(id(3), "Yes");
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["00000000-0000-0000-0000-000000000003"], "Yes");
        let back: AnswerStore = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }
}
