//! Forest integrity checks
//!
//! Operations in this crate preserve id uniqueness and the single active
//! stage by construction. Forests that arrive from outside (a stored
//! snapshot, a hand-edited script) are checked here before a session adopts
//! them.

use layoupy_element::{Element, ElementId, Forest};
use std::collections::HashSet;

/// Structural problems found in a forest
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The same id appears on two nodes
    #[error("duplicate element id {id} ({first} and {second})")]
    DuplicateId {
        id: ElementId,
        first: String,
        second: String,
    },

    /// More than one stage has `is_active` set
    #[error("stages {first} and {second} are both active")]
    MultipleActiveStages { first: ElementId, second: ElementId },
}

/// Verify every id is unique across all depths
///
/// # Errors
/// Returns the first duplicate found in pre-order
pub fn check_integrity(forest: &Forest) -> Result<(), TreeError> {
    let mut seen: HashSet<ElementId> = HashSet::with_capacity(forest.total_len());
    for element in forest.walk() {
        if !seen.insert(element.id()) {
            let first = forest
                .walk()
                .find(|e| e.id() == element.id())
                .map_or_else(String::new, describe);
            return Err(TreeError::DuplicateId {
                id: element.id(),
                first,
                second: describe(element),
            });
        }
    }
    Ok(())
}

/// Verify at most one stage, at any depth, is active
///
/// # Errors
/// Returns the first two active stages found in pre-order
pub fn check_stage_activity(forest: &Forest) -> Result<(), TreeError> {
    let mut active = forest
        .walk()
        .filter_map(Element::as_stage)
        .filter(|s| s.is_active)
        .map(|s| s.id);
    match (active.next(), active.next()) {
        (Some(first), Some(second)) => Err(TreeError::MultipleActiveStages { first, second }),
        _ => Ok(()),
    }
}

fn describe(element: &Element) -> String {
    format!("{} '{}'", element.kind(), element.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoupy_element::{ButtonElement, SectionElement, StageElement};

    fn stage(n: u128, active: bool) -> Element {
        let mut stage = StageElement::new(ElementId::from_u128(n), "step", "person");
        stage.is_active = active;
        stage.into()
    }

    #[test]
    fn unique_forest_passes() {
        let s = SectionElement::new(ElementId::from_u128(1), "s")
            .with_children(vec![ButtonElement::new(ElementId::from_u128(2), "b").into()]);
        assert!(check_integrity(&Forest::from(vec![s.into()])).is_ok());
        assert!(check_integrity(&Forest::new()).is_ok());
    }

    #[test]
    fn duplicate_across_depths_is_reported() {
        let dup = ElementId::from_u128(7);
        let s = SectionElement::new(ElementId::from_u128(1), "outer")
            .with_children(vec![ButtonElement::new(dup, "inner").into()]);
        let forest = Forest::from(vec![ButtonElement::new(dup, "top").into(), s.into()]);

        let err = check_integrity(&forest).unwrap_err();
        assert_eq!(
            err,
            TreeError::DuplicateId {
                id: dup,
                first: "button 'top'".to_string(),
                second: "button 'inner'".to_string(),
            }
        );
    }

    #[test]
    fn one_active_stage_passes() {
        let forest = Forest::from(vec![stage(1, true), stage(2, false)]);
        assert!(check_stage_activity(&forest).is_ok());
        assert!(check_stage_activity(&Forest::new()).is_ok());
    }

    #[test]
    fn nested_second_active_stage_is_reported() {
        let s = SectionElement::new(ElementId::from_u128(3), "s").with_children(vec![stage(4, true)]);
        let forest = Forest::from(vec![stage(1, true), stage(2, false), s.into()]);
        assert_eq!(
            check_stage_activity(&forest),
            Err(TreeError::MultipleActiveStages {
                first: ElementId::from_u128(1),
                second: ElementId::from_u128(4),
            })
        );
    }
}
