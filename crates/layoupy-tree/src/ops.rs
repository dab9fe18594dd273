//! Pure structural operations
//!
//! Every function takes a forest by reference and returns a new one; the
//! input is never modified. Traversals are pre-order, left to right: a
//! section is inspected before its children, its children before its next
//! sibling. Operations addressed to an id that is not in the forest return
//! an unchanged copy instead of failing, since deletes and drops can race.

use crate::ids::{IdSource, RandomIds};
use layoupy_element::{Element, ElementId, Forest, SectionElement, StageElement};

/// Copy of `element` where every node of the subtree carries a new random id
///
/// All other fields, child order and child count are preserved.
#[must_use]
pub fn clone_with_fresh_identity(element: &Element) -> Element {
    clone_with_ids(element, &mut RandomIds)
}

/// Copy of `element` with ids drawn from `ids`, parent before children
#[must_use]
pub fn clone_with_ids<S: IdSource + ?Sized>(element: &Element, ids: &mut S) -> Element {
    let id = ids.next_id();
    match element {
        Element::Section(section) => {
            let children = section
                .children
                .iter()
                .map(|child| clone_with_ids(child, ids))
                .collect();
            Element::Section(SectionElement {
                id,
                title: section.title.clone(),
                condition: section.condition.clone(),
                children,
            })
        }
        Element::Text(_) | Element::Radio(_) | Element::Button(_) | Element::Stage(_) => {
            element.clone().with_id(id)
        }
    }
}

/// Forest without the element `id` (and its whole subtree)
///
/// Unknown ids leave the forest unchanged.
#[must_use]
pub fn remove_by_id(forest: &Forest, id: ElementId) -> Forest {
    take_by_id(forest, id).0
}

/// Like [`remove_by_id`], also handing back the removed subtree
#[must_use]
pub fn take_by_id(forest: &Forest, id: ElementId) -> (Forest, Option<Element>) {
    match take_in(forest.elements(), id) {
        Some((elements, taken)) => (Forest::from(elements), Some(taken)),
        None => (forest.clone(), None),
    }
}

fn take_in(elements: &[Element], id: ElementId) -> Option<(Vec<Element>, Element)> {
    for (index, element) in elements.iter().enumerate() {
        if element.id() == id {
            let mut rebuilt = elements.to_vec();
            let taken = rebuilt.remove(index);
            return Some((rebuilt, taken));
        }
        if let Element::Section(section) = element {
            if let Some((children, taken)) = take_in(&section.children, id) {
                let mut rebuilt = elements.to_vec();
                rebuilt[index] = with_children(section, children);
                return Some((rebuilt, taken));
            }
        }
    }
    None
}

/// Forest with `element` appended to the children of section `container_id`
///
/// When no section has that id (including when the id names a non-section)
/// the forest is returned unchanged.
#[must_use]
pub fn insert_into_container(forest: &Forest, container_id: ElementId, element: Element) -> Forest {
    try_insert_into_container(forest, container_id, element).unwrap_or_else(|| forest.clone())
}

/// [`insert_into_container`], returning `None` when the container is missing
#[must_use]
pub fn try_insert_into_container(
    forest: &Forest,
    container_id: ElementId,
    element: Element,
) -> Option<Forest> {
    let mut pending = Some(element);
    insert_in(forest.elements(), container_id, &mut pending).map(Forest::from)
}

fn insert_in(
    elements: &[Element],
    container_id: ElementId,
    pending: &mut Option<Element>,
) -> Option<Vec<Element>> {
    for (index, element) in elements.iter().enumerate() {
        let Element::Section(section) = element else {
            continue;
        };
        let children = if section.id == container_id {
            let mut children = section.children.clone();
            children.extend(pending.take());
            Some(children)
        } else {
            insert_in(&section.children, container_id, pending)
        };
        if let Some(children) = children {
            let mut rebuilt = elements.to_vec();
            rebuilt[index] = with_children(section, children);
            return Some(rebuilt);
        }
    }
    None
}

/// Forest with `element` appended to the top-level sequence
#[must_use]
pub fn append_top_level(forest: &Forest, element: Element) -> Forest {
    let mut elements = forest.elements().to_vec();
    elements.push(element);
    Forest::from(elements)
}

/// First element, in pre-order, matching `predicate`
pub fn find_by_predicate<P>(forest: &Forest, predicate: P) -> Option<&Element>
where
    P: FnMut(&&Element) -> bool,
{
    forest.walk().find(predicate)
}

/// Element with the given id, at any depth
#[inline]
#[must_use]
pub fn find_by_id(forest: &Forest, id: ElementId) -> Option<&Element> {
    find_by_predicate(forest, |e| e.id() == id)
}

/// Whether any element at any depth has this id
#[inline]
#[must_use]
pub fn contains_id(forest: &Forest, id: ElementId) -> bool {
    find_by_id(forest, id).is_some()
}

/// Whether `id` lies strictly inside the subtree rooted at `ancestor`
#[must_use]
pub fn is_descendant_of(forest: &Forest, ancestor: ElementId, id: ElementId) -> bool {
    find_by_id(forest, ancestor)
        .and_then(Element::children)
        .is_some_and(|children| layoupy_element::Walk::new(children).any(|e| e.id() == id))
}

/// Forest where stage `id` is the only active stage
///
/// Every stage, at any depth, gets `is_active = (stage.id == id)`; other
/// elements are untouched. If `id` does not name a stage the forest is
/// returned unchanged, so a stale click never clears the active stage.
#[must_use]
pub fn activate_stage(forest: &Forest, id: ElementId) -> Forest {
    let names_stage = find_by_id(forest, id).is_some_and(|e| e.as_stage().is_some());
    if !names_stage {
        return forest.clone();
    }
    Forest::from(set_active(forest.elements(), id))
}

fn set_active(elements: &[Element], id: ElementId) -> Vec<Element> {
    elements
        .iter()
        .map(|element| match element {
            Element::Stage(stage) => Element::Stage(StageElement {
                is_active: stage.id == id,
                ..stage.clone()
            }),
            Element::Section(section) => with_children(section, set_active(&section.children, id)),
            Element::Text(_) | Element::Radio(_) | Element::Button(_) => element.clone(),
        })
        .collect()
}

/// `element` with every stage in its subtree inactive
///
/// Palette templates go through this before they land on the canvas, so a
/// drop never adds a second active stage.
#[must_use]
pub fn deactivate_stages(element: Element) -> Element {
    match element {
        Element::Stage(stage) => Element::Stage(StageElement {
            is_active: false,
            ..stage
        }),
        Element::Section(section) => Element::Section(SectionElement {
            children: section.children.into_iter().map(deactivate_stages).collect(),
            ..section
        }),
        Element::Text(_) | Element::Radio(_) | Element::Button(_) => element,
    }
}

/// Currently active stages, in pre-order
#[must_use]
pub fn active_stages(forest: &Forest) -> Vec<&StageElement> {
    forest
        .walk()
        .filter_map(Element::as_stage)
        .filter(|s| s.is_active)
        .collect()
}

fn with_children(section: &SectionElement, children: Vec<Element>) -> Element {
    Element::Section(SectionElement {
        id: section.id,
        title: section.title.clone(),
        condition: section.condition.clone(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use layoupy_element::{ButtonElement, Condition, RadioElement, TextElement, TextKind};
    use pretty_assertions::assert_eq;

    fn id(n: u128) -> ElementId {
        ElementId::from_u128(n)
    }

    fn button(n: u128) -> Element {
        ButtonElement::new(id(n), format!("b{n}")).into()
    }

    fn section(n: u128, children: Vec<Element>) -> Element {
        SectionElement::new(id(n), format!("s{n}"))
            .with_children(children)
            .into()
    }

    fn stage(n: u128, active: bool) -> Element {
        let mut s = StageElement::new(id(n), format!("stage{n}"), "person");
        s.is_active = active;
        s.into()
    }

    /// [b1, s2[b3, s4[b5]], b6]
    fn sample() -> Forest {
        Forest::from(vec![
            button(1),
            section(2, vec![button(3), section(4, vec![button(5)])]),
            button(6),
        ])
    }

    #[test]
    fn clone_issues_new_ids_parent_first() {
        let original = section(2, vec![button(3), section(4, vec![button(5)])]);
        let mut ids = SequentialIds::starting_at(100);
        let cloned = clone_with_ids(&original, &mut ids);

        let ids_of = |e: &Element| Forest::from(vec![e.clone()]).ids();
        assert_eq!(ids_of(&cloned), vec![id(100), id(101), id(102), id(103)]);
        assert_eq!(cloned.label(), original.label());
        assert_eq!(cloned.subtree_len(), original.subtree_len());
    }

    #[test]
    fn clone_keeps_variant_fields() {
        let radio: Element = RadioElement::new(id(1), "Plan", ["A", "B"]).into();
        let text: Element = TextElement::new(id(2), "<i>x</i>", TextKind::AgentNote).into();
        for original in [radio, text] {
            let cloned = clone_with_fresh_identity(&original);
            assert_ne!(cloned.id(), original.id());
            assert_eq!(cloned.with_id(original.id()), original);
        }
    }

    #[test]
    fn clone_keeps_condition() {
        let s: Element = SectionElement::new(id(1), "gated")
            .with_condition(Condition::new("Plan", "B"))
            .into();
        let cloned = clone_with_fresh_identity(&s);
        assert_eq!(
            cloned.as_section().unwrap().condition,
            Some(Condition::new("Plan", "B"))
        );
    }

    #[test]
    fn remove_nested_element() {
        let forest = remove_by_id(&sample(), id(5));
        assert_eq!(forest.ids(), vec![id(1), id(2), id(3), id(4), id(6)]);
    }

    #[test]
    fn remove_section_removes_subtree() {
        let forest = remove_by_id(&sample(), id(2));
        assert_eq!(forest.ids(), vec![id(1), id(6)]);
    }

    #[test]
    fn remove_unknown_is_unchanged() {
        let forest = sample();
        assert_eq!(remove_by_id(&forest, id(42)), forest);
    }

    #[test]
    fn take_returns_subtree() {
        let (forest, taken) = take_by_id(&sample(), id(4));
        assert_eq!(taken.unwrap().subtree_len(), 2);
        assert_eq!(forest.total_len(), 4);
    }

    #[test]
    fn insert_appends_to_nested_section() {
        let forest = insert_into_container(&sample(), id(4), button(7));
        let s4 = find_by_id(&forest, id(4)).unwrap().as_section().unwrap();
        assert_eq!(
            s4.children.iter().map(Element::id).collect::<Vec<_>>(),
            vec![id(5), id(7)]
        );
    }

    #[test]
    fn insert_into_missing_or_non_section_is_unchanged() {
        let forest = sample();
        assert_eq!(insert_into_container(&forest, id(42), button(7)), forest);
        assert_eq!(insert_into_container(&forest, id(1), button(7)), forest);
        assert!(try_insert_into_container(&forest, id(42), button(7)).is_none());
    }

    #[test]
    fn input_forest_is_not_modified() {
        let forest = sample();
        let before = forest.clone();
        let _ = insert_into_container(&forest, id(2), button(9));
        let _ = remove_by_id(&forest, id(3));
        assert_eq!(forest, before);
    }

    #[test]
    fn find_is_preorder() {
        let forest = sample();
        let first_button = find_by_predicate(&forest, |e| e.id() != id(1) && e.as_section().is_none());
        assert_eq!(first_button.map(Element::id), Some(id(3)));
    }

    #[test]
    fn descendant_check() {
        let forest = sample();
        assert!(is_descendant_of(&forest, id(2), id(5)));
        assert!(!is_descendant_of(&forest, id(2), id(2)));
        assert!(!is_descendant_of(&forest, id(4), id(3)));
        assert!(!is_descendant_of(&forest, id(1), id(3)));
    }

    #[test]
    fn activate_stage_is_exclusive() {
        let forest = Forest::from(vec![stage(1, true), button(2), stage(3, false)]);
        let forest = activate_stage(&forest, id(3));
        let active: Vec<_> = active_stages(&forest).iter().map(|s| s.id).collect();
        assert_eq!(active, vec![id(3)]);
        assert!(find_by_id(&forest, id(2)).is_some());
    }

    #[test]
    fn activate_unknown_stage_is_unchanged() {
        let forest = Forest::from(vec![stage(1, true), button(2)]);
        assert_eq!(activate_stage(&forest, id(2)), forest);
        assert_eq!(activate_stage(&forest, id(99)), forest);
    }

    #[test]
    fn activate_reaches_nested_stage() {
        let forest = Forest::from(vec![stage(1, true), section(2, vec![stage(3, false)])]);
        let forest = activate_stage(&forest, id(3));
        let active: Vec<_> = active_stages(&forest).iter().map(|s| s.id).collect();
        assert_eq!(active, vec![id(3)]);
    }

    #[test]
    fn deactivate_clears_nested_stages_only() {
        let template = section(1, vec![stage(2, true), button(3), section(4, vec![stage(5, true)])]);
        let cleared = deactivate_stages(template);
        let forest = Forest::from(vec![cleared]);
        assert!(active_stages(&forest).is_empty());
        assert_eq!(forest.ids(), vec![id(1), id(2), id(3), id(4), id(5)]);
        assert_eq!(deactivate_stages(button(9)), button(9));
    }
}
