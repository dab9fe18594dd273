//! Testing utilities for Layoupy workspace
//!
//! Shared fixtures, proptest strategies, and assertions.

#![allow(missing_docs)]

use layoupy_element::{
    ButtonElement, Condition, Element, ElementId, Forest, RadioElement, SectionElement,
    StageElement, TextElement, TextKind,
};
use proptest::prelude::*;
use std::collections::HashSet;

pub fn id(n: u128) -> ElementId {
    ElementId::from_u128(n)
}

pub fn text(n: u128, content: &str) -> Element {
    TextElement::new(id(n), content, TextKind::Statement).into()
}

pub fn radio(n: u128, name: &str, options: &[&str]) -> Element {
    RadioElement::new(id(n), name, options.iter().copied()).into()
}

pub fn button(n: u128, label: &str) -> Element {
    ButtonElement::new(id(n), label).into()
}

pub fn section(n: u128, title: &str, children: Vec<Element>) -> Element {
    SectionElement::new(id(n), title).with_children(children).into()
}

pub fn gated_section(
    n: u128,
    title: &str,
    depends_on: &str,
    value: &str,
    children: Vec<Element>,
) -> Element {
    SectionElement::new(id(n), title)
        .with_condition(Condition::new(depends_on, value))
        .with_children(children)
        .into()
}

pub fn stage(n: u128, name: &str, active: bool) -> Element {
    let mut stage = StageElement::new(id(n), name, "person");
    stage.is_active = active;
    stage.into()
}

/// Call-script forest used across crates:
///
/// ```text
/// stage 1 "Intro" (active)
/// stage 2 "Close"
/// radio 3 AreYouAdult [Yes, No]
/// section 4 "Adults" if AreYouAdult=Yes
///   text 5
///   section 6 "Plans" if Plan=Plus
///     button 7
/// radio 8 Plan [Basic, Plus]
/// ```
pub fn call_script() -> Forest {
    Forest::from(vec![
        stage(1, "Intro", true),
        stage(2, "Close", false),
        radio(3, "AreYouAdult", &["Yes", "No"]),
        gated_section(
            4,
            "Adults",
            "AreYouAdult",
            "Yes",
            vec![
                text(5, "Read the <b>disclosure</b>"),
                gated_section(6, "Plans", "Plan", "Plus", vec![button(7, "Upgrade")]),
            ],
        ),
        radio(8, "Plan", &["Basic", "Plus"]),
    ])
}

/// Rewrite ids in pre-order as `start`, `start + 1`, ...
pub fn renumber(forest: &Forest, start: u128) -> Forest {
    let mut next = start;
    forest
        .iter()
        .map(|element| renumber_element(element, &mut next))
        .collect()
}

fn renumber_element(element: &Element, next: &mut u128) -> Element {
    let new_id = id(*next);
    *next += 1;
    match element {
        Element::Section(section) => {
            let children = section
                .children
                .iter()
                .map(|child| renumber_element(child, next))
                .collect();
            Element::Section(SectionElement {
                id: new_id,
                title: section.title.clone(),
                condition: section.condition.clone(),
                children,
            })
        }
        _ => element.clone().with_id(new_id),
    }
}

pub fn assert_unique_ids(forest: &Forest) {
    let ids = forest.ids();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate ids in {ids:?}");
}

const NAMES: &[&str] = &["AreYouAdult", "Plan", "Smoker"];
const OPTIONS: &[&str] = &["Yes", "No", "Basic", "Plus"];

fn arb_condition() -> impl Strategy<Value = Option<Condition>> {
    prop::option::of(
        (prop::sample::select(NAMES), prop::sample::select(OPTIONS))
            .prop_map(|(name, value)| Condition::new(name, value)),
    )
}

fn arb_leaf() -> impl Strategy<Value = Element> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(|t| text(0, &t)),
        (
            prop::sample::select(NAMES),
            prop::collection::vec(prop::sample::select(OPTIONS), 2..4)
        )
            .prop_map(|(name, options)| radio(0, name, &options)),
        "[A-Z][a-z]{0,6}".prop_map(|l| button(0, &l)),
        ("[A-Z][a-z]{0,6}", any::<bool>()).prop_map(|(n, active)| stage(0, &n, active)),
    ]
}

/// Arbitrary element tree (ids not yet unique, see [`arb_forest`])
pub fn arb_element() -> impl Strategy<Value = Element> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        (
            "[A-Z][a-z]{0,6}",
            arb_condition(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(title, condition, children)| {
                let mut section = SectionElement::new(id(0), title).with_children(children);
                section.condition = condition;
                section.into()
            })
    })
}

/// Arbitrary forest with unique ids starting at 1
pub fn arb_forest() -> impl Strategy<Value = Forest> {
    prop::collection::vec(arb_element(), 0..6)
        .prop_map(|elements| renumber(&Forest::from(elements), 1))
}
