//! Read-only projection for renderers
//!
//! Top-level stages form the step bar and are split from the body. Every
//! section in the body carries its evaluated [`Visibility`]; hidden sections
//! keep their children in the structure so a renderer can decide how to
//! show them.

use layoupy_element::{Element, ElementId, Forest, StageElement};
use layoupy_visibility::{AnswerStore, RadioIndex, Visibility};

/// One body element with its evaluated visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode<'a> {
    /// The element itself
    pub element: &'a Element,
    /// `Some` for sections only
    pub visibility: Option<Visibility>,
    /// Child nodes, for sections
    pub children: Vec<ViewNode<'a>>,
}

impl ViewNode<'_> {
    /// Whether this node itself is shown (non-sections always are)
    #[inline]
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.visibility.map_or(true, Visibility::is_visible)
    }
}

/// Forest split for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasView<'a> {
    /// Every stage, in pre-order
    pub stages: Vec<&'a StageElement>,
    /// Top-level non-stage elements
    pub body: Vec<ViewNode<'a>>,
}

impl<'a> CanvasView<'a> {
    /// Project `forest` under `answers`
    #[must_use]
    pub fn build(forest: &'a Forest, answers: &AnswerStore) -> Self {
        let index = RadioIndex::build(forest);
        let mut stages = Vec::new();
        let mut body = Vec::new();
        for element in forest {
            match element {
                Element::Stage(stage) => stages.push(stage),
                other => body.push(node(other, &index, answers)),
            }
        }
        Self { stages, body }
    }

    /// The active top-level stage
    #[must_use]
    pub fn active_stage(&self) -> Option<&'a StageElement> {
        self.stages.iter().copied().find(|s| s.is_active)
    }

    /// Ids of body elements actually shown, in pre-order
    ///
    /// A hidden section hides its whole subtree.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        collect_shown(&self.body, &mut out);
        out
    }
}

fn node<'a>(element: &'a Element, index: &RadioIndex, answers: &AnswerStore) -> ViewNode<'a> {
    let visibility = element.as_section().map(|s| index.explain(s, answers));
    let children = element
        .children()
        .unwrap_or_default()
        .iter()
        .map(|child| node(child, index, answers))
        .collect();
    ViewNode {
        element,
        visibility,
        children,
    }
}

fn collect_shown(nodes: &[ViewNode<'_>], out: &mut Vec<ElementId>) {
    for node in nodes.iter().filter(|n| n.is_shown()) {
        out.push(node.element.id());
        collect_shown(&node.children, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoupy_test_utils::{call_script, id};
    use pretty_assertions::assert_eq;

    #[test]
    fn stages_are_split_from_body() {
        let forest = call_script();
        let view = CanvasView::build(&forest, &AnswerStore::new());
        let stage_ids: Vec<_> = view.stages.iter().map(|s| s.id).collect();
        assert_eq!(stage_ids, vec![id(1), id(2)]);
        assert_eq!(view.active_stage().map(|s| s.id), Some(id(1)));
        assert_eq!(view.body.len(), 3);
    }

    #[test]
    fn hidden_section_keeps_children_but_hides_them() {
        let forest = call_script();
        let view = CanvasView::build(&forest, &AnswerStore::new());
        let adults = &view.body[1];
        assert_eq!(adults.visibility, Some(Visibility::Unanswered));
        assert_eq!(adults.children.len(), 2);
        assert_eq!(view.visible_ids(), vec![id(3), id(8)]);
    }

    #[test]
    fn nested_gates_are_evaluated_independently() {
        let forest = call_script();
        let mut answers = AnswerStore::new();
        answers.set_answer(id(3), "Yes");
        let view = CanvasView::build(&forest, &answers);
        assert_eq!(view.visible_ids(), vec![id(3), id(4), id(5), id(8)]);

        answers.set_answer(id(8), "Plus");
        let view = CanvasView::build(&forest, &answers);
        assert_eq!(
            view.visible_ids(),
            vec![id(3), id(4), id(5), id(6), id(7), id(8)]
        );
    }
}
