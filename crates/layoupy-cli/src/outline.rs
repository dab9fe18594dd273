//! Plain-text outline of a canvas

use layoupy_composition::{CanvasView, ViewNode};
use layoupy_element::{markup, Element};
use layoupy_visibility::AnswerStore;
use std::fmt::Write;

/// Render `view` as an indented outline, one element per line
///
/// Sections show their visibility; radios show the recorded answer.
pub(crate) fn render(view: &CanvasView<'_>, answers: &AnswerStore) -> String {
    let mut out = String::new();
    if !view.stages.is_empty() {
        let stages: Vec<String> = view
            .stages
            .iter()
            .map(|s| {
                if s.is_active {
                    format!("[{}]", s.name)
                } else {
                    s.name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "stages: {}", stages.join(" > "));
    }
    for node in &view.body {
        render_node(&mut out, node, answers, 0);
    }
    out
}

fn render_node(out: &mut String, node: &ViewNode<'_>, answers: &AnswerStore, depth: usize) {
    let indent = "  ".repeat(depth);
    let line = match node.element {
        Element::Text(text) => format!("text ({:?}): {}", text.text_type, markup::strip_inline(&text.text)),
        Element::Radio(radio) => {
            let answer = answers.get_answer(radio.id).unwrap_or("-");
            format!("radio {} ({}) = {}", radio.name, radio.options.join("|"), answer)
        }
        Element::Button(button) => format!("button: {}", button.label),
        Element::Section(section) => {
            let state = node.visibility.map_or_else(String::new, |v| format!(" [{v}]"));
            format!("section {}{}", section.title, state)
        }
        Element::Stage(stage) => format!("stage {}{}", stage.name, if stage.is_active { " *" } else { "" }),
    };
    let _ = writeln!(out, "{indent}{line}");
    for child in &node.children {
        render_node(out, child, answers, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoupy_test_utils::{call_script, id};

    #[test]
    fn outline_shows_stages_answers_and_visibility() {
        let forest = call_script();
        let mut answers = AnswerStore::new();
        answers.set_answer(id(3), "Yes");
        let text = render(&CanvasView::build(&forest, &answers), &answers);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "stages: [Intro] > Close");
        assert_eq!(lines[1], "radio AreYouAdult (Yes|No) = Yes");
        assert_eq!(lines[2], "section Adults [shown]");
        assert_eq!(lines[3], "  text (Statement): Read the disclosure");
        assert_eq!(lines[4], "  section Plans [hidden (unanswered)]");
        assert_eq!(lines[5], "    button: Upgrade");
        assert_eq!(lines[6], "radio Plan (Basic|Plus) = -");
    }
}
