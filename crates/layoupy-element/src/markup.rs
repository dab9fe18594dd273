//! Inline markup of text elements
//!
//! Text content may embed a small tag subset: `<strong>`/`<b>` (bold),
//! `<em>`/`<i>` (italic) and `<u>` (underline). Tags do not nest; a closing
//! tag must match its opening tag, anything else stays plain text.

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:strong>(.*?)</strong>|b>(.*?)</b>|em>(.*?)</em>|i>(.*?)</i>|u>(.*?)</u>)")
        .expect("inline tag pattern is valid")
});

/// Style of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanStyle {
    /// Untagged text
    Plain,
    /// `<strong>` or `<b>`
    Bold,
    /// `<em>` or `<i>`
    Italic,
    /// `<u>`
    Underline,
}

/// A run of text with a single style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Style applied to the whole run
    pub style: SpanStyle,
    /// Raw text of the run
    pub text: &'a str,
}

impl<'a> Span<'a> {
    #[inline]
    fn new(style: SpanStyle, text: &'a str) -> Self {
        Self { style, text }
    }
}

/// Split text into styled spans, in order
///
/// Empty input yields no spans.
#[must_use]
pub fn parse_inline(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in INLINE_TAG.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            spans.push(Span::new(SpanStyle::Plain, &text[cursor..whole.start()]));
        }

        // groups: 1 strong, 2 b, 3 em, 4 i, 5 u
        let styled = (1..=5).find_map(|group| caps.get(group).map(|m| (group, m.as_str())));
        let (style, content) = match styled {
            Some((1 | 2, content)) => (SpanStyle::Bold, content),
            Some((3 | 4, content)) => (SpanStyle::Italic, content),
            Some((_, content)) => (SpanStyle::Underline, content),
            None => continue,
        };
        spans.push(Span::new(style, content));
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(Span::new(SpanStyle::Plain, &text[cursor..]));
    }
    spans
}

/// Text with every recognised tag removed
#[must_use]
pub fn strip_inline(text: &str) -> String {
    parse_inline(text).iter().map(|s| s.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_single_span() {
        assert_eq!(
            parse_inline("hello"),
            vec![Span::new(SpanStyle::Plain, "hello")]
        );
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn mixed_tags() {
        let spans = parse_inline("Say <b>hello</b> and <em>wait</em><u>!</u> done");
        assert_eq!(
            spans,
            vec![
                Span::new(SpanStyle::Plain, "Say "),
                Span::new(SpanStyle::Bold, "hello"),
                Span::new(SpanStyle::Plain, " and "),
                Span::new(SpanStyle::Italic, "wait"),
                Span::new(SpanStyle::Underline, "!"),
                Span::new(SpanStyle::Plain, " done"),
            ]
        );
    }

    #[test]
    fn mismatched_closing_tag_stays_plain() {
        let spans = parse_inline("<b>oops</i>");
        assert_eq!(spans, vec![Span::new(SpanStyle::Plain, "<b>oops</i>")]);
    }

    #[test]
    fn shortest_match_wins() {
        let spans = parse_inline("<i>a</i>-<i>b</i>");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0], Span::new(SpanStyle::Italic, "a"));
        assert_eq!(spans[2], Span::new(SpanStyle::Italic, "b"));
    }

    #[test]
    fn strong_and_empty_body() {
        let spans = parse_inline("<strong>x</strong><u></u>");
        assert_eq!(
            spans,
            vec![
                Span::new(SpanStyle::Bold, "x"),
                Span::new(SpanStyle::Underline, ""),
            ]
        );
    }

    #[test]
    fn strip_removes_tags() {
        assert_eq!(strip_inline("a <b>b</b> c"), "a b c");
    }
}
