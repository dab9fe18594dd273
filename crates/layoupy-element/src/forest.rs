//! Forest: the ordered top-level sequence of a document
//!
//! Provides [`Forest`] and [`Walk`], a pre-order, left-to-right traversal
//! over every element at every depth.

use crate::element::Element;
use crate::id::ElementId;
use serde::{Deserialize, Serialize};

/// Top-level sequence of elements
///
/// Sections nest further sequences; the whole structure is a tree whose ids
/// are unique at every depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest(Vec<Element>);

impl Forest {
    /// Empty forest
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Top-level elements in order
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.0
    }

    /// Take ownership of the top-level elements
    #[inline]
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.0
    }

    /// Number of top-level elements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No top-level elements
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of elements at every depth
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.0.iter().map(Element::subtree_len).sum()
    }

    /// Pre-order traversal over every element
    #[inline]
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.0)
    }

    /// Every id in traversal order
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.walk().map(Element::id).collect()
    }

    /// Top-level iterator
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.0.iter()
    }
}

impl From<Vec<Element>> for Forest {
    fn from(elements: Vec<Element>) -> Self {
        Self(elements)
    }
}

impl FromIterator<Element> for Forest {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Pre-order, left-to-right iterator over a forest
///
/// Each section is yielded before its children, and its children before the
/// section's next sibling.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, Element>>,
}

impl<'a> Walk<'a> {
    /// Walk a sequence of elements
    #[inline]
    #[must_use]
    pub fn new(elements: &'a [Element]) -> Self {
        Self {
            stack: vec![elements.iter()],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(element) => {
                    if let Some(children) = element.children() {
                        self.stack.push(children.iter());
                    }
                    return Some(element);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ButtonElement, SectionElement};
    use pretty_assertions::assert_eq;

    fn id(n: u128) -> ElementId {
        ElementId::from_u128(n)
    }

    fn sample() -> Forest {
        let inner = SectionElement::new(id(3), "inner")
            .with_children(vec![ButtonElement::new(id(4), "b").into()]);
        let outer = SectionElement::new(id(1), "outer")
            .with_children(vec![ButtonElement::new(id(2), "a").into(), inner.into()]);
        Forest::from(vec![outer.into(), ButtonElement::new(id(5), "c").into()])
    }

    #[test]
    fn walk_is_preorder_left_to_right() {
        assert_eq!(sample().ids(), vec![id(1), id(2), id(3), id(4), id(5)]);
    }

    #[test]
    fn counts() {
        let forest = sample();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.total_len(), 5);
        assert!(Forest::new().is_empty());
        assert_eq!(Forest::new().walk().count(), 0);
    }

    #[test]
    fn serializes_as_bare_array() {
        let json = serde_json::to_value(Forest::new()).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }
}
