//! Sources of fresh element ids
//!
//! Cloning a subtree needs one new id per node. [`RandomIds`] is what a live
//! session uses; [`SequentialIds`] makes replays and tests reproducible.

use layoupy_element::ElementId;

/// Issues ids that have never been handed out before
pub trait IdSource {
    /// Next fresh id
    fn next_id(&mut self) -> ElementId;
}

/// Random v4 ids
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    #[inline]
    fn next_id(&mut self) -> ElementId {
        ElementId::generate()
    }
}

/// Deterministic, monotonically increasing ids
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// First id issued is `start`
    #[inline]
    #[must_use]
    pub fn starting_at(start: u128) -> Self {
        Self { next: start }
    }

    /// Value the next call will use
    #[inline]
    #[must_use]
    pub fn peek(&self) -> u128 {
        self.next
    }
}

impl Default for SequentialIds {
    /// Starts high enough to stay clear of hand-numbered fixture ids
    fn default() -> Self {
        Self::starting_at(1 << 64)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> ElementId {
        let id = ElementId::from_u128(self.next);
        self.next += 1;
        id
    }
}

impl<S: IdSource + ?Sized> IdSource for &mut S {
    #[inline]
    fn next_id(&mut self) -> ElementId {
        (**self).next_id()
    }
}

impl IdSource for Box<dyn IdSource + Send> {
    #[inline]
    fn next_id(&mut self) -> ElementId {
        (**self).next_id()
    }
}
