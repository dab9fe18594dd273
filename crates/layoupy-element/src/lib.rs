//! Layoupy Element Model
//!
//! Typed nodes of a composed form/script document.
//!
//! # Core Concepts
//!
//! - [`Element`]: closed sum of the five node kinds (text, radio, button,
//!   section, stage)
//! - [`ElementId`]: opaque, globally unique identity of a node
//! - [`Forest`]: the ordered top-level sequence; sections nest further
//!   sequences to unbounded depth
//! - [`Condition`]: name-based reference from a section to a radio
//! - [`markup`]: inline bold/italic/underline spans inside text content
//!
//! # Example
//!
//! ```rust
//! use layoupy_element::{Condition, Element, Forest};
//!
//! let radio = Element::radio("AreYouAdult", ["Yes", "No"]);
//! let section = Element::section("Adults only", Some(Condition::new("AreYouAdult", "Yes")));
//! let forest = Forest::from(vec![radio, section]);
//!
//! assert_eq!(forest.total_len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod element;
mod forest;
mod id;
pub mod markup;

// Re-exports
pub use element::{
    ButtonElement, Condition, Element, ElementKind, RadioElement, SectionElement, StageElement,
    TextElement, TextKind, DEFAULT_STAGE_ICON,
};
pub use forest::{Forest, Walk};
pub use id::{ElementId, IdError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
