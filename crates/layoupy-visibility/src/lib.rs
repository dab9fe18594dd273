//! Layoupy Visibility
//!
//! Decides which conditional sections are shown, given the answers recorded
//! so far.
//!
//! # Overview
//!
//! - **[`is_visible`]** / **[`explain`]**: evaluate one section against the
//!   whole forest
//! - **[`RadioIndex`]**: name-to-radio lookup for evaluating many sections
//!   over one snapshot
//! - **[`AnswerStore`]**: selected option per radio id, last write wins
//! - **[`AnswerPolicy`]**: permissive or strict checking of selections
//!
//! # Example
//!
//! ```rust
//! use layoupy_element::{Condition, Element, Forest};
//! use layoupy_visibility::{is_visible, AnswerStore};
//!
//! let radio = Element::radio("AreYouAdult", ["Yes", "No"]);
//! let radio_id = radio.id();
//! let section = Element::section("Adults", Some(Condition::new("AreYouAdult", "Yes")));
//! let forest = Forest::from(vec![radio, section.clone()]);
//! let section = section.as_section().unwrap();
//!
//! let mut answers = AnswerStore::new();
//! assert!(!is_visible(section, &forest, &answers));
//! answers.set_answer(radio_id, "Yes");
//! assert!(is_visible(section, &forest, &answers));
//! ```

#![warn(missing_docs)]

pub mod answers;
pub mod evaluator;
pub mod index;

// Re-exports
pub use answers::{AnswerError, AnswerPolicy, AnswerStore};
pub use evaluator::{explain, is_visible, visible_sections, Visibility};
pub use index::RadioIndex;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
