//! Layoupy Tree Operations
//!
//! Pure functions over element forests: clone with fresh identity, remove,
//! insert into a container, search, and stage activation.
//!
//! # Core Concepts
//!
//! - [`ops`]: the operations themselves; input forests are never modified
//! - [`TreeEdit`]: a single id-addressed change, with miss reporting
//! - [`IdSource`]: where cloned subtrees get their new ids
//! - [`check_integrity`] / [`check_stage_activity`]: id uniqueness and the
//!   single active stage, across all depths
//!
//! # Example
//!
//! ```rust
//! use layoupy_element::{Element, Forest};
//! use layoupy_tree::ops;
//!
//! let section = Element::section("Details", None);
//! let section_id = section.id();
//! let forest = Forest::from(vec![section]);
//!
//! let button = ops::clone_with_fresh_identity(&Element::button("Next"));
//! let forest = ops::insert_into_container(&forest, section_id, button);
//!
//! assert_eq!(forest.total_len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod edit;
mod ids;
mod integrity;
pub mod ops;

// Re-exports
pub use edit::{apply_all, EditResult, Miss, TreeEdit};
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use integrity::{check_integrity, check_stage_activity, TreeError};
pub use ops::{
    activate_stage, clone_with_fresh_identity, clone_with_ids, deactivate_stages, find_by_id,
    find_by_predicate, insert_into_container, remove_by_id,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
