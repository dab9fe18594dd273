//! Layoupy Composition
//!
//! The controller that turns settled UI gestures into forest edits and
//! answer updates for one editing session.
//!
//! # Core Concepts
//!
//! - **[`CompositionSession`]**: owns the forest, answers, journal and sink
//! - **[`CompositionEvent`]**: a drop, delete, stage click or answer
//!   selection; palette drops copy with fresh ids, canvas drops move
//! - **[`Outcome`]**: whether the event changed anything, and if not, why
//! - **[`ForestSnapshot`]**: versioned persistence format, handed to a
//!   [`SnapshotSink`] after every structural change
//! - **[`CanvasView`]**: stages plus body annotated with visibility
//!
//! # Example
//!
//! ```rust
//! use layoupy_composition::{CompositionEvent, CompositionSession, DropPayload, SessionConfig};
//! use layoupy_element::{Element, Forest};
//!
//! let section = Element::section("Details", None);
//! let section_id = section.id();
//! let mut session = CompositionSession::new(SessionConfig::default())
//!     .with_forest(Forest::from(vec![section]))
//!     .unwrap();
//!
//! let outcome = session
//!     .apply(CompositionEvent::DropIntoSection {
//!         section_id,
//!         payload: DropPayload::from_palette(Element::button("Next")),
//!     })
//!     .unwrap();
//!
//! assert!(outcome.is_changed());
//! assert_eq!(session.forest().total_len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod error;
mod event;
mod journal;
mod session;
mod snapshot;
mod view;

// Re-exports
pub use config::{CanvasDropPolicy, SessionConfig};
pub use error::{CompositionError, SnapshotError};
pub use event::{CompositionEvent, DropOrigin, DropPayload, EventKind};
pub use journal::{Journal, JournalEntry, JournalOutcome};
pub use session::{CompositionSession, Outcome, Unchanged};
pub use snapshot::{ForestSnapshot, MemorySink, SnapshotSink, SNAPSHOT_VERSION, STORAGE_KEY};
pub use view::{CanvasView, ViewNode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
