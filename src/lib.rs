//! Ruio Library
//!
//! An in-page DOM inspection overlay: highlights nested elements down to a
//! configurable depth and lets a user pick a single live element by hovering
//! and clicking.
//!
//! # Module Overview
//!
//! - [`dom`] - Live document model, input events and snapshot loading
//! - [`marker`] - Exclusion marker and the style markers the overlay writes
//! - [`depth`] - Validated traversal depth
//! - [`painter`] - Depth-limited border painting
//! - [`picker`] - Interactive element picking sessions
//! - [`orchestrator`] - Owner of overlay state; composes painter and picker
//! - [`config`] - Configuration file support
//! - [`types`] - Serializable snapshot types
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use ruio_lib::dom::snapshot::document_from_snapshot;
//! use ruio_lib::{Config, DomEvent, DomSnapshot, Orchestrator, PickOutcome};
//!
//! # fn example(snapshot: DomSnapshot) -> ruio_lib::Result<()> {
//! let document = document_from_snapshot(&snapshot)?.into_shared();
//! let root = document.borrow().root();
//! let mut overlay = Orchestrator::mount(document.clone(), root, &Config::default());
//!
//! overlay.set_depth(3);
//! overlay.set_borders_enabled(true);
//! overlay.select_element_mode();
//! if let PickOutcome::Selected(element) = overlay.dispatch(&DomEvent::click(40.0, 12.0)) {
//!     assert_eq!(overlay.selected_element(), Some(element));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod depth;
pub mod dom;
pub mod error;
pub mod marker;
pub mod orchestrator;
pub mod output;
pub mod painter;
pub mod picker;
pub mod types;

pub use config::{Config, DepthSettings};
pub use depth::Depth;
pub use dom::{Document, DomEvent, NodeId, SharedDocument};
pub use error::{Result, RuioError, OUTSIDE_ORCHESTRATOR_MESSAGE};
pub use marker::{ExclusionMarker, StyleMarker};
pub use orchestrator::{Orchestrator, OverlayHandle, SelectMode};
pub use output::{
    ErrorOutput, EventRecord, OutcomeKind, PaintOutput, PickOutput, RuioOutput,
    RUIO_OUTPUT_VERSION,
};
pub use painter::{BorderPainter, PaintReport, Painter};
pub use picker::{ElementPicker, PickOutcome, SessionId};
pub use types::{BoundingBox, DomNode, DomSnapshot, Point};
