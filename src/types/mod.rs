//! Plain data types shared across the overlay.
//!
//! - [`core`] - geometry used for hit-testing
//! - [`dom`] - serializable DOM snapshot format

pub mod core;
pub mod dom;

pub use self::core::{BoundingBox, Point};
pub use self::dom::{DomNode, DomSnapshot};
