//! Markers shared with the host page: the exclusion class and the inline
//! style values the overlay writes.

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId};

/// Class token that opts an element and its subtree out of painting and picking.
pub const DEFAULT_EXCLUSION_CLASS: &str = "ruio-exclude";

/// Inline style applied to every painted element.
pub const DEFAULT_BORDER_PROPERTY: &str = "outline";
pub const DEFAULT_BORDER_VALUE: &str = "1px solid rgba(255, 0, 0, 0.75)";

/// Inline style applied to the current hover candidate.
pub const DEFAULT_HOVER_PROPERTY: &str = "box-shadow";
pub const DEFAULT_HOVER_VALUE: &str = "inset 0 0 0 2px rgba(0, 120, 255, 0.9)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionMarker {
    class: String,
}

impl ExclusionMarker {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Whether the element itself bears the marker.
    pub fn marks(&self, document: &Document, id: NodeId) -> bool {
        document.has_class(id, &self.class)
    }

    /// Outermost marked element among `id` and its ancestors.
    pub fn outermost_excluded(&self, document: &Document, id: NodeId) -> Option<NodeId> {
        document
            .inclusive_ancestors(id)
            .filter(|ancestor| self.marks(document, *ancestor))
            .last()
    }

    /// Whether `id` sits inside an excluded subtree (itself included).
    pub fn excludes(&self, document: &Document, id: NodeId) -> bool {
        document
            .inclusive_ancestors(id)
            .any(|ancestor| self.marks(document, ancestor))
    }

    /// Nearest element at or above `id` that is outside every excluded subtree.
    pub fn nearest_selectable(&self, document: &Document, id: NodeId) -> Option<NodeId> {
        match self.outermost_excluded(document, id) {
            None => Some(id),
            Some(excluded) => document.parent(excluded),
        }
    }
}

impl Default for ExclusionMarker {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSION_CLASS)
    }
}

/// One inline style property/value pair owned by the overlay.
///
/// An element carries the marker only when the property holds exactly this
/// value. Applying keeps the host's own value for the property and clearing
/// puts it back, so a painted element ends up exactly as the host left it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMarker {
    pub property: String,
    pub value: String,
}

impl StyleMarker {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn border() -> Self {
        Self::new(DEFAULT_BORDER_PROPERTY, DEFAULT_BORDER_VALUE)
    }

    pub fn hover() -> Self {
        Self::new(DEFAULT_HOVER_PROPERTY, DEFAULT_HOVER_VALUE)
    }

    pub fn is_applied(&self, document: &Document, id: NodeId) -> bool {
        document.style(id, &self.property) == Some(self.value.as_str())
    }

    /// Returns `true` when the element did not already carry the marker.
    pub fn apply(&self, document: &mut Document, id: NodeId) -> bool {
        document.overlay_style(id, &self.property, &self.value)
    }

    /// Removes the marker if present, restoring the host's value for the
    /// property. Returns `true` when something was removed.
    pub fn clear(&self, document: &mut Document, id: NodeId) -> bool {
        document.restore_style(id, &self.property, &self.value)
    }
}
