//! Depth-limited border painting over a live document.
//!
//! Painting is stateless: every call recomputes the border marker for the
//! whole subtree under the root from `(root, max_depth, enabled)`, so repeated
//! calls are idempotent and correct any drift left by host-side mutation.

use std::collections::HashSet;

use crate::dom::{Document, NodeId};
use crate::marker::{ExclusionMarker, StyleMarker};

/// Summary of one painting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaintReport {
    /// Elements carrying the border marker after the pass, in traversal order.
    pub bordered: Vec<NodeId>,
    /// Elements that gained the marker during this pass.
    pub applied: usize,
    /// Elements that lost the marker during this pass.
    pub cleared: usize,
}

/// Anything that can (re)compute border styling for a subtree.
pub trait Painter {
    /// Paints (or clears, when `enabled` is false) the subtree under `root`.
    ///
    /// `root` counts as generation 0; `max_depth` 0 considers only the root.
    /// A missing, unknown, or detached root is a no-op.
    fn paint(
        &self,
        document: &mut Document,
        root: Option<NodeId>,
        max_depth: u32,
        enabled: bool,
    ) -> PaintReport;

    /// Moves the hover preview from `previous` to `next`.
    fn preview(&self, document: &mut Document, previous: Option<NodeId>, next: Option<NodeId>);
}

#[derive(Debug, Clone)]
pub struct BorderPainter {
    border: StyleMarker,
    hover: StyleMarker,
    exclusion: ExclusionMarker,
}

impl Default for BorderPainter {
    fn default() -> Self {
        Self::new(
            StyleMarker::border(),
            StyleMarker::hover(),
            ExclusionMarker::default(),
        )
    }
}

impl BorderPainter {
    pub fn new(border: StyleMarker, hover: StyleMarker, exclusion: ExclusionMarker) -> Self {
        Self {
            border,
            hover,
            exclusion,
        }
    }

    pub fn border(&self) -> &StyleMarker {
        &self.border
    }

    pub fn hover(&self) -> &StyleMarker {
        &self.hover
    }

    pub fn exclusion(&self) -> &ExclusionMarker {
        &self.exclusion
    }

    /// Elements within `max_depth` generations that are outside every excluded subtree.
    fn qualifying(&self, document: &Document, root: NodeId, max_depth: u32) -> Vec<NodeId> {
        let mut out = Vec::new();
        // An excluded ancestor above the root excludes the whole subtree.
        if self.exclusion.excludes(document, root) {
            return out;
        }
        let mut stack = vec![(root, 0u32)];
        while let Some((id, generation)) = stack.pop() {
            if self.exclusion.marks(document, id) {
                continue;
            }
            out.push(id);
            if generation < max_depth {
                stack.extend(
                    document
                        .children(id)
                        .iter()
                        .rev()
                        .map(|child| (*child, generation + 1)),
                );
            }
        }
        out
    }

    fn clear_all(&self, document: &mut Document, root: NodeId) -> usize {
        document
            .descendants(root)
            .into_iter()
            .filter(|id| self.border.clear(document, *id))
            .count()
    }
}

impl Painter for BorderPainter {
    fn paint(
        &self,
        document: &mut Document,
        root: Option<NodeId>,
        max_depth: u32,
        enabled: bool,
    ) -> PaintReport {
        let Some(root) = root.filter(|id| document.is_connected(*id)) else {
            tracing::debug!("paint skipped: root missing or detached");
            return PaintReport::default();
        };

        if !enabled {
            let cleared = self.clear_all(document, root);
            tracing::debug!(%root, cleared, "borders cleared");
            return PaintReport {
                bordered: Vec::new(),
                applied: 0,
                cleared,
            };
        }

        let bordered = self.qualifying(document, root, max_depth);
        let keep: HashSet<NodeId> = bordered.iter().copied().collect();

        let applied = bordered
            .iter()
            .filter(|id| self.border.apply(document, **id))
            .count();
        let cleared = document
            .descendants(root)
            .into_iter()
            .filter(|id| !keep.contains(id))
            .filter(|id| self.border.clear(document, *id))
            .count();

        tracing::debug!(
            %root,
            max_depth,
            bordered = bordered.len(),
            applied,
            cleared,
            "borders painted"
        );
        PaintReport {
            bordered,
            applied,
            cleared,
        }
    }

    fn preview(&self, document: &mut Document, previous: Option<NodeId>, next: Option<NodeId>) {
        if previous == next {
            return;
        }
        if let Some(previous) = previous {
            self.hover.clear(document, previous);
        }
        if let Some(next) = next.filter(|id| !self.exclusion.excludes(document, *id)) {
            self.hover.apply(document, next);
        }
    }
}
