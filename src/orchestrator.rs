//! Owner of the overlay's visible state.
//!
//! The [`Orchestrator`] holds `depth`, `borders_enabled` and `selected_element`,
//! decides when the painter runs, and keeps at most one picking session alive.
//! Consumers that only need to read state (a control widget, a status line)
//! take an [`OverlayHandle`]; reads through a handle whose orchestrator is gone
//! panic with [`OUTSIDE_ORCHESTRATOR_MESSAGE`].

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::config::{Config, DepthSettings};
use crate::depth::Depth;
use crate::dom::{DomEvent, NodeId, SharedDocument};
use crate::error::{Result, RuioError, OUTSIDE_ORCHESTRATOR_MESSAGE};
use crate::painter::{BorderPainter, PaintReport, Painter};
use crate::picker::{ElementPicker, PickOutcome};

#[derive(Debug)]
struct OverlayState {
    depth: Cell<Depth>,
    borders_enabled: Cell<bool>,
    selected_element: Cell<Option<NodeId>>,
    select_mode_active: Cell<bool>,
}

/// Read-only view of an orchestrator's state.
#[derive(Debug, Clone, Default)]
pub struct OverlayHandle {
    state: Weak<OverlayState>,
}

impl OverlayHandle {
    /// A handle not attached to any orchestrator; every read fails.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.state.strong_count() > 0
    }

    fn try_state(&self) -> Result<Rc<OverlayState>> {
        self.state.upgrade().ok_or(RuioError::Uninitialized)
    }

    fn state(&self) -> Rc<OverlayState> {
        match self.state.upgrade() {
            Some(state) => state,
            None => panic!("{}", OUTSIDE_ORCHESTRATOR_MESSAGE),
        }
    }

    pub fn try_depth(&self) -> Result<Depth> {
        Ok(self.try_state()?.depth.get())
    }

    pub fn try_borders_enabled(&self) -> Result<bool> {
        Ok(self.try_state()?.borders_enabled.get())
    }

    pub fn try_selected_element(&self) -> Result<Option<NodeId>> {
        Ok(self.try_state()?.selected_element.get())
    }

    /// # Panics
    /// When the orchestrator is gone or the handle was never bound.
    pub fn depth(&self) -> Depth {
        self.state().depth.get()
    }

    /// # Panics
    /// When the orchestrator is gone or the handle was never bound.
    pub fn borders_enabled(&self) -> bool {
        self.state().borders_enabled.get()
    }

    /// # Panics
    /// When the orchestrator is gone or the handle was never bound.
    pub fn selected_element(&self) -> Option<NodeId> {
        self.state().selected_element.get()
    }

    /// # Panics
    /// When the orchestrator is gone or the handle was never bound.
    pub fn select_mode_active(&self) -> bool {
        self.state().select_mode_active.get()
    }
}

/// Result of [`Orchestrator::select_element_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    Started,
    /// A session was already running; nothing changed.
    AlreadyActive,
    /// Borders are off, so picking is not offered.
    BordersDisabled,
}

pub struct Orchestrator<P: Painter = BorderPainter> {
    document: SharedDocument,
    root: NodeId,
    state: Rc<OverlayState>,
    depth_bounds: DepthSettings,
    painter: P,
    picker: ElementPicker,
    hovered: Option<NodeId>,
    painted_root: Option<NodeId>,
    last_paint: PaintReport,
    torn_down: bool,
}

impl<P: Painter> std::fmt::Debug for Orchestrator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("picker", &self.picker)
            .field("hovered", &self.hovered)
            .field("painted_root", &self.painted_root)
            .finish_non_exhaustive()
    }
}

impl Orchestrator<BorderPainter> {
    /// Mounts an overlay over `root` using the painter and markers from `config`.
    pub fn mount(document: SharedDocument, root: NodeId, config: &Config) -> Self {
        let painter = config.painter();
        Self::mount_with_painter(document, root, config, painter)
    }
}

impl<P: Painter> Orchestrator<P> {
    /// Mounts with a custom painter. Starts with borders off, no selection and
    /// the configured default depth, and clears any border left under `root`.
    pub fn mount_with_painter(
        document: SharedDocument,
        root: NodeId,
        config: &Config,
        painter: P,
    ) -> Self {
        let state = Rc::new(OverlayState {
            depth: Cell::new(config.depth.initial()),
            borders_enabled: Cell::new(false),
            selected_element: Cell::new(None),
            select_mode_active: Cell::new(false),
        });
        let mut orchestrator = Self {
            document,
            root,
            state,
            depth_bounds: config.depth,
            painter,
            picker: ElementPicker::new(config.exclusion()),
            hovered: None,
            painted_root: None,
            last_paint: PaintReport::default(),
            torn_down: false,
        };
        tracing::debug!(%root, depth = %orchestrator.depth(), "overlay mounted");
        orchestrator.repaint();
        orchestrator
    }

    pub fn handle(&self) -> OverlayHandle {
        OverlayHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn depth(&self) -> Depth {
        self.state.depth.get()
    }

    pub fn borders_enabled(&self) -> bool {
        self.state.borders_enabled.get()
    }

    pub fn selected_element(&self) -> Option<NodeId> {
        self.state.selected_element.get()
    }

    pub fn select_mode_active(&self) -> bool {
        self.picker.is_active()
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// Report of the most recent painting pass over the current paint root.
    pub fn last_paint(&self) -> &PaintReport {
        &self.last_paint
    }

    /// The selection when there is one, otherwise the mounted root.
    pub fn paint_root(&self) -> NodeId {
        self.selected_element().unwrap_or(self.root)
    }

    /// Clamps `value` into the configured bounds and repaints if borders are on.
    pub fn set_depth(&mut self, value: i64) -> Depth {
        let depth = self.depth_bounds.clamp(value);
        if i64::from(depth.get()) != value {
            tracing::debug!(requested = value, %depth, "depth clamped");
        }
        self.state.depth.set(depth);
        if self.borders_enabled() {
            self.repaint();
        }
        depth
    }

    /// Parses raw widget input. Non-numeric input is ignored and leaves state unchanged.
    pub fn set_depth_input(&mut self, input: &str) -> Option<Depth> {
        match input.trim().parse::<i64>() {
            Ok(value) => Some(self.set_depth(value)),
            Err(_) => {
                tracing::warn!(input, "ignoring non-numeric depth input");
                None
            }
        }
    }

    /// Turns borders on or off and repaints. Turning them off also ends any picking session.
    pub fn set_borders_enabled(&mut self, enabled: bool) {
        self.state.borders_enabled.set(enabled);
        if !enabled {
            self.end_select_mode();
        }
        tracing::info!(enabled, "borders toggled");
        self.repaint();
    }

    /// Enters picking mode.
    ///
    /// Re-entering while a session is active is a no-op, so there is never
    /// more than one session. Picking is refused while borders are disabled.
    pub fn select_element_mode(&mut self) -> SelectMode {
        if self.picker.is_active() {
            tracing::debug!("select mode already active");
            return SelectMode::AlreadyActive;
        }
        if !self.borders_enabled() {
            tracing::debug!("select mode refused: borders disabled");
            return SelectMode::BordersDisabled;
        }

        let state = Rc::downgrade(&self.state);
        let mut document = self.document.borrow_mut();
        self.picker.start(&mut document, move |element| {
            if let Some(state) = state.upgrade() {
                state.selected_element.set(Some(element));
            }
        });
        drop(document);
        self.state.select_mode_active.set(true);
        SelectMode::Started
    }

    /// Ends picking mode without a selection. Returns `false` if none was active.
    pub fn end_select_mode(&mut self) -> bool {
        let ended = {
            let mut document = self.document.borrow_mut();
            let ended = self.picker.teardown(&mut document);
            self.painter.preview(&mut document, self.hovered.take(), None);
            ended
        };
        self.state.select_mode_active.set(false);
        ended
    }

    /// Routes a document event to the active session, if any.
    pub fn dispatch(&mut self, event: &DomEvent) -> PickOutcome {
        let previous_root = self.paint_root();
        let outcome = {
            let mut document = self.document.borrow_mut();
            let outcome = self.picker.handle_event(&mut document, event);
            match outcome {
                PickOutcome::Hovered { current, .. } => {
                    self.painter.preview(&mut document, self.hovered, current);
                    self.hovered = current;
                }
                PickOutcome::Selected(_) | PickOutcome::Cancelled => {
                    self.painter.preview(&mut document, self.hovered.take(), None);
                }
                PickOutcome::Ignored | PickOutcome::Suppressed => {}
            }
            outcome
        };

        match outcome {
            PickOutcome::Selected(element) => {
                self.state.select_mode_active.set(false);
                tracing::info!(%element, "element selected");
                if self.paint_root() != previous_root {
                    self.repaint();
                }
            }
            PickOutcome::Cancelled => self.state.select_mode_active.set(false),
            _ => {}
        }
        outcome
    }

    /// Clears the selection; painting falls back to the mounted root.
    pub fn reset_selection(&mut self) {
        if self.state.selected_element.take().is_some() {
            tracing::info!("selection reset");
            self.repaint();
        }
    }

    /// Re-runs the painter for the current paint root, depth and enabled flag.
    ///
    /// When the paint root moved since the last enabled pass, the old root is
    /// cleared first.
    pub fn repaint(&mut self) -> &PaintReport {
        let root = self.paint_root();
        let depth = self.depth().get();
        let enabled = self.borders_enabled();
        {
            let mut document = self.document.borrow_mut();
            if let Some(stale) = self.painted_root.filter(|stale| *stale != root) {
                self.painter.paint(&mut document, Some(stale), depth, false);
            }
            self.last_paint = self.painter.paint(&mut document, Some(root), depth, enabled);
        }
        self.painted_root = enabled.then_some(root);
        &self.last_paint
    }

    /// Tears down explicitly. Equivalent to dropping the orchestrator.
    pub fn shutdown(self) {}

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let Ok(mut document) = self.document.try_borrow_mut() else {
            tracing::error!("document borrowed during overlay teardown; styling left in place");
            return;
        };
        self.picker.teardown(&mut document);
        self.painter.preview(&mut document, self.hovered.take(), None);
        let depth = self.state.depth.get().get();
        if let Some(painted) = self.painted_root.take().filter(|p| *p != self.root) {
            self.painter.paint(&mut document, Some(painted), depth, false);
        }
        self.painter.paint(&mut document, Some(self.root), depth, false);
        self.state.select_mode_active.set(false);
        tracing::debug!(root = %self.root, "overlay torn down");
    }
}

impl<P: Painter> Drop for Orchestrator<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
