//! Interactive element picking.
//!
//! [`ElementPicker`] is an explicit state machine over one document:
//!
//! ```text
//! Inactive --start--> Active{hover} --click on selectable--> Inactive (on_select fired)
//!                        |   ^                |
//!                        |   +--pointer move--+   (hover candidate updated)
//!                        +--teardown / Escape--> Inactive (on_select dropped)
//! ```
//!
//! While active it owns one document listener per [`EventKind`]; every path
//! back to `Inactive` removes them before returning.

use std::fmt;

use crate::dom::{Document, DomEvent, EventKind, ListenerId, NodeId, CANCEL_KEY};
use crate::marker::ExclusionMarker;
use crate::types::Point;

/// Callback receiving the picked element. Runs at most once per session.
pub type OnSelect = Box<dyn FnOnce(NodeId)>;

/// Identifies one `start`..teardown lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// What a single event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// No active session, no listener for the event, or nothing to act on.
    Ignored,
    /// The hover candidate was recomputed.
    Hovered {
        previous: Option<NodeId>,
        current: Option<NodeId>,
    },
    /// A click landed on excluded chrome; the session stays active.
    Suppressed,
    /// The session resolved with this element.
    Selected(NodeId),
    /// The session was cancelled from the keyboard.
    Cancelled,
}

struct ActiveSession {
    id: SessionId,
    hover: Option<NodeId>,
    listeners: Vec<ListenerId>,
    on_select: OnSelect,
}

impl fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSession")
            .field("id", &self.id)
            .field("hover", &self.hover)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ElementPicker {
    exclusion: ExclusionMarker,
    session: Option<ActiveSession>,
    next_session: u64,
}

impl ElementPicker {
    pub fn new(exclusion: ExclusionMarker) -> Self {
        Self {
            exclusion,
            session: None,
            next_session: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn hover_candidate(&self) -> Option<NodeId> {
        self.session.as_ref().and_then(|s| s.hover)
    }

    /// Starts a session, installing document-wide pointer, click and key listeners.
    ///
    /// A session that is still active is torn down first, so at most one
    /// session exists per picker.
    pub fn start(
        &mut self,
        document: &mut Document,
        on_select: impl FnOnce(NodeId) + 'static,
    ) -> SessionId {
        if let Some(previous) = self.session_id() {
            tracing::warn!(%previous, "picker restarted while a session was active");
            self.teardown(document);
        }

        let id = SessionId(self.next_session);
        self.next_session += 1;
        let listeners = [EventKind::PointerMove, EventKind::Click, EventKind::KeyDown]
            .into_iter()
            .map(|kind| document.add_listener(kind))
            .collect();
        self.session = Some(ActiveSession {
            id,
            hover: None,
            listeners,
            on_select: Box::new(on_select),
        });
        tracing::info!(session = %id, "picker session started");
        id
    }

    /// Ends the active session without selecting. Safe to call at any time.
    ///
    /// Returns `true` when a session was actually torn down.
    pub fn teardown(&mut self, document: &mut Document) -> bool {
        match self.session.take() {
            Some(session) => {
                Self::remove_listeners(document, &session.listeners);
                tracing::info!(session = %session.id, "picker session torn down");
                true
            }
            None => false,
        }
    }

    /// Tears down `id` only if it is still the active session.
    pub fn teardown_session(&mut self, document: &mut Document, id: SessionId) -> bool {
        if self.session_id() == Some(id) {
            self.teardown(document)
        } else {
            false
        }
    }

    /// Feeds one document event through the state machine.
    pub fn handle_event(&mut self, document: &mut Document, event: &DomEvent) -> PickOutcome {
        let Some(session) = self.session.as_ref() else {
            return PickOutcome::Ignored;
        };
        let listening = session
            .listeners
            .iter()
            .any(|l| document.listeners().kind_of(*l) == Some(event.kind()));
        if !listening {
            return PickOutcome::Ignored;
        }

        match event {
            DomEvent::PointerMove { x, y } => {
                let current = self.candidate_at(document, Point::new(*x, *y));
                self.update_hover(current)
            }
            DomEvent::Click { x, y } => self.resolve_click(document, Point::new(*x, *y)),
            DomEvent::KeyDown { key } if key == CANCEL_KEY => {
                self.teardown(document);
                PickOutcome::Cancelled
            }
            DomEvent::KeyDown { .. } => PickOutcome::Ignored,
        }
    }

    /// Topmost selectable element under the point, walking out of excluded chrome.
    pub fn candidate_at(&self, document: &Document, point: Point) -> Option<NodeId> {
        document
            .element_from_point(point)
            .and_then(|target| self.exclusion.nearest_selectable(document, target))
    }

    fn update_hover(&mut self, current: Option<NodeId>) -> PickOutcome {
        let Some(session) = self.session.as_mut() else {
            return PickOutcome::Ignored;
        };
        let previous = std::mem::replace(&mut session.hover, current);
        if previous != current {
            tracing::debug!(session = %session.id, ?current, "hover candidate changed");
        }
        PickOutcome::Hovered { previous, current }
    }

    fn resolve_click(&mut self, document: &mut Document, point: Point) -> PickOutcome {
        let target = document.element_from_point(point);
        if target.is_some_and(|t| self.exclusion.excludes(document, t)) {
            tracing::debug!(?target, "click on excluded element suppressed");
            return PickOutcome::Suppressed;
        }
        // A miss leaves the session, hover candidate included, as it was.
        let Some(selected) = target else {
            return PickOutcome::Ignored;
        };
        let Some(session) = self.session.take() else {
            return PickOutcome::Ignored;
        };

        Self::remove_listeners(document, &session.listeners);
        tracing::info!(session = %session.id, %selected, "picker session resolved");
        (session.on_select)(selected);
        PickOutcome::Selected(selected)
    }

    fn remove_listeners(document: &mut Document, listeners: &[ListenerId]) {
        for listener in listeners {
            if !document.remove_listener(*listener) {
                tracing::debug!(%listener, "listener already removed");
            }
        }
    }
}

impl Default for ElementPicker {
    fn default() -> Self {
        Self::new(ExclusionMarker::default())
    }
}
