//! Document-level events and listener bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::Point;

/// Key value that cancels an active picking session.
pub const CANCEL_KEY: &str = "Escape";

/// Classification of document events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    PointerMove,
    Click,
    KeyDown,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::PointerMove => "pointermove",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
        })
    }
}

/// An input event delivered to the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomEvent {
    PointerMove { x: f32, y: f32 },
    Click { x: f32, y: f32 },
    KeyDown { key: String },
}

impl DomEvent {
    pub fn pointer_move(x: f32, y: f32) -> Self {
        DomEvent::PointerMove { x, y }
    }

    pub fn click(x: f32, y: f32) -> Self {
        DomEvent::Click { x, y }
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        DomEvent::KeyDown { key: key.into() }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::PointerMove { .. } => EventKind::PointerMove,
            DomEvent::Click { .. } => EventKind::Click,
            DomEvent::KeyDown { .. } => EventKind::KeyDown,
        }
    }

    pub fn point(&self) -> Option<Point> {
        match *self {
            DomEvent::PointerMove { x, y } | DomEvent::Click { x, y } => Some(Point::new(x, y)),
            DomEvent::KeyDown { .. } => None,
        }
    }
}

/// Handle for one installed document listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Registry of listeners installed on the document.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    installed: BTreeMap<ListenerId, EventKind>,
}

impl ListenerRegistry {
    pub fn add(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.installed.insert(id, kind);
        id
    }

    /// Returns `false` when the listener was not installed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.installed.remove(&id).is_some()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.installed.contains_key(&id)
    }

    pub fn kind_of(&self, id: ListenerId) -> Option<EventKind> {
        self.installed.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    pub fn count_for(&self, kind: EventKind) -> usize {
        self.installed.values().filter(|k| **k == kind).count()
    }
}
