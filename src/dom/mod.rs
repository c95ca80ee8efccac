//! In-process DOM model the overlay reads and annotates.
//!
//! The host application owns a [`Document`] and shares it with the overlay
//! through a [`SharedDocument`] handle. The overlay only ever touches inline
//! styles and the document's listener registry; structural mutation
//! (`append_child`, `detach`) is the host's business.
//!
//! # Module Structure
//!
//! - [`events`] - input events and listener bookkeeping
//! - [`snapshot`] - conversion between [`DomSnapshot`](crate::types::DomSnapshot) and [`Document`]

pub mod events;
pub mod snapshot;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, RuioError};
use crate::types::{BoundingBox, Point};

pub use events::{DomEvent, EventKind, ListenerId, ListenerRegistry, CANCEL_KEY};

/// Single-threaded handle to a document shared between host and overlay.
pub type SharedDocument = Rc<RefCell<Document>>;

/// Opaque reference to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A single element and its inline state.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    key: Option<String>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    /// Host values displaced by overlay writes, keyed by property. `None`
    /// means the property was unset before the overlay wrote it.
    displaced_style: BTreeMap<String, Option<String>>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bounding_box: Option<BoundingBox>,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Stable identifier carried over from the snapshot the element was loaded from.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn style(&self) -> &BTreeMap<String, String> {
        &self.style
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }
}

/// Arena-backed element tree with a document-level listener registry.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    listeners: ListenerRegistry,
}

impl Document {
    /// Creates a document whose document element has the given tag.
    pub fn new(root_tag: &str) -> Self {
        let root = Element {
            tag: root_tag.to_ascii_lowercase(),
            ..Element::default()
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    /// The document element; every connected node descends from it.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        self.nodes.get_mut(id.0).ok_or(RuioError::UnknownNode(id))
    }

    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.key.as_deref() == Some(key))
            .map(NodeId)
    }

    pub fn set_key(&mut self, id: NodeId, key: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.key = Some(key.into());
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// The node itself followed by its ancestors up to the top of its tree.
    pub fn inclusive_ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.inclusive_ancestors(node).any(|id| id == ancestor)
    }

    /// Whether the node is reachable from the document element.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.inclusive_ancestors(id).last() == Some(self.root)
    }

    /// Pre-order walk of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Appends `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.contains(parent) {
            return Err(RuioError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(RuioError::UnknownNode(child));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(RuioError::Hierarchy(format!(
                "cannot append {child} below {parent}: it would create a cycle"
            )));
        }
        self.detach(child)?;
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Removes the node (and its subtree) from its parent. Detached nodes stay valid.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.get_mut(id)?.parent.take();
        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|c| *c != id);
        }
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)
            .and_then(|node| node.attributes.get(name))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.get_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id).is_some_and(|node| node.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let node = self.get_mut(id)?;
        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.get_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.get(id)
            .and_then(|node| node.style.get(property))
            .map(String::as_str)
    }

    /// Sets an inline style property. Returns `true` when the value changed.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        if node.style.get(property).map(String::as_str) == Some(value) {
            return false;
        }
        node.style.insert(property.to_string(), value.to_string());
        true
    }

    pub fn remove_style(&mut self, id: NodeId, property: &str) -> Option<String> {
        self.nodes
            .get_mut(id.0)
            .and_then(|node| node.style.remove(property))
    }

    /// Writes an overlay-owned value, keeping whatever the host had there so
    /// [`Document::restore_style`] can put it back. Returns `true` when the
    /// value changed.
    pub fn overlay_style(&mut self, id: NodeId, property: &str, value: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        if node.style.get(property).map(String::as_str) == Some(value) {
            return false;
        }
        let displaced = node.style.insert(property.to_string(), value.to_string());
        node.displaced_style.insert(property.to_string(), displaced);
        true
    }

    /// Undoes [`Document::overlay_style`] when the property still holds
    /// `value`. Returns `true` when the property changed.
    ///
    /// If the host has since overwritten the property, its newer value wins and
    /// the displaced one is dropped.
    pub fn restore_style(&mut self, id: NodeId, property: &str, value: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        let displaced = node.displaced_style.remove(property).flatten();
        if node.style.get(property).map(String::as_str) != Some(value) {
            return false;
        }
        match displaced {
            Some(host) => node.style.insert(property.to_string(), host),
            None => node.style.remove(property),
        };
        true
    }

    pub fn set_bounding_box(&mut self, id: NodeId, bounding_box: BoundingBox) -> Result<()> {
        self.get_mut(id)?.bounding_box = Some(bounding_box);
        Ok(())
    }

    /// Topmost connected element whose box contains the point.
    ///
    /// Later document order paints above earlier, so descendants win over
    /// ancestors and later siblings over earlier ones.
    pub fn element_from_point(&self, point: Point) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .and_then(Element::bounding_box)
                    .is_some_and(|bbox| bbox.contains(point))
            })
            .last()
    }

    pub fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        self.listeners.add(kind)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("html")
    }
}

/// Iterator returned by [`Document::inclusive_ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    document: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.document.parent(current);
        Some(current)
    }
}
