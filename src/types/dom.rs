//! DOM snapshot types.
//!
//! These types describe a page's DOM as a flattened node list. Snapshots are
//! loaded into a live [`Document`](crate::dom::Document) for painting and picking,
//! and written back out with the overlay's styling applied.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::core::BoundingBox;

/// A snapshot of a web page's DOM structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    /// The URL of the captured page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Flattened list of DOM nodes, parents before children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<DomNode>,
}

/// A single DOM element with its properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    /// Unique identifier for this node
    pub id: String,
    /// HTML tag name (e.g., "div", "span", "button")
    pub tag: String,
    /// IDs of child nodes, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// ID of parent node
    #[serde(default)]
    pub parent: Option<String>,
    /// HTML attributes (id, class, style, data-*, etc.)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Position and size on screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_deserializes_camel_case() {
        let json = r#"{
            "url": "https://example.com",
            "title": "Example Page",
            "nodes": [{
                "id": "node-0",
                "tag": "div",
                "children": ["node-1"],
                "parent": null,
                "attributes": {"class": "container"},
                "boundingBox": {"x": 0, "y": 0, "width": 100, "height": 50}
            }]
        }"#;

        let snapshot: DomSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.url.as_deref(), Some("https://example.com"));
        assert_eq!(snapshot.nodes.len(), 1);

        let node = &snapshot.nodes[0];
        assert_eq!(node.tag, "div");
        assert_eq!(node.children, vec!["node-1"]);
        assert!(node.parent.is_none());
        assert_eq!(
            node.attributes.get("class").map(String::as_str),
            Some("container")
        );
        assert_eq!(node.bounding_box.map(|b| b.width), Some(100.0));
    }

    #[test]
    fn optional_fields_default() {
        let snapshot: DomSnapshot =
            serde_json::from_str(r#"{"nodes":[{"id":"a","tag":"body"}]}"#).unwrap();
        let node = &snapshot.nodes[0];
        assert!(node.children.is_empty());
        assert!(node.attributes.is_empty());
        assert!(node.bounding_box.is_none());
        assert!(snapshot.title.is_none());
    }
}
