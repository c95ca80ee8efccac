//! Conversion between serialized [`DomSnapshot`]s and live [`Document`]s.

use std::collections::{BTreeMap, HashMap};

use super::{Document, NodeId};
use crate::error::{Result, RuioError};
use crate::types::{DomNode, DomSnapshot};

/// Builds a live document from a flattened snapshot.
///
/// Exactly one node must have no parent; it becomes the document element.
/// Child order follows each node's `children` list, and the `class` and
/// `style` attributes are split into the class list and inline style map.
pub fn document_from_snapshot(snapshot: &DomSnapshot) -> Result<Document> {
    let mut by_key: HashMap<&str, &DomNode> = HashMap::new();
    for node in &snapshot.nodes {
        if by_key.insert(node.id.as_str(), node).is_some() {
            return Err(RuioError::snapshot(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
    }

    let mut roots = snapshot.nodes.iter().filter(|n| n.parent.is_none());
    let root = roots
        .next()
        .ok_or_else(|| RuioError::snapshot("snapshot has no root node"))?;
    if let Some(extra) = roots.next() {
        return Err(RuioError::snapshot(format!(
            "snapshot has more than one root ('{}' and '{}')",
            root.id, extra.id
        )));
    }

    let mut document = Document::new(&root.tag);
    let mut ids: HashMap<&str, NodeId> = HashMap::new();
    ids.insert(root.id.as_str(), document.root());
    for node in snapshot.nodes.iter().filter(|n| n.parent.is_some()) {
        let id = document.create_element(&node.tag);
        ids.insert(node.id.as_str(), id);
    }

    let lookup = |ids: &HashMap<&str, NodeId>, key: &str, from: &str| {
        ids.get(key).copied().ok_or_else(|| {
            RuioError::snapshot(format!("node '{from}' references unknown node '{key}'"))
        })
    };

    for node in &snapshot.nodes {
        let id = lookup(&ids, &node.id, &node.id)?;
        apply_node_state(&mut document, id, node)?;
        for child in &node.children {
            let child_id = lookup(&ids, child, &node.id)?;
            document
                .append_child(id, child_id)
                .map_err(|e| RuioError::snapshot(format!("node '{}': {e}", node.id)))?;
        }
    }

    // Nodes that name a parent the parent does not list are appended last.
    for node in &snapshot.nodes {
        let Some(parent) = node.parent.as_deref() else {
            continue;
        };
        let id = lookup(&ids, &node.id, &node.id)?;
        if document.parent(id).is_none() {
            let parent_id = lookup(&ids, parent, &node.id)?;
            document
                .append_child(parent_id, id)
                .map_err(|e| RuioError::snapshot(format!("node '{}': {e}", node.id)))?;
        }
    }

    for node in &snapshot.nodes {
        let id = lookup(&ids, &node.id, &node.id)?;
        if !document.is_connected(id) {
            return Err(RuioError::snapshot(format!(
                "node '{}' is not reachable from root '{}'",
                node.id, root.id
            )));
        }
    }

    Ok(document)
}

fn apply_node_state(document: &mut Document, id: NodeId, node: &DomNode) -> Result<()> {
    document.set_key(id, node.id.clone())?;
    for (name, value) in &node.attributes {
        match name.as_str() {
            "class" => {
                for class in value.split_whitespace() {
                    document.add_class(id, class)?;
                }
            }
            "style" => {
                for (property, value) in parse_inline_style(value) {
                    document.set_style(id, &property, &value);
                }
            }
            _ => document.set_attribute(id, name, value)?,
        }
    }
    if let Some(bbox) = node.bounding_box {
        document.set_bounding_box(id, bbox)?;
    }
    Ok(())
}

/// External identifier for a node: its snapshot key, or `node-<index>`.
pub fn node_key(document: &Document, id: NodeId) -> String {
    document
        .get(id)
        .and_then(|node| node.key().map(str::to_string))
        .unwrap_or_else(|| format!("node-{}", id.index()))
}

/// Serializes the connected part of a document, overlay styling included.
pub fn snapshot_from_document(document: &Document) -> DomSnapshot {
    let key_of = |id: NodeId| node_key(document, id);

    let nodes = document
        .descendants(document.root())
        .into_iter()
        .filter_map(|id| {
            let element = document.get(id)?;
            let mut attributes: BTreeMap<String, String> = element.attributes().clone();
            if !element.classes().is_empty() {
                attributes.insert("class".to_string(), element.classes().join(" "));
            }
            if !element.style().is_empty() {
                attributes.insert("style".to_string(), format_inline_style(element.style()));
            }
            Some(DomNode {
                id: key_of(id),
                tag: element.tag().to_string(),
                children: element.children().iter().map(|c| key_of(*c)).collect(),
                parent: element.parent().map(key_of),
                attributes,
                bounding_box: element.bounding_box(),
            })
        })
        .collect();

    DomSnapshot {
        url: None,
        title: None,
        nodes,
    }
}

/// Parses `prop: value; prop2: value2` into ordered pairs, skipping malformed entries.
pub fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                None
            } else {
                Some((property.to_ascii_lowercase(), value.to_string()))
            }
        })
        .collect()
}

pub fn format_inline_style(style: &BTreeMap<String, String>) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    fn node(id: &str, tag: &str, parent: Option<&str>, children: &[&str]) -> DomNode {
        DomNode {
            id: id.to_string(),
            tag: tag.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            parent: parent.map(str::to_string),
            attributes: BTreeMap::new(),
            bounding_box: None,
        }
    }

    fn snapshot(nodes: Vec<DomNode>) -> DomSnapshot {
        DomSnapshot {
            url: None,
            title: None,
            nodes,
        }
    }

    #[test]
    fn builds_document_in_child_order() {
        let snap = snapshot(vec![
            node("body", "body", None, &["b", "a"]),
            node("a", "div", Some("body"), &[]),
            node("b", "section", Some("body"), &["c"]),
            node("c", "p", Some("b"), &[]),
        ]);

        let doc = document_from_snapshot(&snap).unwrap();
        let root = doc.root();
        let keys: Vec<_> = doc
            .children(root)
            .iter()
            .map(|id| doc.get(*id).unwrap().key().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
        let c = doc.find_by_key("c").unwrap();
        assert_eq!(doc.parent(c), doc.find_by_key("b"));
        assert_eq!(doc.get(c).unwrap().tag(), "p");
    }

    #[test]
    fn splits_class_and_style_attributes() {
        let mut body = node("body", "body", None, &[]);
        body.attributes
            .insert("class".into(), "panel  ruio-exclude".into());
        body.attributes
            .insert("style".into(), "color: red; ; Outline : none;broken".into());
        body.attributes.insert("data-x".into(), "1".into());
        body.bounding_box = Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0));

        let doc = document_from_snapshot(&snapshot(vec![body])).unwrap();
        let root = doc.root();
        assert!(doc.has_class(root, "ruio-exclude"));
        assert!(doc.has_class(root, "panel"));
        assert_eq!(doc.style(root, "color"), Some("red"));
        assert_eq!(doc.style(root, "outline"), Some("none"));
        assert_eq!(doc.attribute(root, "data-x"), Some("1"));
        assert!(doc.attribute(root, "class").is_none());
        assert!(doc.get(root).unwrap().bounding_box().is_some());
    }

    #[test]
    fn appends_children_known_only_by_parent_reference() {
        let snap = snapshot(vec![
            node("body", "body", None, &[]),
            node("a", "div", Some("body"), &[]),
        ]);
        let doc = document_from_snapshot(&snap).unwrap();
        assert_eq!(doc.children(doc.root()).len(), 1);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let snap = snapshot(vec![
            node("body", "body", None, &[]),
            node("body", "div", Some("body"), &[]),
        ]);
        let err = document_from_snapshot(&snap).unwrap_err();
        assert!(err.to_string().contains("duplicate node id"));
    }

    #[test]
    fn rejects_missing_or_multiple_roots() {
        let err = document_from_snapshot(&snapshot(vec![])).unwrap_err();
        assert!(err.to_string().contains("no root"));

        let err = document_from_snapshot(&snapshot(vec![
            node("a", "div", None, &[]),
            node("b", "div", None, &[]),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("more than one root"));
    }

    #[test]
    fn rejects_unknown_references() {
        let err = document_from_snapshot(&snapshot(vec![node("body", "body", None, &["ghost"])]))
            .unwrap_err();
        assert!(err.to_string().contains("unknown node 'ghost'"));
    }

    #[test]
    fn rejects_parent_cycles() {
        let err = document_from_snapshot(&snapshot(vec![
            node("body", "body", None, &[]),
            node("a", "div", Some("b"), &[]),
            node("b", "div", Some("a"), &[]),
        ]))
        .unwrap_err();
        assert!(matches!(err, RuioError::Snapshot(_)));
    }

    #[test]
    fn snapshot_roundtrip_keeps_structure_and_style() {
        let mut body = node("body", "body", None, &["a"]);
        body.attributes.insert("class".into(), "page".into());
        let snap = snapshot(vec![body, node("a", "div", Some("body"), &[])]);
        let mut doc = document_from_snapshot(&snap).unwrap();
        let a = doc.find_by_key("a").unwrap();
        doc.set_style(a, "outline", "1px solid red");

        let out = snapshot_from_document(&doc);
        assert_eq!(out.nodes.len(), 2);
        assert_eq!(out.nodes[0].children, vec!["a"]);
        assert_eq!(
            out.nodes[0].attributes.get("class").map(String::as_str),
            Some("page")
        );
        assert_eq!(out.nodes[1].parent.as_deref(), Some("body"));
        assert_eq!(
            out.nodes[1].attributes.get("style").map(String::as_str),
            Some("outline: 1px solid red")
        );
    }

    #[test]
    fn unkeyed_elements_get_index_ids() {
        let mut doc = Document::new("body");
        let div = doc.create_element("div");
        doc.append_child(doc.root(), div).unwrap();
        let out = snapshot_from_document(&doc);
        assert_eq!(out.nodes[0].id, "node-0");
        assert_eq!(out.nodes[1].id, "node-1");
    }
}
