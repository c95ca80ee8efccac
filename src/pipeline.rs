use std::path::Path;

use ruio_lib::dom::snapshot::{document_from_snapshot, node_key};
use ruio_lib::{Document, DomEvent, DomSnapshot, NodeId, RuioError};

/// Read a DOM snapshot (JSON) and build a live document from it.
pub fn load_document(path: &Path) -> Result<Document, RuioError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| RuioError::Config(format!("Failed to read DOM snapshot {}: {e}", path.display())))?;
    let snapshot: DomSnapshot = serde_json::from_str(&data)?;
    let document = document_from_snapshot(&snapshot)?;
    tracing::debug!(path = %path.display(), nodes = document.len(), "snapshot loaded");
    Ok(document)
}

/// Read an event script. `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
pub fn load_events(path: &Path) -> Result<Vec<DomEvent>, RuioError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| RuioError::Config(format!("Failed to read event script {}: {e}", path.display())))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let events: Vec<DomEvent> = if is_yaml {
        serde_yaml::from_str(&data)?
    } else {
        serde_json::from_str(&data)?
    };
    tracing::debug!(path = %path.display(), events = events.len(), "event script loaded");
    Ok(events)
}

/// Resolve `--root` against snapshot ids, defaulting to the document element.
pub fn resolve_root(document: &Document, key: Option<&str>) -> Result<NodeId, RuioError> {
    match key {
        Some(key) => document
            .find_by_key(key)
            .ok_or_else(|| RuioError::UnknownRoot(key.to_string())),
        None => Ok(document.root()),
    }
}

pub fn keys(document: &Document, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|id| node_key(document, *id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruio_lib::dom::EventKind;

    const SNAPSHOT: &str = r#"{
        "nodes": [
            {"id": "body", "tag": "body", "children": ["main"]},
            {"id": "main", "tag": "main", "parent": "body"}
        ]
    }"#;

    #[test]
    fn load_document_and_resolve_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(resolve_root(&document, None).unwrap(), document.root());
        let main = resolve_root(&document, Some("main")).unwrap();
        assert_eq!(keys(&document, &[main]), vec!["main"]);
    }

    #[test]
    fn resolve_root_rejects_unknown_key() {
        let document = Document::new("body");
        let err = resolve_root(&document, Some("ghost")).unwrap_err();
        assert!(matches!(err, RuioError::UnknownRoot(ref key) if key == "ghost"));
    }

    #[test]
    fn load_document_reports_missing_file() {
        let err = load_document(Path::new("/definitely/missing/page.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read DOM snapshot"));
    }

    #[test]
    fn load_events_reads_yaml_and_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let yaml = dir.path().join("session.yaml");
        std::fs::write(
            &yaml,
            "- type: pointerMove\n  x: 4\n  y: 8\n- type: keyDown\n  key: Escape\n",
        )
        .unwrap();
        let json = dir.path().join("session.json");
        std::fs::write(&json, r#"[{"type":"click","x":1,"y":2}]"#).unwrap();

        let events = load_events(&yaml).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), EventKind::PointerMove);
        assert_eq!(events[1], DomEvent::key_down("Escape"));

        let events = load_events(&json).unwrap();
        assert_eq!(events, vec![DomEvent::click(1.0, 2.0)]);
    }

    #[test]
    fn load_events_rejects_malformed_script() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"[{"type":"scroll"}]"#).unwrap();
        assert!(matches!(
            load_events(&path).unwrap_err(),
            RuioError::Serialization(_)
        ));
    }
}
