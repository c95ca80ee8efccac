use ruio_lib::{OutcomeKind, RuioOutput};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/page.json")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ruio"))
        .args(args)
        .env_remove("RUIO_CONFIG")
        .output()
        .expect("run ruio")
}

fn parse(output: &Output) -> RuioOutput {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("parse ruio output")
}

fn write_script(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write event script");
    path
}

#[test]
fn paint_exit_code_succeeds_and_skips_excluded_chrome() {
    let dom = fixture();
    let output = run(&["paint", "--dom", dom.to_str().unwrap(), "--depth", "1"]);
    assert_eq!(output.status.code(), Some(0));

    match parse(&output) {
        RuioOutput::Paint(out) => {
            assert!(out.enabled);
            assert_eq!(out.root, "body");
            assert_eq!(out.depth, 1);
            assert_eq!(out.bordered, vec!["body", "main"]);
            assert!(out.dom.is_none());
        }
        other => panic!("expected paint output, got {other:?}"),
    }
}

#[test]
fn paint_clamps_depth_and_includes_annotated_dom() {
    let dom = fixture();
    let output = run(&[
        "paint",
        "--dom",
        dom.to_str().unwrap(),
        "--root",
        "main",
        "--depth",
        "99",
        "--include-dom",
    ]);
    assert_eq!(output.status.code(), Some(0));

    match parse(&output) {
        RuioOutput::Paint(out) => {
            assert_eq!(out.depth, 10);
            assert_eq!(out.bordered, vec!["main", "card", "title"]);
            let snapshot = out.dom.expect("annotated snapshot");
            let card = snapshot
                .nodes
                .iter()
                .find(|node| node.id == "card")
                .expect("card node");
            let style = card.attributes.get("style").expect("card style");
            assert!(style.contains("background: white"));
            assert!(style.contains("outline: 1px solid"));
        }
        other => panic!("expected paint output, got {other:?}"),
    }
}

#[test]
fn paint_accepts_config_flag() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("ruio.toml");
    std::fs::write(&cfg_path, "[depth]\ndefault = 2\n").expect("write config");
    let dom = fixture();

    let output = run(&[
        "paint",
        "--dom",
        dom.to_str().unwrap(),
        "--config",
        cfg_path.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0));
    match parse(&output) {
        RuioOutput::Paint(out) => {
            assert_eq!(out.depth, 2);
            assert_eq!(out.bordered, vec!["body", "main", "card"]);
        }
        other => panic!("expected paint output, got {other:?}"),
    }
}

#[test]
fn pick_exit_code_succeeds_when_element_selected() {
    let dir = TempDir::new().expect("tempdir");
    let events = write_script(
        &dir,
        "session.yaml",
        "- type: pointerMove\n  x: 30\n  y: 25\n- type: click\n  x: 620\n  y: 15\n- type: click\n  x: 30\n  y: 25\n",
    );
    let dom = fixture();

    let output = run(&[
        "pick",
        "--dom",
        dom.to_str().unwrap(),
        "--events",
        events.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0));

    match parse(&output) {
        RuioOutput::Pick(out) => {
            assert_eq!(out.selected.as_deref(), Some("title"));
            let outcomes: Vec<_> = out.events.iter().map(|record| record.outcome).collect();
            assert_eq!(
                outcomes,
                vec![
                    OutcomeKind::Hovered,
                    OutcomeKind::Suppressed,
                    OutcomeKind::Selected
                ]
            );
            assert_eq!(out.listeners_after_teardown, 0);
            assert_eq!(out.bordered, vec!["title"]);
        }
        other => panic!("expected pick output, got {other:?}"),
    }
}

#[test]
fn pick_exit_code_is_one_when_cancelled() {
    let dir = TempDir::new().expect("tempdir");
    let events = write_script(
        &dir,
        "session.json",
        r#"[{"type":"pointerMove","x":50,"y":50},{"type":"keyDown","key":"Escape"},{"type":"click","x":30,"y":25}]"#,
    );
    let dom = fixture();

    let output = run(&[
        "pick",
        "--dom",
        dom.to_str().unwrap(),
        "--events",
        events.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));

    match parse(&output) {
        RuioOutput::Pick(out) => {
            assert!(out.selected.is_none());
            assert_eq!(out.events[1].outcome, OutcomeKind::Cancelled);
            assert_eq!(out.events[2].outcome, OutcomeKind::Ignored);
            assert_eq!(out.listeners_after_teardown, 0);
        }
        other => panic!("expected pick output, got {other:?}"),
    }
}

#[test]
fn unknown_root_is_fatal() {
    let dom = fixture();
    let output = run(&["paint", "--dom", dom.to_str().unwrap(), "--root", "ghost"]);
    assert_eq!(output.status.code(), Some(2));
    match parse(&output) {
        RuioOutput::Error(out) => assert!(out.error.message.contains("ghost")),
        other => panic!("expected error output, got {other:?}"),
    }
}

#[test]
fn invalid_config_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("ruio.toml");
    std::fs::write(&cfg_path, "exclusion_class = \"\"\n").expect("write config");
    let dom = fixture();

    let status = Command::new(env!("CARGO_BIN_EXE_ruio"))
        .args([
            "paint",
            "--dom",
            dom.to_str().unwrap(),
            "--config",
            cfg_path.to_str().unwrap(),
        ])
        .status()
        .expect("run ruio");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn malformed_snapshot_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let dom = dir.path().join("page.json");
    std::fs::write(&dom, r#"{"nodes":[{"id":"a","tag":"div","children":["missing"]}]}"#)
        .expect("write snapshot");

    let output = run(&["paint", "--dom", dom.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
}
