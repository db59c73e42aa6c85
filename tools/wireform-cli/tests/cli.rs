//! Integration tests for the wireform binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

/// Write `content` to a fresh temp file and return its path
fn fixture(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("wireform-test-{}-{}", std::process::id(), name));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_validate_passing_payload() {
    let payload = fixture("ok.json", r#"{"id": 1}"#);
    let schema = fixture("ok.schema.json", r#"{"type": "object", "required": ["id"]}"#);

    Command::cargo_bin("wireform")
        .unwrap()
        .args(["validate", payload.to_str().unwrap()])
        .args(["--schema", schema.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("satisfies schema"));
}

#[test]
fn test_validate_failing_payload_lists_violations() {
    let payload = fixture("bad.json", r#"{"name": "a"}"#);
    let schema = fixture("bad.schema.json", r#"{"type": "object", "required": ["id"]}"#);

    Command::cargo_bin("wireform")
        .unwrap()
        .args(["validate", payload.to_str().unwrap()])
        .args(["--schema", schema.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[required]"));
}

#[test]
fn test_validate_rejects_unknown_format() {
    let payload = fixture("any.json", "{}");
    let schema = fixture("any.schema.json", "{}");

    Command::cargo_bin("wireform")
        .unwrap()
        .args(["validate", payload.to_str().unwrap()])
        .args(["--schema", schema.to_str().unwrap()])
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported payload format"));
}

#[test]
fn test_render_json() {
    let payload = fixture("render.json", r#"{"path": "/tmp/x"}"#);

    Command::cargo_bin("wireform")
        .unwrap()
        .args(["render", payload.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"path":"/tmp/x"}"#));
}

#[test]
fn test_render_xml() {
    let payload = fixture("render-xml.json", r#"{"id": 7}"#);

    Command::cargo_bin("wireform")
        .unwrap()
        .args(["render", payload.to_str().unwrap()])
        .args(["--format", "xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<id>7</id>"));
}

#[test]
fn test_headers_order() {
    Command::cargo_bin("wireform")
        .unwrap()
        .args(["headers"])
        .args(["--location", "/things/7"])
        .args(["--content-type", "application/json"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)Content-Type.*Location").unwrap());
}
