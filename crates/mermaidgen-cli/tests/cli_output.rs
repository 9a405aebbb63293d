//! End-to-end checks of the mermaidgen binary
//!
//! Runs the built binary on chart documents written to a temp dir and
//! checks what lands on stdout, stderr and in output files.

use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mermaidgen"))
        .args(args)
        .env("MERMAIDGEN_LOG_LEVEL", "off")
        .output()
        .expect("failed to run mermaidgen")
}

fn write_doc(dir: &tempfile::TempDir, name: &str, json: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn render_flowchart_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_doc(
        &dir,
        "chart.json",
        r#"{ "kind": "flowchart", "direction": "LR",
             "items": [ { "type": "node", "id": "a" }, { "type": "node", "id": "b", "shape": "diamond" } ],
             "edges": [ { "from": "a", "to": "b", "shape": "dotted-arrow" } ] }"#,
    );

    let output = run_cli(&["render", "-i", &input]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "graph LR\na[a]\nb{b}\na-.->b\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn render_gantt_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_doc(
        &dir,
        "plan.json",
        r#"{ "kind": "gantt", "sections": [ { "id": "s", "tasks": [
             { "id": "t", "start": "2024-01-01T00:00:00Z", "duration": "3h" },
             { "id": "u", "title": "Check: results", "duration": "1d" }
           ] } ] }"#,
    );
    let out_path = dir.path().join("plan.mmd");

    let output = run_cli(&["render", "-i", &input, "-o", out_path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        std::fs::read_to_string(&out_path).unwrap(),
        "gantt\ndateFormat YYYY-MM-DDTHH:mm:ssZ\nsection s\nt :t, 2024-01-01T00:00:00Z, 3h\nCheck  results :u, after t, 1d\n"
    );
}

#[test]
fn url_prints_live_editor_link() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_doc(&dir, "chart.json", r#"{ "kind": "gantt" }"#);

    let output = run_cli(&["url", "-i", &input]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("https://mermaidjs.github.io/mermaid-live-editor/#/edit/"));
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn duplicate_ids_fail_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_doc(
        &dir,
        "dup.json",
        r#"{ "kind": "flowchart", "items": [ { "type": "node", "id": "x" }, { "type": "node", "id": "x" } ] }"#,
    );

    let output = run_cli(&["render", "-i", &input]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Duplicate id 'x'"));
}

#[test]
fn overflowing_duration_fails_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_doc(
        &dir,
        "huge.json",
        r#"{ "kind": "gantt", "tasks": [ { "id": "t", "duration": "99999999999999999w" } ] }"#,
    );

    let output = run_cli(&["render", "-i", &input]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid duration"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn kinds_lists_both_charts() {
    let output = run_cli(&["kinds"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("flowchart"));
    assert!(stdout.contains("gantt"));
}
