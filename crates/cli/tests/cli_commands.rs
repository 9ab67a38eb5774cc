use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn cli(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("control-map").expect("binary");
    cmd.current_dir(workdir).env_remove("CONTROL_MAP_CONFIG");
    cmd
}

fn run_json(workdir: &Path, args: &[&str]) -> Value {
    let output = cli(workdir).args(args).output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn setup_repo() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write(&root.join("controls"), "5.1 Policies.md", "Policy text");
    write(&root.join("controls"), "5.10 Acceptable use.md", "Use text");
    write(&root.join("controls"), "5.2 Roles.md", "Roles text");
    write(
        &root.join("documents"),
        "123456.md",
        "# ISMS Policy\n**Source URL:** https://wiki.example.com/pages/123456\n",
    );
    write(&root.join("documents"), "42.md", "");
    write(
        &root.join("selected_documents_agent"),
        "5.1 Policies.md",
        "/pages/123456 /pages/123456 /pages/999999",
    );
    write(&root.join("selected_documents_agent"), "TEMPLATE.MD", "/pages/42");
    temp
}

#[test]
fn graph_prints_plain_nodes_and_edges() {
    let temp = setup_repo();
    let body = run_json(temp.path(), &["graph"]);

    let node_ids: Vec<&str> = body["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(node_ids, vec!["5.1", "5.2", "5.10", "42", "123456"]);
    assert_eq!(body["nodes"][4]["label"], "ISMS Policy");
    assert_eq!(body["nodes"][3]["kind"], "Document");
    assert_eq!(
        body["edges"],
        json!([{"source_id": "5.1", "target_id": "123456"}])
    );
}

#[test]
fn graph_cytoscape_format() {
    let temp = setup_repo();
    let body = run_json(temp.path(), &["graph", "--format", "cytoscape"]);
    let elements = body.as_array().unwrap();
    assert_eq!(elements.len(), 6);
    assert_eq!(elements[0]["data"]["classes"], "Control");
    assert_eq!(elements[3]["classes"], "Document");
    assert_eq!(
        elements[5],
        json!({"data": {"source": "5.1", "target": "123456"}})
    );
}

#[test]
fn listing_commands_report_records() {
    let temp = setup_repo();

    let controls = run_json(temp.path(), &["controls"]);
    assert_eq!(controls[2], json!({"id": "5.10", "name": "Acceptable use"}));
    let with_content = run_json(temp.path(), &["controls", "--with-content"]);
    assert_eq!(with_content[0]["content"], "Policy text");

    let documents = run_json(temp.path(), &["documents"]);
    assert_eq!(
        documents[1],
        json!({
            "id": "123456",
            "name": "ISMS Policy",
            "source_url": "https://wiki.example.com/pages/123456"
        })
    );

    let selections = run_json(temp.path(), &["selections"]);
    assert_eq!(
        selections,
        json!([{
            "control_id": "5.1",
            "control_name": "Policies",
            "relevant_document_ids": ["123456"]
        }])
    );
}

#[test]
fn summary_reports_gaps() {
    let temp = setup_repo();
    let body = run_json(temp.path(), &["summary"]);
    assert_eq!(body["controls"], 3);
    assert_eq!(body["documents"], 2);
    assert_eq!(body["edges"], 1);
    assert_eq!(body["selections"], 1);
    assert_eq!(body["unmapped_controls"], json!(["5.2", "5.10"]));
    assert_eq!(body["unreferenced_documents"], json!(["42"]));
    assert_eq!(body["skipped"], json!([]));
}

#[test]
fn strict_mode_fails_on_skipped_files() {
    let temp = setup_repo();
    write(&temp.path().join("controls"), "notes.md", "scratch");

    let body = run_json(temp.path(), &["summary"]);
    assert_eq!(body["skipped"].as_array().unwrap().len(), 1);

    cli(temp.path())
        .args(["--strict", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notes.md"));
}

#[test]
fn strict_mode_tolerates_placeholder_files() {
    let temp = setup_repo();
    write(&temp.path().join("controls"), ".gitkeep", "");
    write(&temp.path().join("documents"), ".DS_Store", "");

    cli(temp.path())
        .args(["--strict", "summary"])
        .assert()
        .success();
}

#[test]
fn missing_directory_is_fatal() {
    let temp = setup_repo();
    fs::remove_dir_all(temp.path().join("selected_documents_agent")).unwrap();

    cli(temp.path())
        .arg("graph")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));

    // Controls alone do not need the selection folder.
    let controls = run_json(temp.path(), &["controls"]);
    assert_eq!(controls.as_array().unwrap().len(), 3);
}

#[test]
fn locate_resolves_exact_control_file() {
    let temp = setup_repo();
    cli(temp.path())
        .args(["locate", "5.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5.1 Policies.md"))
        .stdout(predicate::str::contains("5.10").not());

    cli(temp.path())
        .args(["locate", "9.9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No control file found"));
}

#[test]
fn config_file_from_env_relocates_folders() {
    let temp = setup_repo();
    let root = temp.path();
    fs::rename(root.join("documents"), root.join("docs")).unwrap();
    write(
        &root.join("cfg"),
        "control-map.toml",
        "controls_dir = \"../controls\"\ndocuments_dir = \"../docs\"\nselections_dir = \"../selected_documents_agent\"\n",
    );

    let output = cli(root)
        .env("CONTROL_MAP_CONFIG", root.join("cfg").join("control-map.toml"))
        .arg("documents")
        .output()
        .expect("command run");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);

    cli(root)
        .args(["--documents", "docs", "graph"])
        .assert()
        .success();
}

#[test]
fn report_renders_markdown() {
    let temp = setup_repo();
    cli(temp.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Control map coverage"))
        .stdout(predicate::str::contains("| `5.1` Policies | ISMS Policy (123456) |"));
}
