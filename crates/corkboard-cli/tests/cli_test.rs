use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("boards").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("corkboard-cli"));
    cmd.current_dir(repo_root()).env_remove("CORKBOARD_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run cli");
    assert!(output.status.success(), "cli failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("json stdout")
}

#[test]
fn graph_prints_edges_and_connection_map() {
    let value = stdout_json(cli().args(["graph", fixture("basic.json").to_string_lossy().as_ref()]));
    let edges = value["edges"].as_array().expect("edges");
    assert!(edges.iter().all(|e| e["from"] == "center"));
    assert!(value["connections"]["center"].is_array());
}

#[test]
fn layout_reads_stdin() {
    let text = fs::read_to_string(fixture("basic.json")).expect("fixture");
    let output = assert_cmd::Command::new(assert_cmd::cargo_bin!("corkboard-cli"))
        .current_dir(repo_root())
        .args(["layout", "-"])
        .write_stdin(text)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["width"], value["height"]);
    assert!(value["persons"].is_array());
}

#[test]
fn layout_scene_prints_cards_and_threads() {
    let value = stdout_json(cli().args([
        "layout",
        "--scene",
        fixture("full.json").to_string_lossy().as_ref(),
    ]));
    assert_eq!(value["cards"].as_array().map(Vec::len), Some(12));
    assert_eq!(value["threads"].as_array().map(Vec::len), Some(9));
}

#[test]
fn config_file_changes_layout() {
    let board = fixture("full.json");
    let plain = stdout_json(cli().args(["layout", board.to_string_lossy().as_ref()]));
    let tuned = stdout_json(cli().args([
        "layout",
        "--config",
        "fixtures/config/board.yaml",
        board.to_string_lossy().as_ref(),
    ]));
    assert_ne!(plain["width"], tuned["width"]);
}

#[test]
fn render_svg_to_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("board.svg");
    cli()
        .args([
            "render",
            "--id",
            "wall",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("basic.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();
    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with(r#"<svg id="wall""#));
}

#[test]
fn render_html_falls_back_and_fails() {
    let output = cli()
        .args([
            "render",
            "--format",
            "html",
            fixture("broken.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        r#"<div id="bulletin-board" class="bulletin-board">Could not load bulletin data.</div>"#
    );
}

#[test]
fn render_svg_of_broken_dataset_fails() {
    cli()
        .args(["render", fixture("two_centers.json").to_string_lossy().as_ref()])
        .assert()
        .code(1);
}

#[test]
fn usage_errors_exit_2() {
    cli().args(["render", "--format", "gif"]).assert().code(2);
    cli().arg("--help").assert().code(2);
}

#[test]
fn render_png_defaults_next_to_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("case.json");
    fs::copy(fixture("basic.json"), &input).expect("copy fixture");

    cli()
        .args(["render", "--format", "png", input.to_string_lossy().as_ref()])
        .assert()
        .success();

    let bytes = fs::read(input.with_extension("png")).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "output is not a PNG");
}

#[test]
fn render_jpeg_and_pdf() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let jpg = tmp.path().join("board.jpg");
    let pdf = tmp.path().join("board.pdf");
    let input = fixture("basic.json");

    cli()
        .args([
            "render",
            "--format",
            "jpg",
            "--scale",
            "0.5",
            "--out",
            jpg.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();
    assert!(fs::read(&jpg).expect("read jpg").starts_with(&[0xff, 0xd8]));

    cli()
        .args([
            "render",
            "--format",
            "pdf",
            "--out",
            pdf.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();
    assert!(fs::read(&pdf).expect("read pdf").starts_with(b"%PDF-"));
}
