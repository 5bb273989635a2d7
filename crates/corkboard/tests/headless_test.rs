#![cfg(feature = "render")]

use corkboard::BoardConfig;
use corkboard::render::{BoardRenderer, HeadlessError, ViewportRect};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(workspace_root().join("fixtures").join("boards").join(name))
        .expect("fixture readable")
}

#[test]
fn renderer_svg_uses_sanitized_id() {
    let renderer = BoardRenderer::new().with_diagram_id("case file #1");
    let svg = renderer
        .render_svg_sync(&fixture_text("basic.json"))
        .expect("svg");
    let doc = roxmltree::Document::parse(&svg).expect("valid xml");
    assert_eq!(doc.root_element().attribute("id"), Some("case-file-1"));
    assert!(svg.contains(r#"filter="url(#case-file-1-yarn)""#));
}

#[test]
fn renderer_svg_reports_load_errors() {
    let renderer = BoardRenderer::new();
    let err = renderer
        .render_svg_sync(&fixture_text("broken.json"))
        .expect_err("broken fixture");
    assert!(matches!(err, HeadlessError::Load(corkboard::Error::Json(_))));

    let err = renderer
        .render_svg_sync(&fixture_text("two_centers.json"))
        .expect_err("ambiguous center");
    assert!(matches!(
        err,
        HeadlessError::Load(corkboard::Error::MultipleCenters { count: 2, .. })
    ));
}

#[test]
fn renderer_html_falls_back_on_bad_data() {
    let renderer = BoardRenderer::new().with_container_id("wall");
    assert_eq!(
        renderer.render_html_sync("{"),
        r#"<div id="wall" class="bulletin-board">Could not load bulletin data.</div>"#
    );
    let html = renderer.render_html_sync(&fixture_text("basic.json"));
    assert!(html.starts_with(r#"<div id="wall" class="bulletin-board"><div class="board-viewport">"#));
}

#[test]
fn async_and_sync_agree() {
    let renderer = BoardRenderer::new();
    let text = fixture_text("full.json");
    let sync = renderer.render_svg_sync(&text).expect("svg");
    let via_async = futures::executor::block_on(renderer.render_svg(&text)).expect("svg");
    assert_eq!(sync, via_async);
}

#[test]
fn viewport_size_only_changes_the_camera() {
    let text = fixture_text("full.json");
    let small = BoardRenderer::new().with_viewport(ViewportRect::sized(320.0, 480.0));
    let large = BoardRenderer::new().with_viewport(ViewportRect::sized(1920.0, 1080.0));
    assert_eq!(
        small.render_svg_sync(&text).expect("svg"),
        large.render_svg_sync(&text).expect("svg")
    );
    assert_ne!(
        small.render_html_sync(&text),
        large.render_html_sync(&text)
    );
}

#[test]
fn config_overrides_flow_into_output() {
    let config = BoardConfig::from_path(workspace_root().join("fixtures/config/board.yaml"))
        .expect("config");
    let renderer = BoardRenderer::new().with_config(config);
    let board = renderer.mount_dataset(
        corkboard::load::parse_dataset(&fixture_text("full.json")).expect("dataset"),
    );
    let live = board.live().expect("ready");
    let tier2 = live.layout().ring_for_tier(2).expect("tier 2 ring");
    assert_eq!(tier2.radius, 280.0 + 200.0);

    let mut board = board;
    assert!(board.click_item("center"));
    assert!(board.render_html().contains(r#"href="files/indictment.pdf""#));
}

#[cfg(feature = "raster")]
#[test]
fn renderer_rasterizes_board() {
    use corkboard::render::raster::RasterOptions;

    let renderer = BoardRenderer::new();
    let text = fixture_text("basic.json");
    let png = renderer
        .render_png_sync(&text, &RasterOptions::default())
        .expect("png");
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    let pdf = renderer.render_pdf_sync(&text).expect("pdf");
    assert!(pdf.starts_with(b"%PDF-"));
}
