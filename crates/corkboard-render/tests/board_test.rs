use corkboard_core::BoardConfig;
use corkboard_core::load::{load_path, load_path_sync, load_str_sync};
use corkboard_layout::Point;
use corkboard_render::{
    Board, CloseTrigger, EntityIndex, Error, GestureState, MediaPreview, ModalBody, StatusClass,
    SvgRenderOptions, ViewportRect,
};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn board_fixture(name: &str) -> PathBuf {
    workspace_root().join("fixtures").join("boards").join(name)
}

fn rect() -> ViewportRect {
    ViewportRect::sized(1280.0, 800.0)
}

fn mount(name: &str) -> Board {
    Board::mount(
        "bulletin-board",
        load_path_sync(board_fixture(name)),
        rect(),
        &BoardConfig::default(),
    )
}

/// Client position of the middle of a card.
fn card_center_on_screen(board: &Board, id: &str) -> Point {
    let live = board.live().expect("ready board");
    let card = live.scene().card(id).expect("card");
    let cam = live.viewport().camera();
    let r = live.viewport().rect();
    Point::new(
        r.left + cam.offset.x + card.anchor.x * cam.scale,
        r.top + cam.offset.y + (card.top + card.height / 2.0) * cam.scale,
    )
}

#[test]
fn failed_load_mounts_fallback_only() {
    let mut board = mount("broken.json");
    assert!(!board.is_ready());
    assert_eq!(board.fallback_message(), Some("Could not load bulletin data."));
    assert_eq!(
        board.render_html(),
        r#"<div id="bulletin-board" class="bulletin-board">Could not load bulletin data.</div>"#
    );
    let err = board
        .render_svg(&SvgRenderOptions::default())
        .expect_err("no svg for fallback");
    assert!(matches!(err, Error::NoBoard { .. }));

    // Hooks are inert.
    assert!(!board.click_item("center"));
    assert!(board.click_at(Point::new(10.0, 10.0)).is_none());
    board.wheel(Point::new(10.0, 10.0), -100.0);
    board.pointer_down(1, Point::new(10.0, 10.0));
    board.zoom_in();
    board.reset_view();
    assert!(!board.key("Escape"));
    assert!(board.live().is_none());
}

#[test]
fn ambiguous_center_mounts_fallback() {
    let board = mount("two_centers.json");
    assert!(!board.is_ready());
    assert!(board.render_html().contains("Could not load bulletin data."));
}

#[test]
fn custom_fallback_message_is_escaped() {
    let config = BoardConfig {
        fallback_message: "Data <missing>".to_string(),
        ..Default::default()
    };
    let board = Board::mount(
        "b",
        load_path_sync(board_fixture("missing.json")),
        rect(),
        &config,
    );
    assert_eq!(
        board.render_html(),
        r#"<div id="b" class="bulletin-board">Data &lt;missing&gt;</div>"#
    );
}

#[test]
fn malformed_records_still_mount_every_card() {
    let mut board = mount("malformed.json");
    assert!(board.is_ready());
    let live = board.live().expect("ready");
    assert_eq!(live.scene().cards.len(), 6);
    assert_eq!(live.scene().threads.len(), 6);

    assert!(board.click_item("ev2"));
    let Some(ModalBody::Evidence(detail)) = board.live().expect("ready").modal().body() else {
        panic!("expected evidence detail");
    };
    assert_eq!(detail.name, "Ledger");
}

#[test]
fn person_click_opens_case_file() {
    let mut board = mount("full.json");
    assert!(board.click_item("p1"));

    let live = board.live().expect("ready");
    assert!(live.modal().is_open());
    let Some(ModalBody::Person(detail)) = live.modal().body() else {
        panic!("expected person detail");
    };
    assert_eq!(detail.name, "Associate One");
    assert_eq!(detail.status_class, StatusClass::Named);
    // p1 appears in two extra edges with p2 plus the center auto-edge.
    assert_eq!(detail.connections, vec!["Central Figure", "Associate Two"]);

    let html = board.render_html();
    assert!(html.contains(r#"<div class="bb-modal open">"#));
    assert!(html.contains(r#"<span class="conn-tag">Associate Two</span>"#));
    assert_eq!(html.matches(r#"class="conn-tag""#).count(), 2);
}

#[test]
fn center_case_file_lists_documents() {
    let mut board = mount("full.json");
    assert!(board.click_item("center"));
    let html = board.render_html();
    assert!(html.contains("status-deceased"));
    assert!(html.contains(
        r#"<a class="detail-doc-link" href="docs/court-documents/indictment.pdf" target="_blank" rel="noopener">indictment.pdf</a>"#
    ));
    assert!(html.contains(
        r#"<span class="field-label">Age</span><span class="field-value">66</span>"#
    ));
    assert!(html.contains("Why on the List"));
}

#[test]
fn evidence_click_shows_first_media() {
    let mut board = mount("full.json");
    assert!(board.click_item("ev3"));
    let live = board.live().expect("ready");
    let Some(ModalBody::Evidence(detail)) = live.modal().body() else {
        panic!("expected evidence detail");
    };
    assert_eq!(detail.name, "Deposition");
    assert_eq!(detail.label, "Court Filing");
    assert_eq!(detail.notes.as_deref(), Some("Unsealed 2024."));
    assert!(matches!(detail.media, Some(MediaPreview::Embed { .. })));
    assert!(board.render_html().contains("modal-body evidence-detail"));
}

#[test]
fn unknown_item_click_is_ignored() {
    let mut board = mount("full.json");
    assert!(!board.click_item("ghost"));
    assert!(!board.live().expect("ready").modal().is_open());
}

#[test]
fn every_close_path_hides_the_modal() {
    let mut board = mount("basic.json");
    for trigger in [CloseTrigger::CloseButton, CloseTrigger::Backdrop] {
        assert!(board.click_item("p2"));
        board.close_modal(trigger);
        assert!(!board.live().expect("ready").modal().is_open());
    }
    assert!(board.click_item("p2"));
    assert!(board.key("Escape"));
    assert!(!board.live().expect("ready").modal().is_open());
    assert!(board.render_html().contains(r#"<div class="bb-modal">"#));
}

#[test]
fn click_at_hits_card_under_pointer() {
    let mut board = mount("basic.json");
    let at = card_center_on_screen(&board, "center");
    assert_eq!(board.click_at(at).as_deref(), Some("center"));
    assert!(board.live().expect("ready").modal().is_open());

    let mut empty = mount("basic.json");
    assert!(empty.click_at(Point::new(1.0, 1.0)).is_none());
}

#[test]
fn click_at_opens_the_card_that_was_hit_when_ids_collide() {
    let text = r#"{
        "persons": [
            { "id": "c", "name": "Hub", "tier": 0 },
            { "id": "dup", "name": "Shared Person", "tier": 1 }
        ],
        "evidence": [{ "id": "dup", "type": "note", "name": "Shared Note" }]
    }"#;
    let mut board = Board::mount("b", load_str_sync(text), rect(), &BoardConfig::default());

    let at = {
        let live = board.live().expect("ready");
        let card = live
            .scene()
            .cards
            .iter()
            .find(|c| c.id == "dup" && matches!(c.entity, EntityIndex::Person(_)))
            .expect("person card");
        let cam = live.viewport().camera();
        Point::new(
            cam.offset.x + card.anchor.x * cam.scale,
            cam.offset.y + (card.top + card.height / 2.0) * cam.scale,
        )
    };
    assert_eq!(board.click_at(at).as_deref(), Some("dup"));
    let Some(ModalBody::Person(detail)) = board.live().expect("ready").modal().body() else {
        panic!("expected the person dossier");
    };
    assert_eq!(detail.name, "Shared Person");
}

#[test]
fn press_on_item_does_not_start_a_pan() {
    let mut board = mount("basic.json");
    let at = card_center_on_screen(&board, "p1");
    let before = board.live().expect("ready").viewport().camera();
    board.pointer_down(1, at);
    board.pointer_move(1, Point::new(at.x + 80.0, at.y + 80.0));
    let vp = board.live().expect("ready").viewport();
    assert_eq!(vp.state(), GestureState::Idle);
    assert_eq!(vp.camera(), before);
    board.pointer_up(1);

    board.pointer_down(2, Point::new(2.0, 2.0));
    board.pointer_move(2, Point::new(42.0, 2.0));
    let after = board.live().expect("ready").viewport().camera();
    assert!((after.offset.x - (before.offset.x + 40.0)).abs() < 1e-9);
}

#[test]
fn html_reflects_camera_after_zoom() {
    let mut board = mount("basic.json");
    let home = board.live().expect("ready").viewport().transform();
    assert!(board.render_html().contains(&format!("transform:{home}")));

    board.zoom_in();
    let zoomed = board.live().expect("ready").viewport().transform();
    assert_ne!(zoomed, home);
    let html = board.render_html();
    assert!(html.contains(&format!("transform:{zoomed}")));
    assert!(html.contains(r#"<button type="button" title="Reset view">⌂</button>"#));

    board.reset_view();
    assert_eq!(board.live().expect("ready").viewport().transform(), home);
}

#[test]
fn html_items_mirror_scene() {
    let board = mount("full.json");
    let html = board.render_html();
    assert!(html.contains(r#"class="board-item item-polaroid center-item" data-id="center""#));
    assert!(html.contains(r#"<div class="thumbtack blue"></div><div class="doc-paper">"#));
    assert!(html.contains(r#"<div class="doc-stamp">Evidence</div>"#));
    assert!(html.contains(r#"class="board-item item-other" data-id="ev5""#));
    assert!(html.contains(r#"<div class="ring-label""#));
    assert!(html.contains(r#"<div class="board-vignette"></div>"#));
    assert_eq!(html.matches(r#"class="yarn-thread""#).count(), 9);
}

#[test]
fn async_load_mounts_the_same_board() {
    let outcome = futures::executor::block_on(load_path(board_fixture("basic.json")));
    let board = Board::mount("bulletin-board", outcome, rect(), &BoardConfig::default());
    assert_eq!(board.render_html(), mount("basic.json").render_html());
}
