#![forbid(unsafe_code)]

//! Scene building, SVG/HTML output, viewport camera and detail modal for evidence boards.
//!
//! Typical flow: load a [`corkboard_core::LoadOutcome`], then [`Board::mount`] it. The mounted
//! board exposes the interaction hooks of the page (item clicks, wheel, pointers, zoom buttons,
//! Escape) and renders itself as an HTML fragment or a standalone SVG.

pub mod board;
pub mod card;
pub mod html;
pub mod modal;
pub mod scene;
pub mod svg;
mod util;
pub mod viewport;

pub use board::{Board, BoardState, LiveBoard};
pub use card::{CardBody, CardKind, CardSource};
pub use html::{render_board_html, render_fallback_html};
pub use modal::{
    CloseTrigger, DetailModal, EvidenceDetail, MediaPreview, ModalBody, PersonDetail,
    StatusClass, tier_label,
};
pub use scene::{Card, EntityIndex, Scene, Thread, build_scene};
pub use svg::{SvgRenderOptions, render_svg};
pub use viewport::{Camera, GestureState, PointerId, Viewport, ViewportRect};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("board has no scene to render: {message}")]
    NoBoard { message: String },
    #[error("scene JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Serializes a scene as JSON (used by the CLI `layout --scene` output and by tests).
pub fn scene_to_json(scene: &Scene, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(scene)?
    } else {
        serde_json::to_string(scene)?
    })
}
