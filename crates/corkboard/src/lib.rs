#![forbid(unsafe_code)]

//! `corkboard` is a headless evidence-board ("bulletin board") engine.
//!
//! A board dataset (persons on tiered rings around one center, evidence items on an outer ring,
//! extra links) is laid out radially, tied together with sagging yarn threads, and rendered as a
//! standalone SVG or as the HTML fragment of the interactive page.
//!
//! # Features
//!
//! - `render`: enable scene building, SVG/HTML output and the mounted board (`corkboard::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use corkboard_core::*;

pub mod layout {
    pub use corkboard_layout::*;
}

#[cfg(feature = "render")]
pub mod render {
    pub use corkboard_render::{
        Board, BoardState, Camera, Card, CardBody, CardKind, CloseTrigger, DetailModal, Error,
        GestureState, LiveBoard, ModalBody, PointerId, Scene, SvgRenderOptions, Thread, Viewport,
        ViewportRect, build_scene, render_svg as render_scene_svg, scene_to_json,
    };
    use corkboard_core::load::{load_path_sync, load_str_sync};
    use corkboard_core::{BoardConfig, Dataset, LoadOutcome};
    use std::path::Path;

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Load(#[from] corkboard_core::Error),
        #[error(transparent)]
        Render(#[from] corkboard_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token.
    ///
    /// The root id prefixes the filter and gradient ids under `<defs>`, so boards inlined into the
    /// same page need distinct ids. Unsupported characters become `-`, and ids that do not start
    /// with an ASCII letter get a `cb-` prefix.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "cb-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "cb-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "cb" {
            return "cb-untitled".to_string();
        }
        out.to_string()
    }

    /// Bundles the board config, the mount viewport and SVG options for one-call rendering.
    ///
    /// Runtime-agnostic: the async methods never yield and need no executor-specific types.
    #[derive(Debug, Clone)]
    pub struct BoardRenderer {
        pub container_id: String,
        pub config: BoardConfig,
        pub viewport: ViewportRect,
        pub svg: SvgRenderOptions,
    }

    impl Default for BoardRenderer {
        fn default() -> Self {
            Self {
                container_id: "bulletin-board".to_string(),
                config: BoardConfig::default(),
                viewport: ViewportRect::sized(1280.0, 800.0),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl BoardRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: BoardConfig) -> Self {
            self.config = config;
            self
        }

        pub fn with_viewport(mut self, viewport: ViewportRect) -> Self {
            self.viewport = viewport;
            self
        }

        pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
            self.container_id = container_id.into();
            self
        }

        pub fn with_diagram_id(mut self, diagram_id: &str) -> Self {
            self.svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            self
        }

        /// Mounts any load outcome; failures become the fallback board.
        pub fn mount(&self, outcome: LoadOutcome) -> Board {
            Board::mount(
                self.container_id.clone(),
                outcome,
                self.viewport,
                &self.config,
            )
        }

        pub fn mount_dataset(&self, dataset: Dataset) -> Board {
            self.mount(LoadOutcome::Loaded(dataset))
        }

        /// HTML fragment for a dataset text. Load failures render the fallback container.
        pub fn render_html_sync(&self, text: &str) -> String {
            self.mount(load_str_sync(text)).render_html()
        }

        pub fn render_html_path_sync(&self, path: impl AsRef<Path>) -> String {
            self.mount(load_path_sync(path)).render_html()
        }

        /// Standalone SVG for a dataset text. Load failures are errors.
        pub fn render_svg_sync(&self, text: &str) -> Result<String> {
            let dataset = load_str_sync(text).into_result()?;
            self.render_dataset_svg(dataset)
        }

        pub fn render_svg_path_sync(&self, path: impl AsRef<Path>) -> Result<String> {
            let dataset = load_path_sync(path).into_result()?;
            self.render_dataset_svg(dataset)
        }

        pub fn render_dataset_svg(&self, dataset: Dataset) -> Result<String> {
            Ok(self.mount_dataset(dataset).render_svg(&self.svg)?)
        }

        pub async fn render_svg(&self, text: &str) -> Result<String> {
            self.render_svg_sync(text)
        }

        pub async fn render_html(&self, text: &str) -> String {
            self.render_html_sync(text)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_svg_sync(text)?;
            raster::svg_to_png(&svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_svg_sync(text)?;
            raster::svg_to_jpeg(&svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, text: &str) -> raster::Result<Vec<u8>> {
            let svg = self.render_svg_sync(text)?;
            raster::svg_to_pdf(&svg)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn sanitize_svg_id_normalizes() {
            assert_eq!(sanitize_svg_id("  "), "cb-untitled");
            assert_eq!(sanitize_svg_id("case file #1"), "case-file-1");
            assert_eq!(sanitize_svg_id("42"), "cb-42");
            assert_eq!(sanitize_svg_id("board_a.b"), "board_a.b");
        }
    }
}
