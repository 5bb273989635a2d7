#![forbid(unsafe_code)]

//! PNG/JPG/PDF snapshots of a board SVG (pure Rust: `usvg` + `resvg` + `tiny-skia`, `svg2pdf`).
//!
//! Card photos referenced by relative paths are not resolved; the placeholder frame behind
//! them shows instead.

use crate::render::HeadlessError;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("board SVG could not be parsed: {0}")]
    Parse(String),
    #[error("board is too large to rasterize at {width}x{height}px")]
    Canvas { width: u32, height: u32 },
    #[error("failed to encode {0}")]
    Encode(&'static str),
    #[error("unrecognized background color {0:?}")]
    Background(String),
    #[error("JPG snapshots need an opaque background, got {0:?}")]
    TranslucentBackground(String),
    #[error("failed to convert board SVG to PDF: {0}")]
    Pdf(String),
}

impl From<corkboard_core::Error> for RasterError {
    fn from(err: corkboard_core::Error) -> Self {
        Self::Headless(HeadlessError::Load(err))
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Device pixels per board pixel.
    pub scale: f32,
    /// Painted under the board. The cork surface is opaque already, so this mostly matters for
    /// JPG, where it defaults to white.
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Typewriter face used when a card's font stack is not installed.
const CARD_FONT: &str = "Courier New";

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = options
        .background
        .as_deref()
        .map(|bg| parse_tiny_skia_color(bg).ok_or_else(|| RasterError::Background(bg.into())))
        .transpose()?;
    paint(svg, options.scale, background)?
        .encode_png()
        .map_err(|_| RasterError::Encode("PNG"))
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let raw = options.background.as_deref().unwrap_or("white");
    let color = parse_tiny_skia_color(raw).ok_or_else(|| RasterError::Background(raw.into()))?;
    if color.alpha() < 1.0 {
        return Err(RasterError::TranslucentBackground(raw.into()));
    }

    let pixmap = paint(svg, options.scale, Some(color))?;
    let (width, height) = (pixmap.width(), pixmap.height());
    // Fully opaque, so premultiplied RGBA equals straight RGBA.
    let rgba = image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or(RasterError::Encode("JPG"))?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).into_rgb8();

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality)
        .encode_image(&rgb)
        .map_err(|_| RasterError::Encode("JPG"))?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    // svg2pdf pins its own usvg release, so the tree is built with that one.
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = CARD_FONT.to_string();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt)
        .map_err(|err| RasterError::Parse(err.to_string()))?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|err| RasterError::Pdf(format!("{err:?}")))
}

fn board_tree(svg: &str) -> Result<usvg::Tree> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = CARD_FONT.to_string();
    usvg::Tree::from_str(svg, &opt).map_err(|err| RasterError::Parse(err.to_string()))
}

/// Renders the board at `scale` over an optional solid fill.
fn paint(svg: &str, scale: f32, background: Option<tiny_skia::Color>) -> Result<tiny_skia::Pixmap> {
    let tree = board_tree(svg)?;
    // Board SVGs carry `width`/`height` equal to their `0 0 w h` viewBox.
    let device = |len: f32| (len * scale).ceil().max(1.0) as u32;
    let (width, height) = (device(tree.size().width()), device(tree.size().height()));

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Canvas { width, height })?;
    if let Some(color) = background {
        pixmap.fill(color);
    }
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// Parses `transparent`, `white`, `black` and `#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`.
fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    let nibble = |c: u8| (c as char).to_digit(16).map(|v| v as u8);
    let bytes = hex.as_bytes();
    let channels: Vec<u8> = match bytes.len() {
        3 | 4 => bytes
            .iter()
            .map(|&c| nibble(c).map(|v| (v << 4) | v))
            .collect::<Option<_>>()?,
        6 | 8 => bytes
            .chunks_exact(2)
            .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
            .collect::<Option<_>>()?,
        _ => return None,
    };
    let alpha = channels.get(3).copied().unwrap_or(255);
    Some(tiny_skia::Color::from_rgba8(
        channels[0],
        channels[1],
        channels[2],
        alpha,
    ))
}
