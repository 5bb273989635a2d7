//! Standalone SVG output for a [`Scene`].
//!
//! The document is self-contained (no external CSS) so it can be rasterized headlessly. Threads
//! are drawn before cards, matching the stacking of the interactive board.

use crate::card::CardKind;
use crate::scene::{Card, Scene};
use crate::util::{escape_attr, escape_text, fmt, wrap_text};
use crate::{CardBody, Result};
use std::fmt::Write as _;

const CORK: &str = "#b98b5e";
const PAPER: &str = "#fdfbf5";
const NOTE_YELLOW: &str = "#fff3a8";
const TAG_PAPER: &str = "#f3e6c8";
const INK: &str = "#2b2118";
const FONT: &str = "'Special Elite', 'Courier New', monospace";

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root element id; also prefixes filter and gradient ids.
    pub diagram_id: Option<String>,
    /// Board fill. `None` uses the cork colour.
    pub background: Option<String>,
}

fn tack_fill(color: &str) -> &'static str {
    match color {
        "red" => "#d32f2f",
        "yellow" => "#f9c80e",
        "blue" => "#1e63b5",
        "green" => "#2e8b57",
        _ => "#f5f5f5",
    }
}

pub fn render_svg(scene: &Scene, options: &SvgRenderOptions) -> Result<String> {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("corkboard");
    let id = escape_attr(diagram_id);
    let background = escape_attr(options.background.as_deref().unwrap_or(CORK));
    let w = fmt(scene.width.max(1.0));
    let h = fmt(scene.height.max(1.0));

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="evidence-board">"#
    );

    out.push_str("<defs>");
    if scene.yarn_texture {
        let _ = write!(
            &mut out,
            r#"<filter id="{id}-yarn" x="-5%" y="-5%" width="110%" height="110%"><feTurbulence type="turbulence" baseFrequency="0.02" numOctaves="3" result="noise"/><feDisplacementMap in="SourceGraphic" in2="noise" scale="1.5" xChannelSelector="R" yChannelSelector="G"/></filter>"#
        );
    }
    if scene.vignette {
        let _ = write!(
            &mut out,
            r##"<radialGradient id="{id}-vignette" cx="50%" cy="50%" r="70%"><stop offset="60%" stop-color="#000000" stop-opacity="0"/><stop offset="100%" stop-color="#000000" stop-opacity="0.45"/></radialGradient>"##
        );
    }
    out.push_str("</defs>");

    let _ = write!(
        &mut out,
        r#"<rect class="board-surface" x="0" y="0" width="{w}" height="{h}" fill="{background}"/>"#
    );

    for label in &scene.ring_labels {
        let _ = write!(
            &mut out,
            r#"<text class="ring-label" x="{}" y="{}" text-anchor="middle" font-family="{FONT}" font-size="14" letter-spacing="3" fill="{INK}" fill-opacity="0.45">{}</text>"#,
            fmt(label.x),
            fmt(label.y),
            escape_text(&label.label)
        );
    }

    if scene.yarn_texture {
        let _ = write!(&mut out, r#"<g class="yarn-layer" filter="url(#{id}-yarn)">"#);
    } else {
        out.push_str(r#"<g class="yarn-layer">"#);
    }
    for thread in &scene.threads {
        let _ = write!(
            &mut out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-linecap="round" data-from="{}" data-to="{}"/>"#,
            thread.path_data(),
            escape_attr(&thread.style.color),
            fmt(thread.style.width),
            fmt(thread.style.opacity),
            escape_attr(&thread.from),
            escape_attr(&thread.to)
        );
    }
    out.push_str("</g>");

    for card in &scene.cards {
        render_card(&mut out, card);
    }

    if scene.vignette {
        let _ = write!(
            &mut out,
            r#"<rect class="board-vignette" x="0" y="0" width="{w}" height="{h}" fill="url(#{id}-vignette)" pointer-events="none"/>"#
        );
    }

    out.push_str("</svg>");
    Ok(out)
}

fn text_lines(out: &mut String, lines: &[String], x: f64, y: f64, size: f64, extra: &str) {
    for (i, line) in lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-family="{FONT}" font-size="{}" fill="{INK}"{extra}>{}</text>"#,
            fmt(x),
            fmt(y + i as f64 * size * 1.25),
            fmt(size),
            escape_text(line)
        );
    }
}

fn render_card(out: &mut String, card: &Card) {
    let mut class = format!("board-item item-{}", card.kind.as_str());
    if card.center {
        class.push_str(" center-item");
    }
    let cx = card.anchor.x;
    let cy = card.top + card.height / 2.0;
    let _ = write!(
        out,
        r#"<g class="{class}" data-id="{}""#,
        escape_attr(&card.id)
    );
    if card.rotation != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            fmt(card.rotation),
            fmt(cx),
            fmt(cy)
        );
    }
    out.push('>');

    let fill = match card.kind {
        CardKind::Note => NOTE_YELLOW,
        CardKind::Tag => TAG_PAPER,
        _ => PAPER,
    };
    let _ = write!(
        out,
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" stroke="#00000022"/>"##,
        fmt(card.left),
        fmt(card.top),
        fmt(card.width),
        fmt(card.height)
    );

    let pad = 10.0;
    let inner = card.width - pad * 2.0;
    let x = card.left + pad;
    let centered = r#" text-anchor="middle""#;
    match &card.body {
        CardBody::Polaroid {
            photo,
            caption,
            label,
        } => {
            let img_h = inner;
            match photo {
                Some(href) => {
                    let _ = write!(
                        out,
                        r#"<image class="polaroid-image" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" href="{}"/>"#,
                        fmt(x),
                        fmt(card.top + pad),
                        fmt(inner),
                        fmt(img_h),
                        escape_attr(href)
                    );
                }
                None => {
                    let _ = write!(
                        out,
                        r##"<rect class="polaroid-image" x="{}" y="{}" width="{}" height="{}" fill="#3a3a3a"/>"##,
                        fmt(x),
                        fmt(card.top + pad),
                        fmt(inner),
                        fmt(img_h)
                    );
                }
            }
            let base = card.top + pad + img_h + 18.0;
            let caption_lines = wrap_text(caption, inner, 13.0, 2);
            text_lines(out, &caption_lines, cx, base, 13.0, centered);
            if let Some(label) = label {
                let lines = wrap_text(label, inner, 10.0, 1);
                let y = base + caption_lines.len() as f64 * 16.0;
                text_lines(out, &lines, cx, y, 10.0, centered);
            }
        }
        CardBody::Note { label, text } => {
            let mut y = card.top + pad + 16.0;
            if let Some(label) = label {
                let lines = wrap_text(label, inner, 12.0, 1);
                text_lines(out, &lines, x, y, 12.0, r#" font-weight="bold""#);
                y += 18.0;
            }
            if let Some(text) = text {
                let lines = wrap_text(text, inner, 11.0, 6);
                text_lines(out, &lines, x, y, 11.0, "");
            }
        }
        CardBody::Document {
            label,
            title,
            notes,
        } => {
            let mut y = card.top + pad + 14.0;
            if let Some(label) = label {
                let lines = wrap_text(label, inner, 10.0, 1);
                text_lines(out, &lines, x, y, 10.0, "");
                y += 16.0;
            }
            if let Some(title) = title {
                let lines = wrap_text(title, inner, 13.0, 2);
                text_lines(out, &lines, x, y, 13.0, r#" font-weight="bold""#);
                y += lines.len() as f64 * 16.25 + 4.0;
            }
            if let Some(notes) = notes {
                let lines = wrap_text(notes, inner, 10.0, 4);
                text_lines(out, &lines, x, y, 10.0, "");
            }
            let _ = write!(
                out,
                r##"<text class="doc-stamp" x="{}" y="{}" text-anchor="end" font-family="{FONT}" font-size="12" fill="#b22222" transform="rotate(-8 {} {})">Evidence</text>"##,
                fmt(card.left + card.width - pad),
                fmt(card.top + card.height - pad),
                fmt(card.left + card.width - pad),
                fmt(card.top + card.height - pad)
            );
        }
        CardBody::Tag { label, name } => {
            let mut y = card.top + pad + 14.0;
            if let Some(label) = label {
                let lines = wrap_text(label, inner, 10.0, 1);
                text_lines(out, &lines, cx, y, 10.0, centered);
                y += 16.0;
            }
            if let Some(name) = name {
                let lines = wrap_text(name, inner, 13.0, 1);
                text_lines(out, &lines, cx, y, 13.0, centered);
            }
        }
        CardBody::Blank => {}
    }

    let _ = write!(
        out,
        r##"<circle class="thumbtack" cx="{}" cy="{}" r="7" fill="{}" stroke="#00000055"/>"##,
        fmt(cx),
        fmt(card.top),
        tack_fill(card.kind.tack_color())
    );
    out.push_str("</g>");
}
