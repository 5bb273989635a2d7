//! DOM-shaped HTML fragment for a mounted board.
//!
//! Class names and nesting follow the interactive page, so existing board stylesheets apply:
//! `.board-viewport > .board-surface` holds the yarn SVG, the item divs, ring labels and the
//! vignette; `.board-controls` and the `.bb-modal` shell are siblings of the viewport.

use crate::modal::DetailModal;
use crate::scene::{Card, Scene};
use crate::util::{escape_attr, escape_text, fmt};
use crate::viewport::Viewport;
use crate::CardBody;
use std::fmt::Write as _;

const YARN_FILTER_ID: &str = "yarn-tex";

/// Container shown when the dataset could not be loaded: plain text, no viewport, no modal.
pub fn render_fallback_html(container_id: &str, message: &str) -> String {
    format!(
        r#"<div id="{}" class="bulletin-board">{}</div>"#,
        escape_attr(container_id),
        escape_text(message)
    )
}

pub fn render_board_html(
    container_id: &str,
    scene: &Scene,
    viewport: &Viewport,
    modal: &DetailModal,
) -> String {
    let mut out = String::new();
    let w = fmt(scene.width);
    let h = fmt(scene.height);
    let _ = write!(
        &mut out,
        r#"<div id="{}" class="bulletin-board"><div class="board-viewport"><div class="board-surface" style="width:{w}px;height:{h}px;transform:{}">"#,
        escape_attr(container_id),
        viewport.transform()
    );

    let _ = write!(
        &mut out,
        r#"<svg class="yarn-layer" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    if scene.yarn_texture {
        let _ = write!(
            &mut out,
            r#"<defs><filter id="{YARN_FILTER_ID}"><feTurbulence type="turbulence" baseFrequency="0.02" numOctaves="3" result="n"/><feDisplacementMap in="SourceGraphic" in2="n" scale="1.5" xChannelSelector="R" yChannelSelector="G"/></filter></defs>"#
        );
    }
    for thread in &scene.threads {
        let _ = write!(
            &mut out,
            r#"<path class="yarn-thread" d="{}" fill="none" stroke="{}" stroke-width="{}" opacity="{}""#,
            thread.path_data(),
            escape_attr(&thread.style.color),
            fmt(thread.style.width),
            fmt(thread.style.opacity)
        );
        if scene.yarn_texture {
            let _ = write!(&mut out, r#" filter="url(#{YARN_FILTER_ID})""#);
        }
        out.push_str("/>");
    }
    out.push_str("</svg>");

    for card in &scene.cards {
        render_item(&mut out, card);
    }

    for label in &scene.ring_labels {
        let _ = write!(
            &mut out,
            r#"<div class="ring-label" style="left:{}px;top:{}px">{}</div>"#,
            fmt(label.x),
            fmt(label.y),
            escape_text(&label.label)
        );
    }

    if scene.vignette {
        out.push_str(r#"<div class="board-vignette"></div>"#);
    }
    out.push_str("</div></div>");

    out.push_str(concat!(
        r#"<div class="board-controls">"#,
        r#"<button type="button" title="Zoom in">+</button>"#,
        r#"<button type="button" title="Zoom out">−</button>"#,
        r#"<button type="button" title="Reset view">⌂</button>"#,
        "</div>"
    ));

    out.push_str(&modal.render_html());
    out.push_str("</div>");
    out
}

fn text_div(out: &mut String, class: &str, text: Option<&str>) {
    if let Some(text) = text {
        let _ = write!(out, r#"<div class="{class}">{}</div>"#, escape_text(text));
    }
}

fn render_item(out: &mut String, card: &Card) {
    let center = if card.center { " center-item" } else { "" };
    let _ = write!(
        out,
        r#"<div class="board-item item-{}{center}" data-id="{}" style="width:{}px;left:{}px;top:{}px"#,
        card.kind.as_str(),
        escape_attr(&card.id),
        fmt(card.width),
        fmt(card.left),
        fmt(card.top)
    );
    if card.rotation != 0.0 {
        let _ = write!(out, ";transform:rotate({}deg)", fmt(card.rotation));
    }
    let _ = write!(
        out,
        r#""><div class="thumbtack {}"></div>"#,
        card.kind.tack_color()
    );

    match &card.body {
        CardBody::Polaroid {
            photo,
            caption,
            label,
        } => {
            out.push_str(r#"<div class="polaroid-frame">"#);
            match photo {
                Some(src) => {
                    let _ = write!(
                        out,
                        r#"<div class="polaroid-image has-photo"><img src="{}" alt="{}"></div>"#,
                        escape_attr(src),
                        escape_attr(caption)
                    );
                }
                None => out.push_str(r#"<div class="polaroid-image"></div>"#),
            }
            text_div(out, "polaroid-caption", Some(caption));
            if card.center {
                out.push_str(r#"<div class="center-marker"></div>"#);
            }
            out.push_str("</div>");
            text_div(out, "polaroid-label", label.as_deref());
        }
        CardBody::Note { label, text } => {
            out.push_str(r#"<div class="note-paper">"#);
            text_div(out, "note-label", label.as_deref());
            text_div(out, "note-text", text.as_deref());
            out.push_str("</div>");
        }
        CardBody::Document {
            label,
            title,
            notes,
        } => {
            out.push_str(r#"<div class="doc-paper">"#);
            text_div(out, "doc-label", label.as_deref());
            text_div(out, "doc-title", title.as_deref());
            text_div(out, "doc-notes", notes.as_deref());
            out.push_str(r#"<div class="doc-stamp">Evidence</div></div>"#);
        }
        CardBody::Tag { label, name } => {
            out.push_str(r#"<div class="tag-card">"#);
            text_div(out, "tag-label", label.as_deref());
            text_div(out, "tag-name", name.as_deref());
            out.push_str("</div>");
        }
        CardBody::Blank => {}
    }
    out.push_str("</div>");
}
