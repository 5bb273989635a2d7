//! Number formatting, escaping and deterministic text wrapping shared by the SVG and HTML
//! writers.

use std::borrow::Cow;

/// Stringifies a number for SVG/CSS output: shortest round-trippable form, no `-0`, and no
/// float noise from our own arithmetic.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

/// Path coordinates use 3 fractional digits, trailing zeros trimmed.
pub(crate) fn fmt_path(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }

    let r = (v * 1000.0).round() / 1000.0;
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    htmlize::escape_text(text)
}

pub(crate) fn escape_attr(text: &str) -> Cow<'_, str> {
    htmlize::escape_attribute(text)
}

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Greedy word wrap against a fixed per-glyph width.
///
/// At most `max_lines` lines are returned; overflow is marked with a trailing ellipsis. Words
/// longer than a line are hard-split.
pub(crate) fn wrap_text(text: &str, width_px: f64, font_size: f64, max_lines: usize) -> Vec<String> {
    let per_line = ((width_px / (font_size * CHAR_WIDTH_FACTOR)).floor() as usize).max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > per_line {
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            let rest = word.split_off(per_line);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let cur_len = cur.chars().count();
        if cur.is_empty() {
            cur.extend(word);
        } else if cur_len + 1 + word.len() <= per_line {
            cur.push(' ');
            cur.extend(word);
        } else {
            lines.push(std::mem::take(&mut cur));
            cur.extend(word);
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }

    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            if chars.len() >= per_line {
                chars.truncate(per_line.saturating_sub(1));
            }
            chars.push('…');
            *last = chars.into_iter().collect();
        }
    }
    lines
}
