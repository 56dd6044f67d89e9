//! Text measurement using `ttf-parser`.
//!
//! Rendering always uses the builtin PDF fonts; when the optional display
//! font asset is present its glyph advances refine measurement (cell
//! alignment and terms wrapping), otherwise a Helvetica-like average-width
//! heuristic is used.

use crate::assets::{AssetKind, AssetProvider};

/// Measures text for the composer. Holds the optional display font bytes.
pub struct FontManager {
    font_bytes: Option<Vec<u8>>,
    units_per_em: f32,
}

impl FontManager {
    /// A manager with heuristic metrics only.
    pub fn new() -> Self {
        Self {
            font_bytes: None,
            units_per_em: 1000.0,
        }
    }

    /// Try to load the display font from the provider. A missing or
    /// unparseable font falls back to heuristics; never fails.
    pub fn from_assets(provider: &dyn AssetProvider) -> Self {
        let mut mgr = Self::new();
        if let Some(bytes) = provider.load(AssetKind::DisplayFont) {
            match ttf_parser::Face::parse(&bytes, 0) {
                Ok(face) => {
                    mgr.units_per_em = face.units_per_em() as f32;
                    mgr.font_bytes = Some(bytes);
                }
                Err(e) => log::warn!("Ignoring display font — parse error: {e}"),
            }
        }
        mgr
    }

    /// Measure the width of a string at a given size (points).
    pub fn measure(&self, text: &str, size: f32, bold: bool) -> f32 {
        if let Some(bytes) = &self.font_bytes {
            if let Ok(face) = ttf_parser::Face::parse(bytes, 0) {
                let scale = size / self.units_per_em;
                let mut width = 0.0f32;
                for ch in text.chars() {
                    match face.glyph_index(ch) {
                        Some(gid) => {
                            width += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
                        }
                        None => width += size * 0.5,
                    }
                }
                return width;
            }
        }
        // Average char width ≈ 0.5 × size for proportional fonts; bold runs
        // ~10 % wider.
        let avg = if bold { 0.55 } else { 0.5 };
        text.chars().count() as f32 * size * avg
    }

    /// True when real font bytes back the measurements.
    pub fn has_display_font(&self) -> bool {
        self.font_bytes.is_some()
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedy word-wrap to fit within `max_width` points.
pub fn wrap_text(
    text: &str,
    size: f32,
    bold: bool,
    max_width: f32,
    fonts: &FontManager,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in &words {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };
            let w = fonts.measure(&candidate, size, bold);
            if w > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = word.to_string();
            } else {
                current_line = candidate;
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
