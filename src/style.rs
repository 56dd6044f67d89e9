//! Layout styles – the spacing, typography, and color constants that drive
//! the composer.
//!
//! The voucher historically shipped in two near-duplicate layouts differing
//! only in band heights, cell heights, and a handful of colors. Both survive
//! here as named presets of one [`LayoutStyle`]; the composer itself is
//! written once.

/// Fully resolved layout constants for one voucher rendition.
///
/// All lengths are PDF points (1 pt = 1/72 inch) with a top-left origin.
#[derive(Debug, Clone)]
pub struct LayoutStyle {
    // Page geometry
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,

    // Chrome
    pub header_band_height: f32,
    pub footer_band_height: f32,
    pub seal_size: f32,
    pub brand_mark_width: f32,
    pub brand_mark_height: f32,

    // Section spacing
    pub section_header_height: f32,
    pub section_gap: f32,
    pub compact_row_height: f32,
    pub wide_row_height: f32,
    pub cost_row_height: f32,
    pub cell_inset: f32,

    // Typography
    pub title_size: f32,
    pub section_label_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    pub watermark_size: f32,
    pub line_height: f32,

    // Colors (RGB, 0..1)
    pub band_color: [f32; 3],
    pub accent_color: [f32; 3],
    pub section_bar_color: [f32; 3],
    pub border_color: [f32; 3],
    pub text_color: [f32; 3],
    pub muted_color: [f32; 3],
    pub watermark_color: [f32; 3],
}

impl LayoutStyle {
    /// The original full-weight layout: navy chrome, roomy cells.
    pub fn classic() -> Self {
        Self {
            // A4
            page_width: 595.28,
            page_height: 841.89,
            margin: 40.0,

            header_band_height: 66.0,
            footer_band_height: 28.0,
            seal_size: 64.0,
            brand_mark_width: 96.0,
            brand_mark_height: 38.0,

            section_header_height: 18.0,
            section_gap: 12.0,
            compact_row_height: 18.0,
            wide_row_height: 20.0,
            cost_row_height: 18.0,
            cell_inset: 5.0,

            title_size: 15.0,
            section_label_size: 10.5,
            body_size: 9.5,
            small_size: 8.0,
            watermark_size: 52.0,
            line_height: 1.45,

            band_color: [0.10, 0.18, 0.32],
            accent_color: [0.77, 0.56, 0.18],
            section_bar_color: [0.91, 0.93, 0.96],
            border_color: [0.62, 0.66, 0.72],
            text_color: [0.12, 0.12, 0.14],
            muted_color: [0.42, 0.45, 0.50],
            watermark_color: [0.93, 0.93, 0.94],
        }
    }

    /// The condensed counter-foil layout: teal chrome, tighter cells.
    pub fn slim() -> Self {
        Self {
            header_band_height: 48.0,
            footer_band_height: 22.0,
            seal_size: 52.0,
            brand_mark_width: 78.0,
            brand_mark_height: 30.0,

            section_header_height: 15.0,
            section_gap: 10.0,
            compact_row_height: 16.0,
            wide_row_height: 18.0,
            cost_row_height: 16.0,

            title_size: 13.0,
            section_label_size: 9.5,
            body_size: 8.5,
            small_size: 7.0,
            watermark_size: 44.0,

            band_color: [0.05, 0.33, 0.36],
            accent_color: [0.85, 0.49, 0.13],
            section_bar_color: [0.90, 0.95, 0.94],
            ..Self::classic()
        }
    }

    /// Look a preset up by its CLI name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "slim" => Some(Self::slim()),
            _ => None,
        }
    }

    /// Width available to content between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Vertical space the footer block needs: seal, legal lines, and the
    /// bottom band. The composer's single pagination decision compares the
    /// cursor against `page_height - margin - footer_block_height()`.
    pub fn footer_block_height(&self) -> f32 {
        let legal_lines = 2.0 * self.small_size * self.line_height;
        self.seal_size + 6.0 + legal_lines + 10.0 + self.footer_band_height
    }

    /// Line advance for body text at the given size.
    pub fn line_advance(&self, size: f32) -> f32 {
        size * self.line_height
    }
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        assert!(LayoutStyle::by_name("classic").is_some());
        assert!(LayoutStyle::by_name("slim").is_some());
        assert!(LayoutStyle::by_name("baroque").is_none());
    }

    #[test]
    fn slim_is_tighter_than_classic() {
        let classic = LayoutStyle::classic();
        let slim = LayoutStyle::slim();
        assert!(slim.compact_row_height < classic.compact_row_height);
        assert!(slim.header_band_height < classic.header_band_height);
        assert_eq!(slim.page_width, classic.page_width);
    }

    #[test]
    fn footer_block_fits_on_a_page() {
        let style = LayoutStyle::classic();
        assert!(style.footer_block_height() < style.page_height / 4.0);
    }
}
