//! Table renderer – fixed-column-width bordered grids.
//!
//! One algorithm serves all three voucher tables; the variants differ only
//! in their column plan. Cell text never wraps: column widths are
//! hand-tuned to typical field lengths and overflow is clipped by the
//! viewer. A row with fewer populated cells than columns still strokes
//! every column's border — ragged content, never a ragged grid.

use crate::draft::{DrawOp, PageDraft, Stroke};
use crate::fonts::FontManager;
use crate::style::LayoutStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Right,
}

/// Column widths, row height, and per-column alignment for one table
/// variant.
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    pub widths: Vec<f32>,
    pub row_height: f32,
    pub align: Vec<CellAlign>,
    /// Shade and embolden the first row (column headings).
    pub heading_row: bool,
}

impl ColumnPlan {
    /// Two-column label/value grid used by the invoice and client sections.
    pub fn compact(style: &LayoutStyle) -> Self {
        let w = style.content_width();
        Self {
            widths: vec![w * 0.30, w * 0.70],
            row_height: style.compact_row_height,
            align: vec![CellAlign::Left, CellAlign::Left],
            heading_row: false,
        }
    }

    /// Six-column booking summary grid.
    pub fn wide(style: &LayoutStyle) -> Self {
        let w = style.content_width();
        Self {
            widths: vec![
                w * 0.22,
                w * 0.14,
                w * 0.15,
                w * 0.15,
                w * 0.10,
                w * 0.24,
            ],
            row_height: style.wide_row_height,
            align: vec![CellAlign::Left; 6],
            heading_row: true,
        }
    }

    /// Four-column cost breakdown grid with right-aligned money columns.
    pub fn cost(style: &LayoutStyle) -> Self {
        let w = style.content_width();
        Self {
            widths: vec![w * 0.46, w * 0.20, w * 0.12, w * 0.22],
            row_height: style.cost_row_height,
            align: vec![
                CellAlign::Left,
                CellAlign::Right,
                CellAlign::Right,
                CellAlign::Right,
            ],
            heading_row: true,
        }
    }
}

/// Draw a bordered grid with its top-left corner at `(x, cursor_y)` and
/// return the cursor below the last row.
pub fn draw_grid(
    page: &mut PageDraft,
    x: f32,
    cursor_y: f32,
    rows: &[Vec<String>],
    plan: &ColumnPlan,
    style: &LayoutStyle,
    fonts: &FontManager,
) -> f32 {
    debug_assert_eq!(plan.widths.len(), plan.align.len());

    let mut cursor = cursor_y;
    for (row_idx, row) in rows.iter().enumerate() {
        let heading = plan.heading_row && row_idx == 0;
        let mut cell_x = x;

        for (col_idx, col_width) in plan.widths.iter().enumerate() {
            // Border first so text paints over the shading.
            page.ops.push(DrawOp::Rect {
                x: cell_x,
                y: cursor,
                width: *col_width,
                height: plan.row_height,
                fill: heading.then_some(style.section_bar_color),
                stroke: Some(Stroke {
                    width: 0.6,
                    color: style.border_color,
                }),
            });

            if let Some(cell) = row.get(col_idx) {
                if !cell.is_empty() {
                    let size = style.body_size;
                    let text_x = match plan.align[col_idx] {
                        CellAlign::Left => cell_x + style.cell_inset,
                        CellAlign::Right => {
                            cell_x + col_width
                                - style.cell_inset
                                - fonts.measure(cell, size, heading)
                        }
                    };
                    page.ops.push(DrawOp::Text {
                        x: text_x,
                        y: cursor + (plan.row_height - size) / 2.0,
                        content: cell.clone(),
                        size,
                        bold: heading,
                        color: style.text_color,
                    });
                }
            }

            cell_x += col_width;
        }
        cursor += plan.row_height;
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::PageDraft;

    fn count_rects(page: &PageDraft) -> usize {
        page.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
            .count()
    }

    #[test]
    fn cursor_advances_by_row_count() {
        let style = LayoutStyle::classic();
        let fonts = FontManager::new();
        let plan = ColumnPlan::compact(&style);
        let mut page = PageDraft::new(0);
        let rows = vec![
            vec!["Client Name".to_string(), "A. Traveller".to_string()],
            vec!["Email".to_string(), "a@example.com".to_string()],
        ];
        let end = draw_grid(&mut page, 40.0, 100.0, &rows, &plan, &style, &fonts);
        assert_eq!(end, 100.0 + 2.0 * style.compact_row_height);
    }

    #[test]
    fn ragged_row_still_reserves_every_column() {
        let style = LayoutStyle::classic();
        let fonts = FontManager::new();
        let plan = ColumnPlan::cost(&style);
        let mut page = PageDraft::new(0);
        // One cell populated out of four.
        let rows = vec![vec!["Balance Payable".to_string()]];
        draw_grid(&mut page, 40.0, 100.0, &rows, &plan, &style, &fonts);
        assert_eq!(count_rects(&page), 4);
    }

    #[test]
    fn heading_row_is_shaded_and_bold() {
        let style = LayoutStyle::classic();
        let fonts = FontManager::new();
        let plan = ColumnPlan::wide(&style);
        let mut page = PageDraft::new(0);
        let rows = vec![
            vec!["Destination".to_string(); 6],
            vec!["Goa".to_string(); 6],
        ];
        draw_grid(&mut page, 40.0, 100.0, &rows, &plan, &style, &fonts);

        let shaded = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { fill: Some(_), .. }))
            .count();
        assert_eq!(shaded, 6);

        let bold_runs = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { bold: true, .. }))
            .count();
        assert_eq!(bold_runs, 6);
    }

    #[test]
    fn plans_span_the_content_width() {
        let style = LayoutStyle::classic();
        for plan in [
            ColumnPlan::compact(&style),
            ColumnPlan::wide(&style),
            ColumnPlan::cost(&style),
        ] {
            let total: f32 = plan.widths.iter().sum();
            assert!((total - style.content_width()).abs() < 0.5);
        }
    }
}
