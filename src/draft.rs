//! Document draft – the frozen intermediate representation between the
//! composer and the PDF encoder.
//!
//! A draft is an ordered list of pages, each an ordered list of primitive
//! drawing operations; op order is paint order. Coordinates are PDF points
//! with the origin at the page's top-left corner (the encoder flips to
//! PDF's bottom-left convention). Drafts are deterministic and
//! serializable, which is what the idempotence and pagination tests
//! assert against.

use serde::{Deserialize, Serialize};

use crate::assets::AssetKind;

/// A complete composed document, ready for encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDraft {
    /// Title embedded in the PDF metadata.
    pub title: String,
    /// Page width in points.
    pub page_width: f32,
    /// Page height in points.
    pub page_height: f32,
    /// Ordered pages.
    pub pages: Vec<PageDraft>,
}

/// One page of drawing operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDraft {
    pub index: usize,
    pub ops: Vec<DrawOp>,
}

/// Stroke parameters for rects and lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub color: [f32; 3],
}

/// A primitive drawing operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DrawOp {
    /// Axis-aligned rectangle; `y` is the top edge.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<[f32; 3]>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: [f32; 3],
        width: f32,
    },
    /// Single text run; `y` is the top of the line box.
    Text {
        x: f32,
        y: f32,
        content: String,
        size: f32,
        bold: bool,
        color: [f32; 3],
    },
    /// Raster slot resolved by the encoder via the asset provider.
    Image {
        asset: AssetKind,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl DocumentDraft {
    pub fn new(title: impl Into<String>, page_width: f32, page_height: f32) -> Self {
        Self {
            title: title.into(),
            page_width,
            page_height,
            pages: Vec::new(),
        }
    }

    /// Serialise to JSON (stable across identical inputs).
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl PageDraft {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ops: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let mut draft = DocumentDraft::new("test", 595.28, 841.89);
        let mut page = PageDraft::new(0);
        page.ops.push(DrawOp::Text {
            x: 40.0,
            y: 100.0,
            content: "hello".to_string(),
            size: 9.5,
            bold: false,
            color: [0.0, 0.0, 0.0],
        });
        page.ops.push(DrawOp::Image {
            asset: AssetKind::Seal,
            x: 40.0,
            y: 700.0,
            width: 64.0,
            height: 64.0,
        });
        draft.pages.push(page);

        let parsed = DocumentDraft::from_json(&draft.to_json()).unwrap();
        assert_eq!(parsed.pages.len(), 1);
        assert_eq!(parsed.pages[0].ops.len(), 2);
        assert_eq!(parsed.title, "test");
    }
}
