//! PDF encoder – takes a [`DocumentDraft`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).
//!
//! Raster slots are resolved through the [`AssetProvider`]: each referenced
//! asset is registered once as an XObject; a missing or undecodable asset
//! is logged and its slot left blank (a `log::warn` is emitted). Draft
//! coordinates use a top-left origin and are flipped here to PDF's
//! bottom-left convention.

use std::collections::{HashMap, HashSet};

use printpdf::*;

use crate::assets::{AssetKind, AssetProvider};
use crate::draft::{DocumentDraft, DrawOp, PageDraft, Stroke};
use crate::error::Result;

/// A printpdf XObject together with the pixel dimensions of the source image.
struct ImageResource {
    xobj_id: XObjectId,
    px_width: u32,
    px_height: u32,
}

/// Encode a composed draft into PDF bytes.
pub fn encode(draft: &DocumentDraft, assets: &dyn AssetProvider) -> Result<Vec<u8>> {
    let page_w = Mm(draft.page_width * 0.352778); // pt → mm
    let page_h = Mm(draft.page_height * 0.352778);

    let mut doc = PdfDocument::new(&draft.title);

    // ── Pre-register every referenced raster asset ────────────────────────
    let mut referenced: HashSet<AssetKind> = HashSet::new();
    for page in &draft.pages {
        for op in &page.ops {
            if let DrawOp::Image { asset, .. } = op {
                referenced.insert(*asset);
            }
        }
    }

    let mut image_resources: HashMap<AssetKind, ImageResource> = HashMap::new();
    let mut img_warnings: Vec<PdfWarnMsg> = Vec::new();

    for kind in referenced {
        let Some(bytes) = assets.load(kind) else {
            log::warn!("Leaving {kind:?} slot blank — asset unavailable");
            continue;
        };

        // Decode with the `image` crate to obtain pixel dimensions.
        let dyn_img = match ::image::load_from_memory(&bytes) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("Leaving {kind:?} slot blank — decode error: {e}");
                continue;
            }
        };
        let (px_width, px_height) = (dyn_img.width(), dyn_img.height());

        // Register with printpdf as a reusable XObject.
        let raw = match RawImage::decode_from_bytes(&bytes, &mut img_warnings) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Leaving {kind:?} slot blank — PDF encode error: {e}");
                continue;
            }
        };
        let xobj_id = doc.add_image(&raw);

        image_resources.insert(
            kind,
            ImageResource {
                xobj_id,
                px_width,
                px_height,
            },
        );
    }

    // ── Encode pages ──────────────────────────────────────────────────────
    let mut pages = Vec::new();
    for page_draft in &draft.pages {
        let ops = encode_page(page_draft, draft.page_height, &image_resources);
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    Ok(bytes)
}

fn encode_page(
    page: &PageDraft,
    page_height: f32,
    images: &HashMap<AssetKind, ImageResource>,
) -> Vec<Op> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                if let Some(color) = fill {
                    push_filled_rect(&mut ops, *x, *y, *width, *height, *color, page_height);
                }
                if let Some(stroke) = stroke {
                    push_stroked_rect(&mut ops, *x, *y, *width, *height, stroke, page_height);
                }
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                ops.push(Op::SetOutlineColor {
                    col: rgb(*color),
                });
                ops.push(Op::SetOutlineThickness { pt: Pt(*width) });
                ops.push(Op::DrawLine {
                    line: Line {
                        points: vec![
                            line_point(*x1, page_height - y1),
                            line_point(*x2, page_height - y2),
                        ],
                        is_closed: false,
                    },
                });
            }
            DrawOp::Text {
                x,
                y,
                content,
                size,
                bold,
                color,
            } => {
                let font = if *bold {
                    BuiltinFont::HelveticaBold
                } else {
                    BuiltinFont::Helvetica
                };
                // Baseline ≈ top of line + ascender (approx 0.75 × size).
                let text_y = page_height - y - size * 0.75;

                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(*x),
                        y: Pt(text_y),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(*size),
                    font,
                });
                ops.push(Op::SetFillColor { col: rgb(*color) });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(to_winlatin(content))],
                    font,
                });
                ops.push(Op::EndTextSection);
            }
            DrawOp::Image {
                asset,
                x,
                y,
                width,
                height,
            } => {
                if let Some(res) = images.get(asset) {
                    // translate_y = bottom edge of the image in PDF space.
                    let img_bottom_y = page_height - y - height;

                    // At dpi=72 printpdf renders 1 px = 1 pt, so
                    // scale = desired_pt / px_dim.
                    let scale_x = if res.px_width > 0 {
                        width / res.px_width as f32
                    } else {
                        1.0
                    };
                    let scale_y = if res.px_height > 0 {
                        height / res.px_height as f32
                    } else {
                        1.0
                    };

                    ops.push(Op::UseXobject {
                        id: res.xobj_id.clone(),
                        transform: XObjectTransform {
                            translate_x: Some(Pt(*x)),
                            translate_y: Some(Pt(img_bottom_y)),
                            dpi: Some(72.0),
                            scale_x: Some(scale_x),
                            scale_y: Some(scale_y),
                            rotate: None,
                        },
                    });
                }
            }
        }
    }
    ops
}

fn rgb(color: [f32; 3]) -> Color {
    Color::Rgb(Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
        icc_profile: None,
    })
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn push_filled_rect(
    ops: &mut Vec<Op>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: [f32; 3],
    page_height: f32,
) {
    let top = page_height - y;
    let bottom = top - height;
    ops.push(Op::SetFillColor { col: rgb(color) });
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    line_point(x, bottom),
                    line_point(x + width, bottom),
                    line_point(x + width, top),
                    line_point(x, top),
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

fn push_stroked_rect(
    ops: &mut Vec<Op>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    stroke: &Stroke,
    page_height: f32,
) {
    let top = page_height - y;
    let bottom = top - height;
    ops.push(Op::SetOutlineColor {
        col: rgb(stroke.color),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(stroke.width),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                line_point(x, top),
                line_point(x + width, top),
                line_point(x + width, bottom),
                line_point(x, bottom),
            ],
            is_closed: true,
        },
    });
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82, // single low-9 quote
            '\u{201E}' => 0x84, // double low-9 quote
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{2122}' => 0x99, // trademark
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for 0x80-0x9F range; printpdf passes
    // these bytes straight to the PDF stream, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;

    #[test]
    fn encode_empty_draft_yields_valid_pdf() {
        let draft = DocumentDraft::new("empty", 595.28, 841.89);
        let bytes = encode(&draft, &StaticAssets::empty()).unwrap();
        assert!(bytes.len() > 100, "PDF should have content");
        // PDF magic number
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn unresolvable_image_slots_are_skipped() {
        let mut draft = DocumentDraft::new("blank slots", 595.28, 841.89);
        let mut page = PageDraft::new(0);
        page.ops.push(DrawOp::Image {
            asset: AssetKind::Seal,
            x: 40.0,
            y: 40.0,
            width: 64.0,
            height: 64.0,
        });
        draft.pages.push(page);

        // Provider has garbage bytes for the brand mark and nothing else.
        let assets = StaticAssets::empty().with(AssetKind::BrandMark, vec![0x00, 0x01]);
        let bytes = encode(&draft, &assets).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }
}
