//! Pipeline – ties parsing, financial computation, composition, and PDF
//! encoding into a single call.
//!
//! One render call is synchronous and self-contained: the record, the
//! breakdown, and the draft are all local to the call, so concurrent
//! renders for different submissions need no coordination. The issue date
//! is an explicit input (never read from the wall clock here) so identical
//! inputs always produce an identical draft.

use chrono::NaiveDate;
use serde_json::Value;

use crate::assets::AssetProvider;
use crate::booking::BookingRecord;
use crate::compose::compose;
use crate::draft::DocumentDraft;
use crate::error::Result;
use crate::finance;
use crate::fonts::FontManager;
use crate::render::encode;
use crate::style::LayoutStyle;

/// Options for one voucher rendition.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document title, used for the PDF metadata and the page heading.
    pub title: String,
    /// Layout preset driving all spacing/typography constants.
    pub style: LayoutStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Booking Confirmation Receipt".to_string(),
            style: LayoutStyle::classic(),
        }
    }
}

/// Full pipeline: booking payload → PDF bytes.
///
/// Returns `(pdf_bytes, draft)`; the draft is the frozen drawing-op
/// representation, useful for tests and debugging. The only caller-visible
/// failures are a missing/non-object payload and an encoder error — bad
/// field values degrade to defaults instead.
pub fn render_voucher(
    payload: &Value,
    invoice_no: &str,
    issue_date: NaiveDate,
    assets: &dyn AssetProvider,
    options: &RenderOptions,
) -> Result<(Vec<u8>, DocumentDraft)> {
    let record = BookingRecord::from_value(payload)?;
    let draft = compose_draft(&record, invoice_no, issue_date, options, assets);
    let bytes = encode(&draft, assets)?;
    Ok((bytes, draft))
}

/// Compose only the draft (no PDF encoding) – useful for testing.
pub fn compose_draft(
    record: &BookingRecord,
    invoice_no: &str,
    issue_date: NaiveDate,
    options: &RenderOptions,
    assets: &dyn AssetProvider,
) -> DocumentDraft {
    let financials = finance::compute(record);
    let fonts = FontManager::from_assets(assets);
    compose(
        record,
        &financials,
        invoice_no,
        issue_date,
        &options.title,
        &options.style,
        &fonts,
    )
}

/// Filename for transmitting the finished document, derived from the
/// caller-supplied identifier: `WL/2026/042` → `booking-confirmation-wl-2026-042.pdf`.
pub fn suggested_filename(invoice_no: &str) -> String {
    let slug: String = invoice_no
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "booking-confirmation.pdf".to_string()
    } else {
        format!("booking-confirmation-{slug}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;
    use serde_json::json;

    #[test]
    fn pipeline_basic() {
        let payload = json!({
            "clientName": "S. Rao",
            "destination": "Andamans",
            "costPerAdult": 30000,
            "numberOfAdults": 2,
        });
        let (bytes, draft) = render_voucher(
            &payload,
            "WL-2026-0007",
            NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            &StaticAssets::empty(),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[0..5], b"%PDF-");
        assert_eq!(draft.pages.len(), 1);
    }

    #[test]
    fn null_payload_is_rejected_before_drawing() {
        let err = render_voucher(
            &Value::Null,
            "X",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            &StaticAssets::empty(),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no booking record"));
    }

    #[test]
    fn filename_is_slugged() {
        assert_eq!(
            suggested_filename("WL/2026/042"),
            "booking-confirmation-wl-2026-042.pdf"
        );
        assert_eq!(suggested_filename("///"), "booking-confirmation.pdf");
    }
}
