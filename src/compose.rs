//! Page composer – the layout state machine that turns a booking record and
//! its financial breakdown into a [`DocumentDraft`].
//!
//! Sections run in a fixed order: header chrome, invoice details, client
//! details, booking summary, cost breakdown, terms, signatory, footer
//! chrome. The vertical cursor is threaded explicitly through every step
//! and is monotonically non-decreasing within a page. The one structural
//! pagination decision happens before the footer block: when the remaining
//! space cannot hold it, the current page is pushed, the watermark is
//! redrawn on a fresh page, and the footer block starts at the top margin.

use chrono::NaiveDate;

use crate::assets::AssetKind;
use crate::booking::BookingRecord;
use crate::draft::{DocumentDraft, DrawOp, PageDraft, Stroke};
use crate::finance::FinancialBreakdown;
use crate::fonts::{wrap_text, FontManager};
use crate::format::{
    format_count, format_currency, format_date, format_duration, format_naive_date, NOT_AVAILABLE,
};
use crate::style::LayoutStyle;
use crate::table::{draw_grid, ColumnPlan};

pub const AGENCY_NAME: &str = "Wanderlane Holidays Pvt. Ltd.";
pub const AGENCY_TAGLINE: &str = "Curated journeys across the subcontinent";
pub const AGENCY_CONTACT: &str =
    "22 Marine Parade, Mumbai 400002  |  bookings@wanderlane.in  |  +91 98200 11223";
const WATERMARK_TEXT: &str = "WANDERLANE";
const LEGAL_LINES: [&str; 2] = [
    "This is a system-generated confirmation of the booking and the amounts stated herein.",
    "Subject to the terms above. E. & O. E.",
];

/// Compose the full voucher draft. Pure with respect to its inputs: the
/// same record, identifier, and issue date always yield an identical draft.
pub fn compose(
    record: &BookingRecord,
    financials: &FinancialBreakdown,
    invoice_no: &str,
    issue_date: NaiveDate,
    title: &str,
    style: &LayoutStyle,
    fonts: &FontManager,
) -> DocumentDraft {
    let mut composer = Composer::new(title, style, fonts);

    let cursor = composer.begin_first_page();
    let cursor = composer.header_chrome(cursor, title);
    let cursor = composer.invoice_section(cursor, invoice_no, issue_date);
    let cursor = composer.client_section(cursor, record);
    let cursor = composer.booking_section(cursor, record);
    let cursor = composer.cost_section(cursor, record, financials);
    let cursor = composer.terms_section(cursor, record, financials);
    let cursor = composer.signatory(cursor);
    composer.footer_chrome(cursor);

    composer.finish()
}

struct Composer<'a> {
    style: &'a LayoutStyle,
    fonts: &'a FontManager,
    draft: DocumentDraft,
    page: PageDraft,
}

fn text_or_na(value: &Option<String>) -> String {
    value.as_deref().unwrap_or(NOT_AVAILABLE).to_string()
}

impl<'a> Composer<'a> {
    fn new(title: &str, style: &'a LayoutStyle, fonts: &'a FontManager) -> Self {
        Self {
            style,
            fonts,
            draft: DocumentDraft::new(title, style.page_width, style.page_height),
            page: PageDraft::new(0),
        }
    }

    fn begin_first_page(&mut self) -> f32 {
        self.watermark();
        self.style.margin
    }

    /// Push the current page and start the next one. Called from exactly one
    /// place: the footer's pagination decision.
    fn advance_page(&mut self) -> f32 {
        let index = self.page.index + 1;
        let finished = std::mem::replace(&mut self.page, PageDraft::new(index));
        self.draft.pages.push(finished);
        self.watermark();
        self.style.margin
    }

    /// Pale brand ghost; first op on every page so all content paints over it.
    fn watermark(&mut self) {
        let style = self.style;
        let width = self
            .fonts
            .measure(WATERMARK_TEXT, style.watermark_size, true);
        self.page.ops.push(DrawOp::Text {
            x: (style.page_width - width) / 2.0,
            y: style.page_height * 0.42,
            content: WATERMARK_TEXT.to_string(),
            size: style.watermark_size,
            bold: true,
            color: style.watermark_color,
        });
    }

    /// Header band, brand-mark slot, and the centered document title.
    fn header_chrome(&mut self, _cursor: f32, title: &str) -> f32 {
        let style = self.style;

        self.page.ops.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width: style.page_width,
            height: style.header_band_height,
            fill: Some(style.band_color),
            stroke: None,
        });
        self.page.ops.push(DrawOp::Text {
            x: style.margin,
            y: 14.0,
            content: AGENCY_NAME.to_string(),
            size: style.title_size,
            bold: true,
            color: [1.0, 1.0, 1.0],
        });
        self.page.ops.push(DrawOp::Text {
            x: style.margin,
            y: 14.0 + style.line_advance(style.title_size),
            content: AGENCY_TAGLINE.to_string(),
            size: style.small_size,
            bold: false,
            color: style.section_bar_color,
        });
        self.page.ops.push(DrawOp::Image {
            asset: AssetKind::BrandMark,
            x: style.page_width - style.margin - style.brand_mark_width,
            y: (style.header_band_height - style.brand_mark_height) / 2.0,
            width: style.brand_mark_width,
            height: style.brand_mark_height,
        });

        let heading = title.to_uppercase();
        let heading_y = style.header_band_height + 10.0;
        let width = self.fonts.measure(&heading, style.title_size, true);
        self.page.ops.push(DrawOp::Text {
            x: (style.page_width - width) / 2.0,
            y: heading_y,
            content: heading,
            size: style.title_size,
            bold: true,
            color: style.band_color,
        });

        heading_y + style.line_advance(style.title_size) + 8.0
    }

    /// Highlighted section-header bar; returns the cursor below it.
    fn section_header(&mut self, cursor: f32, label: &str) -> f32 {
        let style = self.style;
        self.page.ops.push(DrawOp::Rect {
            x: style.margin,
            y: cursor,
            width: style.content_width(),
            height: style.section_header_height,
            fill: Some(style.section_bar_color),
            stroke: Some(Stroke {
                width: 0.6,
                color: style.border_color,
            }),
        });
        // Accent tick at the left edge of the bar.
        self.page.ops.push(DrawOp::Rect {
            x: style.margin,
            y: cursor,
            width: 3.0,
            height: style.section_header_height,
            fill: Some(style.accent_color),
            stroke: None,
        });
        self.page.ops.push(DrawOp::Text {
            x: style.margin + style.cell_inset + 3.0,
            y: cursor + (style.section_header_height - style.section_label_size) / 2.0,
            content: label.to_string(),
            size: style.section_label_size,
            bold: true,
            color: style.band_color,
        });
        cursor + style.section_header_height + 3.0
    }

    fn invoice_section(&mut self, cursor: f32, invoice_no: &str, issue_date: NaiveDate) -> f32 {
        let cursor = self.section_header(cursor, "Invoice Details");
        let rows = vec![
            vec!["Invoice No.".to_string(), invoice_no.to_string()],
            vec!["Invoice Date".to_string(), format_naive_date(issue_date)],
        ];
        let plan = ColumnPlan::compact(self.style);
        let cursor = draw_grid(
            &mut self.page,
            self.style.margin,
            cursor,
            &rows,
            &plan,
            self.style,
            self.fonts,
        );
        cursor + self.style.section_gap
    }

    fn client_section(&mut self, cursor: f32, record: &BookingRecord) -> f32 {
        let cursor = self.section_header(cursor, "Client Details");
        let rows = vec![
            vec!["Client Name".to_string(), text_or_na(&record.client_name)],
            vec!["Email".to_string(), text_or_na(&record.email)],
            vec!["Contact".to_string(), text_or_na(&record.contact)],
        ];
        let plan = ColumnPlan::compact(self.style);
        let cursor = draw_grid(
            &mut self.page,
            self.style.margin,
            cursor,
            &rows,
            &plan,
            self.style,
            self.fonts,
        );
        cursor + self.style.section_gap
    }

    fn booking_section(&mut self, cursor: f32, record: &BookingRecord) -> f32 {
        let cursor = self.section_header(cursor, "Booking Summary");
        let rows = vec![
            vec![
                "Destination".to_string(),
                "Duration".to_string(),
                "Check-In".to_string(),
                "Check-Out".to_string(),
                "Adults".to_string(),
                "Meal Plan".to_string(),
            ],
            vec![
                text_or_na(&record.destination),
                format_duration(record.number_of_nights),
                format_date(record.check_in_date.as_deref()),
                format_date(record.check_out_date.as_deref()),
                format_count(record.number_of_adults),
                text_or_na(&record.meal_plan),
            ],
        ];
        let plan = ColumnPlan::wide(self.style);
        let mut cursor = draw_grid(
            &mut self.page,
            self.style.margin,
            cursor,
            &rows,
            &plan,
            self.style,
            self.fonts,
        );

        if let Some(services) = &record.additional_services {
            cursor += 4.0;
            let note = format!("Additional services: {services}");
            cursor = self.text_block(cursor, &note, self.style.small_size, self.style.muted_color);
        }
        cursor + self.style.section_gap
    }

    fn cost_section(
        &mut self,
        cursor: f32,
        record: &BookingRecord,
        financials: &FinancialBreakdown,
    ) -> f32 {
        let cursor = self.section_header(cursor, "Cost Breakdown");

        let package_desc = match &record.package_type {
            Some(package) => format!("{package} Package"),
            None => "Holiday Package".to_string(),
        };

        let mut rows = vec![
            vec![
                "Description".to_string(),
                "Rate (Per Adult)".to_string(),
                "Adults".to_string(),
                "Amount".to_string(),
            ],
            vec![
                package_desc,
                format_currency(record.cost_per_adult),
                format_count(record.number_of_adults),
                format_currency(financials.subtotal),
            ],
        ];

        if financials.discount_amount != 0.0 {
            let mut label = match record.discount_type.as_deref() {
                Some("percentage") => {
                    format!("Discount ({}%)", format_count(record.discount_value))
                }
                _ => "Discount".to_string(),
            };
            if let Some(reason) = &record.discount_reason {
                label.push_str(&format!(" - {reason}"));
            }
            rows.push(vec![
                label,
                String::new(),
                String::new(),
                format_currency(-financials.discount_amount),
            ]);
        }

        rows.push(vec![
            "Total Package Value".to_string(),
            String::new(),
            String::new(),
            format_currency(financials.total_package_value),
        ]);
        rows.push(vec![
            "Advance Received".to_string(),
            String::new(),
            String::new(),
            format_currency(record.advance_amount),
        ]);
        rows.push(vec![
            "Balance Payable".to_string(),
            String::new(),
            String::new(),
            format_currency(financials.balance_payable),
        ]);

        let plan = ColumnPlan::cost(self.style);
        let cursor = draw_grid(
            &mut self.page,
            self.style.margin,
            cursor,
            &rows,
            &plan,
            self.style,
            self.fonts,
        );
        cursor + self.style.section_gap
    }

    fn terms_section(
        &mut self,
        cursor: f32,
        record: &BookingRecord,
        financials: &FinancialBreakdown,
    ) -> f32 {
        let mut cursor = self.section_header(cursor, "Terms & Conditions");

        match &record.terms_and_conditions {
            // Caller-supplied override, verbatim.
            Some(terms) => {
                cursor =
                    self.text_block(cursor, terms, self.style.body_size, self.style.text_color);
            }
            None => {
                for clause in default_terms(record, financials) {
                    cursor = self.text_block(
                        cursor,
                        &clause,
                        self.style.body_size,
                        self.style.text_color,
                    );
                }
            }
        }
        cursor + self.style.section_gap
    }

    fn signatory(&mut self, cursor: f32) -> f32 {
        let style = self.style;
        let right_edge = style.page_width - style.margin;

        let label = format!("For {AGENCY_NAME}");
        let width = self.fonts.measure(&label, style.body_size, true);
        self.page.ops.push(DrawOp::Text {
            x: right_edge - width,
            y: cursor,
            content: label,
            size: style.body_size,
            bold: true,
            color: style.text_color,
        });

        // Space for the actual signature, then the rule it sits on.
        let line_y = cursor + style.line_advance(style.body_size) + 22.0;
        self.page.ops.push(DrawOp::Line {
            x1: right_edge - 150.0,
            y1: line_y,
            x2: right_edge,
            y2: line_y,
            color: style.text_color,
            width: 0.6,
        });

        let caption = "Authorised Signatory";
        let caption_width = self.fonts.measure(caption, style.small_size, false);
        self.page.ops.push(DrawOp::Text {
            x: right_edge - caption_width,
            y: line_y + 3.0,
            content: caption.to_string(),
            size: style.small_size,
            bold: false,
            color: style.muted_color,
        });

        line_y + 3.0 + style.line_advance(style.small_size) + 4.0
    }

    /// Footer block: seal slot, legal lines, bottom band. Holds the single
    /// pagination decision.
    fn footer_chrome(&mut self, cursor: f32) {
        let style = self.style;
        let limit = style.page_height - style.margin - style.footer_block_height();
        let cursor = if cursor > limit {
            self.advance_page()
        } else {
            cursor
        };

        self.page.ops.push(DrawOp::Image {
            asset: AssetKind::Seal,
            x: style.margin,
            y: cursor,
            width: style.seal_size,
            height: style.seal_size,
        });

        let legal_x = style.margin + style.seal_size + 10.0;
        let mut legal_y = cursor + 6.0;
        for line in LEGAL_LINES {
            self.page.ops.push(DrawOp::Text {
                x: legal_x,
                y: legal_y,
                content: line.to_string(),
                size: style.small_size,
                bold: false,
                color: style.muted_color,
            });
            legal_y += style.line_advance(style.small_size);
        }

        // Bottom band sits at the absolute page edge regardless of cursor.
        let band_top = style.page_height - style.footer_band_height;
        self.page.ops.push(DrawOp::Rect {
            x: 0.0,
            y: band_top,
            width: style.page_width,
            height: style.footer_band_height,
            fill: Some(style.band_color),
            stroke: None,
        });
        let contact_width = self.fonts.measure(AGENCY_CONTACT, style.small_size, false);
        self.page.ops.push(DrawOp::Text {
            x: (style.page_width - contact_width) / 2.0,
            y: band_top + (style.footer_band_height - style.small_size) / 2.0,
            content: AGENCY_CONTACT.to_string(),
            size: style.small_size,
            bold: false,
            color: [1.0, 1.0, 1.0],
        });
    }

    /// Wrapped multi-line text at the left margin; returns the cursor below
    /// the last line.
    fn text_block(&mut self, cursor: f32, text: &str, size: f32, color: [f32; 3]) -> f32 {
        let style = self.style;
        let mut cursor = cursor;
        for line in wrap_text(text, size, false, style.content_width(), self.fonts) {
            if !line.is_empty() {
                self.page.ops.push(DrawOp::Text {
                    x: style.margin,
                    y: cursor,
                    content: line,
                    size,
                    bold: false,
                    color,
                });
            }
            cursor += style.line_advance(size);
        }
        cursor
    }

    fn finish(mut self) -> DocumentDraft {
        self.draft.pages.push(self.page);
        self.draft
    }
}

/// The five default clauses shown when no terms override is supplied.
fn default_terms(record: &BookingRecord, financials: &FinancialBreakdown) -> Vec<String> {
    vec![
        format!(
            "1. The balance of {} is payable on or before check-in ({}).",
            format_currency(financials.balance_payable),
            format_date(record.check_in_date.as_deref()),
        ),
        "2. Bookings are non-transferable; cancellations within 7 days of check-in forfeit the \
         advance."
            .to_string(),
        "3. All guests must carry valid government-issued photo identification at check-in."
            .to_string(),
        "4. Rates are confirmed for the booked dates only; any change to dates or occupancy is \
         subject to re-quotation."
            .to_string(),
        "5. Disputes are subject to the exclusive jurisdiction of the courts at the company's \
         registered office."
            .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingRecord;
    use crate::finance;
    use serde_json::json;

    fn compose_for(payload: serde_json::Value) -> DocumentDraft {
        let record = BookingRecord::from_value(&payload).unwrap();
        let financials = finance::compute(&record);
        let style = LayoutStyle::classic();
        let fonts = FontManager::new();
        compose(
            &record,
            &financials,
            "WL-2026-0042",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            "Booking Confirmation Receipt",
            &style,
            &fonts,
        )
    }

    fn all_text(draft: &DocumentDraft) -> String {
        let mut out = String::new();
        for page in &draft.pages {
            for op in &page.ops {
                if let DrawOp::Text { content, .. } = op {
                    out.push_str(content);
                    out.push('\n');
                }
            }
        }
        out
    }

    #[test]
    fn typical_booking_is_a_single_page() {
        let draft = compose_for(json!({
            "clientName": "A. Traveller",
            "destination": "Coorg",
            "numberOfNights": 4,
            "checkInDate": "2026-04-10",
            "checkOutDate": "2026-04-14",
            "numberOfAdults": 2,
            "costPerAdult": 18500,
            "advanceAmount": 10000,
            "discountType": "percentage",
            "discountValue": 5,
        }));
        assert_eq!(draft.pages.len(), 1);
    }

    #[test]
    fn long_terms_override_forces_a_second_page() {
        let clause = "The operator reserves the right to amend the itinerary at short notice. ";
        let draft = compose_for(json!({
            "destination": "Leh",
            "termsAndConditions": clause.repeat(30),
        }));
        assert_eq!(draft.pages.len(), 2);
    }

    #[test]
    fn second_page_carries_the_watermark_layer() {
        let clause = "Travel insurance is strongly recommended for all passengers. ";
        let draft = compose_for(json!({ "termsAndConditions": clause.repeat(40) }));
        assert_eq!(draft.pages.len(), 2);
        let first_op = &draft.pages[1].ops[0];
        assert!(
            matches!(first_op, DrawOp::Text { content, .. } if content == WATERMARK_TEXT),
            "expected the watermark as the first op of the new page"
        );
    }

    #[test]
    fn missing_fields_render_na_and_zero() {
        let draft = compose_for(json!({}));
        let text = all_text(&draft);
        assert!(text.contains("N/A"));
        assert!(text.contains("3 Nights / 4 Days"));
        assert!(text.contains("Balance Payable"));
    }

    #[test]
    fn negative_balance_is_rendered_verbatim() {
        let draft = compose_for(json!({
            "costPerAdult": 100,
            "numberOfAdults": 1,
            "advanceAmount": 500,
        }));
        assert!(all_text(&draft).contains("-400"));
    }

    #[test]
    fn terms_override_suppresses_default_clauses() {
        let draft = compose_for(json!({ "termsAndConditions": "Pay on arrival." }));
        let text = all_text(&draft);
        assert!(text.contains("Pay on arrival."));
        assert!(!text.contains("non-transferable"));
    }

    #[test]
    fn cursor_never_retreats_within_a_page() {
        // Ops are appended top-down; every section-header bar must start at
        // or below the previous one.
        let draft = compose_for(json!({ "destination": "Munnar" }));
        let mut last_bar_y = f32::MIN;
        for op in &draft.pages[0].ops {
            if let DrawOp::Rect {
                y,
                x,
                fill: Some(_),
                height,
                ..
            } = op
            {
                let style = LayoutStyle::classic();
                if *x == style.margin && *height == style.section_header_height {
                    assert!(*y >= last_bar_y);
                    last_bar_y = *y;
                }
            }
        }
        assert!(last_bar_y > f32::MIN, "no section bars found");
    }
}
