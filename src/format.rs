//! Display formatting – dates, currency amounts, durations, counts.
//!
//! Pure helpers; none of them can fail. Unparseable dates render as the
//! literal `"N/A"` rather than aborting the document.

use chrono::{DateTime, NaiveDate};

/// Sentinel shown for absent or unparseable values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an ISO date (or RFC 3339 datetime) as `14 Nov 2025`.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map(|d| format_naive_date(d))
        .unwrap_or_else(|_| NOT_AVAILABLE.to_string())
}

/// Format an already-parsed date the same way as [`format_date`].
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Format a monetary amount with Indian digit grouping: `216000` → `2,16,000`.
/// Decimals appear only when the amount is not integral; negative amounts
/// keep their sign.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let frac = (cents % 100) as u32;

    let digits = whole.to_string();
    let grouped = if digits.len() > 3 {
        // Last three digits stand alone, the rest group in pairs.
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = head
            .as_bytes()
            .rchunks(2)
            .rev()
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect();
        parts.push(tail);
        parts.join(",")
    } else {
        digits
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac != 0 {
        out.push_str(&format!(".{:02}", frac));
    }
    out
}

/// Render a stay duration as `3 Nights / 4 Days`, defaulting to three nights
/// when the field is absent or zero.
pub fn format_duration(nights: f64) -> String {
    let nights = if nights > 0.0 { nights } else { 3.0 };
    format!(
        "{} Nights / {} Days",
        format_count(nights),
        format_count(nights + 1.0)
    )
}

/// Format a numeric count without a trailing `.0` for whole numbers.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date_renders_day_month_year() {
        assert_eq!(format_date(Some("2025-11-14")), "14 Nov 2025");
        assert_eq!(format_date(Some("2026-03-02T09:30:00+05:30")), "2 Mar 2026");
    }

    #[test]
    fn bad_dates_render_na() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("next friday")), "N/A");
        assert_eq!(format_date(Some("2025-13-45")), "N/A");
    }

    #[test]
    fn currency_uses_indian_grouping() {
        assert_eq!(format_currency(216000.0), "2,16,000");
        assert_eq!(format_currency(21600.0), "21,600");
        assert_eq!(format_currency(194400.0), "1,94,400");
        assert_eq!(format_currency(1234567.0), "12,34,567");
        assert_eq!(format_currency(999.0), "999");
        assert_eq!(format_currency(0.0), "0");
    }

    #[test]
    fn currency_keeps_sign_and_fraction() {
        assert_eq!(format_currency(-114400.0), "-1,14,400");
        assert_eq!(format_currency(1250.5), "1,250.50");
    }

    #[test]
    fn duration_defaults_to_three_nights() {
        assert_eq!(format_duration(0.0), "3 Nights / 4 Days");
        assert_eq!(format_duration(5.0), "5 Nights / 6 Days");
    }
}
