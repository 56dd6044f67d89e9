//! Financial calculator – derives the money figures shown on the voucher.
//!
//! Pure and total: the same record always yields the same breakdown, and no
//! input can make it fail. Inconsistent inputs (discount or advance larger
//! than the package value) produce negative figures which are rendered
//! verbatim; a stricter validation layer, if wanted, belongs upstream.

use crate::booking::BookingRecord;

/// Derived money figures, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialBreakdown {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub total_package_value: f64,
    pub balance_payable: f64,
}

/// Compute subtotal, discount, total, and balance from the raw record.
///
/// Discount policy: `"percentage"` takes `discount_value` percent of the
/// subtotal, `"fixed"` takes `discount_value` as-is, and any other value
/// (including absent) means no discount.
pub fn compute(record: &BookingRecord) -> FinancialBreakdown {
    let subtotal = record.cost_per_adult * record.number_of_adults;

    let discount_amount = match record.discount_type.as_deref() {
        Some("percentage") => subtotal * record.discount_value / 100.0,
        Some("fixed") => record.discount_value,
        _ => 0.0,
    };

    let total_package_value = subtotal - discount_amount;
    FinancialBreakdown {
        subtotal,
        discount_amount,
        total_package_value,
        balance_payable: total_package_value - record.advance_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingRecord;
    use serde_json::json;

    fn record(payload: serde_json::Value) -> BookingRecord {
        BookingRecord::from_value(&payload).unwrap()
    }

    #[test]
    fn reference_scenario() {
        let fin = compute(&record(json!({
            "costPerAdult": 27000,
            "numberOfAdults": 8,
            "discountType": "percentage",
            "discountValue": 10,
            "advanceAmount": 80000,
        })));
        assert_eq!(fin.subtotal, 216000.0);
        assert_eq!(fin.discount_amount, 21600.0);
        assert_eq!(fin.total_package_value, 194400.0);
        assert_eq!(fin.balance_payable, 114400.0);
    }

    #[test]
    fn fixed_discount_is_taken_verbatim() {
        let fin = compute(&record(json!({
            "costPerAdult": 1000,
            "numberOfAdults": 2,
            "discountType": "fixed",
            "discountValue": 350,
        })));
        assert_eq!(fin.discount_amount, 350.0);
        assert_eq!(fin.total_package_value, 1650.0);
    }

    #[test]
    fn unknown_discount_type_means_no_discount() {
        let fin = compute(&record(json!({
            "costPerAdult": 1000,
            "numberOfAdults": 1,
            "discountType": "loyalty",
            "discountValue": 50,
        })));
        assert_eq!(fin.discount_amount, 0.0);
    }

    #[test]
    fn missing_fields_behave_as_zero() {
        let fin = compute(&record(json!({})));
        assert_eq!(fin.subtotal, 0.0);
        assert_eq!(fin.balance_payable, 0.0);
    }

    #[test]
    fn negative_balance_is_preserved() {
        let fin = compute(&record(json!({
            "costPerAdult": 100,
            "numberOfAdults": 1,
            "advanceAmount": 500,
        })));
        assert_eq!(fin.balance_payable, -400.0);
    }
}
