//! Booking record – the structured input describing one travel booking.
//!
//! Every field is externally supplied and untrusted. Text fields accept
//! strings or numbers; numeric fields accept JSON numbers or numeric
//! strings, and anything unparseable (or negative) coerces to zero so a
//! partially filled form still renders a reviewable document. The only
//! rejected shape is a payload that is absent, `null`, or not an object.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::VoucherError;

/// One booking to be confirmed. Immutable once parsed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub client_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub destination: Option<String>,

    /// Duration in nights; zero means "not supplied".
    #[serde(deserialize_with = "lenient_number")]
    pub number_of_nights: f64,
    #[serde(deserialize_with = "lenient_text")]
    pub check_in_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub check_out_date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub number_of_adults: f64,

    #[serde(deserialize_with = "lenient_text")]
    pub package_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub meal_plan: Option<String>,

    #[serde(deserialize_with = "lenient_number")]
    pub cost_per_adult: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub advance_amount: f64,

    /// "percentage", "fixed", or anything else (treated as no discount).
    #[serde(deserialize_with = "lenient_text")]
    pub discount_type: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub discount_value: f64,
    #[serde(deserialize_with = "lenient_text")]
    pub discount_reason: Option<String>,

    /// Free-text override for the terms section; used verbatim when non-empty.
    #[serde(deserialize_with = "lenient_text")]
    pub terms_and_conditions: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub additional_services: Option<String>,
}

impl BookingRecord {
    /// Parse a booking payload, rejecting anything that is not a JSON object.
    pub fn from_value(payload: &Value) -> Result<Self, VoucherError> {
        if !payload.is_object() {
            return Err(VoucherError::MissingRecord);
        }
        Ok(serde_json::from_value(payload.clone())?)
    }

    /// Parse a booking payload from raw JSON text.
    pub fn from_json(json: &str) -> Result<Self, VoucherError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }
}

/// Coerce an untyped JSON value to a non-negative finite number.
fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_fields_accept_strings() {
        let record = BookingRecord::from_value(&json!({
            "costPerAdult": "27000",
            "numberOfAdults": 8,
        }))
        .unwrap();
        assert_eq!(record.cost_per_adult, 27000.0);
        assert_eq!(record.number_of_adults, 8.0);
    }

    #[test]
    fn junk_and_negative_numbers_become_zero() {
        let record = BookingRecord::from_value(&json!({
            "costPerAdult": "lots",
            "advanceAmount": -500,
            "discountValue": null,
        }))
        .unwrap();
        assert_eq!(record.cost_per_adult, 0.0);
        assert_eq!(record.advance_amount, 0.0);
        assert_eq!(record.discount_value, 0.0);
    }

    #[test]
    fn numeric_text_fields_are_stringified() {
        let record = BookingRecord::from_value(&json!({ "contact": 9876543210u64 })).unwrap();
        assert_eq!(record.contact.as_deref(), Some("9876543210"));
    }

    #[test]
    fn blank_text_fields_are_absent() {
        let record = BookingRecord::from_value(&json!({ "clientName": "   " })).unwrap();
        assert!(record.client_name.is_none());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(
            BookingRecord::from_value(&Value::Null),
            Err(VoucherError::MissingRecord)
        ));
        assert!(matches!(
            BookingRecord::from_value(&json!([1, 2])),
            Err(VoucherError::MissingRecord)
        ));
    }

    #[test]
    fn empty_object_is_a_valid_record() {
        let record = BookingRecord::from_value(&json!({})).unwrap();
        assert!(record.destination.is_none());
        assert_eq!(record.cost_per_adult, 0.0);
    }
}
