//! Sample booking payloads for testing and demonstration.

/// A fully populated booking with a percentage discount — the shape a real
/// submission takes.
pub fn standard_booking() -> &'static str {
    r##"{
    "clientName": "Meera Krishnan",
    "email": "meera.k@example.com",
    "contact": "+91 98450 12345",
    "destination": "Srinagar & Gulmarg",
    "numberOfNights": 6,
    "checkInDate": "2026-04-18",
    "checkOutDate": "2026-04-24",
    "numberOfAdults": 8,
    "packageType": "Premium",
    "mealPlan": "Breakfast & Dinner",
    "costPerAdult": 27000,
    "advanceAmount": 80000,
    "discountType": "percentage",
    "discountValue": 10,
    "discountReason": "Group booking",
    "additionalServices": "Shikara ride, airport transfers"
}"##
}

/// A sparse submission: only two fields survived the form. Everything else
/// should fall back to "N/A" / zero and still render.
pub fn sparse_booking() -> &'static str {
    r##"{
    "clientName": "Walk-in enquiry",
    "costPerAdult": "12500"
}"##
}

#[cfg(test)]
mod tests {
    use crate::booking::BookingRecord;

    #[test]
    fn samples_parse() {
        let standard = BookingRecord::from_json(super::standard_booking()).unwrap();
        assert_eq!(standard.number_of_adults, 8.0);
        assert_eq!(standard.discount_type.as_deref(), Some("percentage"));

        let sparse = BookingRecord::from_json(super::sparse_booking()).unwrap();
        assert_eq!(sparse.cost_per_adult, 12500.0);
        assert!(sparse.destination.is_none());
    }
}
