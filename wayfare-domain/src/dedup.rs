use crate::booking::Booking;

/// The key a new booking is probed against before insert.
///
/// Two independent uniqueness rules apply, checked disjunctively in a single
/// pass:
/// - the booking reference must be globally unique, regardless of owner;
/// - the `(owner email, destination, departure date, return date, traveler
///   name)` tuple must be unique, so a user cannot book the same trip for
///   the same traveler twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictProbe {
    pub booking_reference: String,
    pub owner_email: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub traveler_name: String,
}

/// Decides whether an existing record collides with the probe under either
/// uniqueness rule.
pub fn collides(existing: &Booking, probe: &ConflictProbe) -> bool {
    if existing.booking_reference == probe.booking_reference {
        return true;
    }

    existing.user_email == probe.owner_email
        && existing.destination == probe.destination
        && existing.departure_date == probe.departure_date
        && existing.return_date == probe.return_date
        && existing.traveler_name == probe.traveler_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{PaymentInfo, Pricing};
    use chrono::Utc;
    use uuid::Uuid;

    fn booking(reference: &str, owner: &str, traveler: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            booking_reference: reference.to_string(),
            user_email: owner.to_string(),
            destination: "Paris, France".to_string(),
            traveler_name: traveler.to_string(),
            departure_date: "2026-09-01".to_string(),
            return_date: "2026-09-08".to_string(),
            num_travelers: 2,
            accommodation_type: None,
            flight_details: None,
            pricing: Pricing::default(),
            payment_info: PaymentInfo::default(),
            created_at: Utc::now(),
        }
    }

    fn probe(reference: &str, owner: &str, traveler: &str) -> ConflictProbe {
        ConflictProbe {
            booking_reference: reference.to_string(),
            owner_email: owner.to_string(),
            destination: "Paris, France".to_string(),
            departure_date: "2026-09-01".to_string(),
            return_date: "2026-09-08".to_string(),
            traveler_name: traveler.to_string(),
        }
    }

    #[test]
    fn same_reference_collides_even_across_owners() {
        let existing = booking("REF1", "a@x.com", "Alice");
        assert!(collides(&existing, &probe("REF1", "b@x.com", "Bob")));
    }

    #[test]
    fn same_trip_tuple_collides_for_the_same_owner() {
        let existing = booking("REF1", "a@x.com", "Alice");
        assert!(collides(&existing, &probe("REF2", "a@x.com", "Alice")));
    }

    #[test]
    fn same_trip_for_a_different_owner_does_not_collide() {
        let existing = booking("REF1", "a@x.com", "Alice");
        assert!(!collides(&existing, &probe("REF2", "b@x.com", "Alice")));
    }

    #[test]
    fn different_traveler_on_the_same_trip_does_not_collide() {
        let existing = booking("REF1", "a@x.com", "Alice");
        assert!(!collides(&existing, &probe("REF2", "a@x.com", "Carol")));
    }
}
