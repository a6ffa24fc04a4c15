use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use wayfare_core::error::Error;
use wayfare_core::identity::Identity;

use crate::booking::{Booking, BookingDraft, PAYMENT_STATUS_CANCELLED};
use crate::dedup::ConflictProbe;
use crate::presentation::BookingView;
use crate::repository::BookingRepository;

const DUPLICATE_MESSAGE: &str = "This booking already exists in your account";

/// The booking ledger: create, list and cancel operations scoped to the
/// authenticated identity.
///
/// Duplicate detection is layered. The conflict probe is one disjunctive
/// read that gives the caller the colliding record's id; the storage-level
/// unique indexes are the actual guarantee, and an insert that loses a race
/// against a concurrent create is mapped back to the same conflict error.
pub struct BookingLedger {
    bookings: Arc<dyn BookingRepository>,
}

impl BookingLedger {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn create(&self, identity: &Identity, draft: BookingDraft) -> Result<Uuid, Error> {
        let booking = validate_draft(identity, draft)?;
        let probe = probe_for(&booking);

        if let Some(existing_id) = self.bookings.find_conflict(&probe).await? {
            return Err(Error::conflict(
                DUPLICATE_MESSAGE,
                Some(existing_id.to_string()),
            ));
        }

        match self.bookings.insert(&booking).await {
            Ok(()) => {
                tracing::info!(booking_id = %booking.id, reference = %booking.booking_reference, "booking stored");
                Ok(booking.id)
            }
            Err(Error::Conflict { .. }) => {
                // Lost the race window between the probe and the insert; the
                // unique index rejected us. Recover the surviving record.
                let existing_id = self.bookings.find_conflict(&probe).await?;
                Err(Error::conflict(
                    DUPLICATE_MESSAGE,
                    existing_id.map(|id| id.to_string()),
                ))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn list(&self, identity: &Identity) -> Result<Vec<BookingView>, Error> {
        let bookings = self.bookings.list_for_owner(&identity.email).await?;
        Ok(bookings.iter().map(BookingView::from_booking).collect())
    }

    /// One-way transition of the payment status to `Cancelled`. Cancelling
    /// an already-cancelled booking re-applies the same terminal state.
    pub async fn cancel(&self, identity: &Identity, id: Uuid) -> Result<(), Error> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Booking not found".to_string()))?;

        if booking.user_email != identity.email {
            return Err(Error::Forbidden(
                "Unauthorized: This booking belongs to another user".to_string(),
            ));
        }

        let mut payment = booking.payment_info;
        payment.payment_status = Some(PAYMENT_STATUS_CANCELLED.to_string());
        self.bookings.update_payment_info(id, &payment).await?;

        tracing::info!(booking_id = %id, "booking cancelled");
        Ok(())
    }
}

fn validate_draft(identity: &Identity, draft: BookingDraft) -> Result<Booking, Error> {
    let missing = || Error::Validation("Missing required booking details".to_string());

    let booking_reference = draft.booking_reference.filter(|s| !s.is_empty()).ok_or_else(missing)?;
    let destination = draft.destination.filter(|s| !s.is_empty()).ok_or_else(missing)?;
    let traveler_name = draft.traveler_name.filter(|s| !s.is_empty()).ok_or_else(missing)?;
    let num_travelers = draft.num_travelers.filter(|&n| n >= 1).ok_or_else(missing)?;
    let pricing = draft.pricing.ok_or_else(missing)?;
    let payment_info = draft.payment_info.ok_or_else(missing)?;

    Ok(Booking {
        id: Uuid::new_v4(),
        booking_reference,
        // Owner comes from the session, never from the request body.
        user_email: identity.email.clone(),
        destination,
        traveler_name,
        departure_date: draft.departure_date.unwrap_or_default(),
        return_date: draft.return_date.unwrap_or_default(),
        num_travelers,
        accommodation_type: draft.accommodation_type,
        flight_details: draft.flight_details,
        pricing,
        payment_info,
        created_at: Utc::now(),
    })
}

fn probe_for(booking: &Booking) -> ConflictProbe {
    ConflictProbe {
        booking_reference: booking.booking_reference.clone(),
        owner_email: booking.user_email.clone(),
        destination: booking.destination.clone(),
        departure_date: booking.departure_date.clone(),
        return_date: booking.return_date.clone(),
        traveler_name: booking.traveler_name.clone(),
    }
}
