use async_trait::async_trait;
use uuid::Uuid;
use wayfare_core::error::Error;

use crate::booking::{Booking, PaymentInfo};
use crate::dedup::ConflictProbe;

/// Repository trait for booking records.
///
/// Implementations must enforce both uniqueness constraints (the booking
/// reference and the owner/trip tuple) as hard storage constraints and map a
/// violation on insert to [`Error::Conflict`]. `find_conflict` exists for
/// user-facing disambiguation; it is not the correctness guarantee.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Single disjunctive read: any record matching the probe's reference
    /// OR its owner/trip tuple. Returns the colliding record's id.
    async fn find_conflict(&self, probe: &ConflictProbe) -> Result<Option<Uuid>, Error>;

    async fn insert(&self, booking: &Booking) -> Result<(), Error>;

    async fn list_for_owner(&self, email: &str) -> Result<Vec<Booking>, Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, Error>;

    async fn update_payment_info(&self, id: Uuid, payment: &PaymentInfo) -> Result<(), Error>;
}
