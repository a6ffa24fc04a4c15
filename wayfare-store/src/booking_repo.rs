use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;
use wayfare_core::error::Error;
use wayfare_domain::booking::{Booking, FlightDetails, PaymentInfo, Pricing};
use wayfare_domain::dedup::ConflictProbe;
use wayfare_domain::repository::BookingRepository;

use crate::database::is_unique_violation;

pub struct StoreBookingRepository {
    pool: SqlitePool,
}

impl StoreBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SELECT_BOOKING: &str = "SELECT id, booking_reference, user_email, destination, \
     traveler_name, departure_date, return_date, num_travelers, accommodation_type, \
     flight_details, pricing, payment_info, created_at FROM bookings";

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: String,
    booking_reference: String,
    user_email: String,
    destination: String,
    traveler_name: String,
    departure_date: String,
    return_date: String,
    num_travelers: i64,
    accommodation_type: Option<String>,
    flight_details: Option<String>,
    pricing: String,
    payment_info: String,
    created_at: String,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, Error> {
        let flight_details: Option<FlightDetails> = self
            .flight_details
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(Error::storage)?;
        let pricing: Pricing = serde_json::from_str(&self.pricing).map_err(Error::storage)?;
        let payment_info: PaymentInfo =
            serde_json::from_str(&self.payment_info).map_err(Error::storage)?;

        Ok(Booking {
            id: Uuid::parse_str(&self.id).map_err(Error::storage)?,
            booking_reference: self.booking_reference,
            user_email: self.user_email,
            destination: self.destination,
            traveler_name: self.traveler_name,
            departure_date: self.departure_date,
            return_date: self.return_date,
            num_travelers: self.num_travelers,
            accommodation_type: self.accommodation_type,
            flight_details,
            pricing,
            payment_info,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(Error::storage)?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn find_conflict(&self, probe: &ConflictProbe) -> Result<Option<Uuid>, Error> {
        // One disjunctive read covering both uniqueness rules, so a
        // collision on either axis is caught in a single pass.
        let id: Option<String> = sqlx::query_scalar(
            "SELECT id FROM bookings WHERE booking_reference = ?1 \
             OR (user_email = ?2 AND destination = ?3 AND departure_date = ?4 \
                 AND return_date = ?5 AND traveler_name = ?6) \
             LIMIT 1",
        )
        .bind(&probe.booking_reference)
        .bind(&probe.owner_email)
        .bind(&probe.destination)
        .bind(&probe.departure_date)
        .bind(&probe.return_date)
        .bind(&probe.traveler_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::storage)?;

        id.map(|id| Uuid::parse_str(&id).map_err(Error::storage))
            .transpose()
    }

    async fn insert(&self, booking: &Booking) -> Result<(), Error> {
        let flight_details = booking
            .flight_details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(Error::storage)?;
        let pricing = serde_json::to_string(&booking.pricing).map_err(Error::storage)?;
        let payment_info = serde_json::to_string(&booking.payment_info).map_err(Error::storage)?;

        sqlx::query(
            "INSERT INTO bookings (id, booking_reference, user_email, destination, \
             traveler_name, departure_date, return_date, num_travelers, \
             accommodation_type, flight_details, pricing, payment_info, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(booking.id.to_string())
        .bind(&booking.booking_reference)
        .bind(&booking.user_email)
        .bind(&booking.destination)
        .bind(&booking.traveler_name)
        .bind(&booking.departure_date)
        .bind(&booking.return_date)
        .bind(booking.num_travelers)
        .bind(&booking.accommodation_type)
        .bind(flight_details)
        .bind(pricing)
        .bind(payment_info)
        .bind(booking.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                Error::conflict("Booking already exists", None)
            } else {
                Error::storage(err)
            }
        })?;

        Ok(())
    }

    async fn list_for_owner(&self, email: &str) -> Result<Vec<Booking>, Error> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING} WHERE user_email = ?1 ORDER BY created_at"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::storage)?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, Error> {
        let row = sqlx::query_as::<_, BookingRow>(&format!("{SELECT_BOOKING} WHERE id = ?1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::storage)?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn update_payment_info(&self, id: Uuid, payment: &PaymentInfo) -> Result<(), Error> {
        let payment_info = serde_json::to_string(payment).map_err(Error::storage)?;

        let result = sqlx::query("UPDATE bookings SET payment_info = ?1 WHERE id = ?2")
            .bind(payment_info)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Error::storage)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Booking not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;
    use std::sync::Arc;
    use wayfare_core::identity::Identity;
    use wayfare_domain::booking::BookingDraft;
    use wayfare_domain::ledger::BookingLedger;

    async fn memory_repo() -> StoreBookingRepository {
        let db = DbClient::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        StoreBookingRepository::new(db.pool)
    }

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
            accommodation_type: Some("Hotel".to_string()),
            flight_details: Some(FlightDetails {
                airline: Some("Air France".to_string()),
                flight_number: Some("AF123".to_string()),
                ..FlightDetails::default()
            }),
            pricing: Pricing {
                base_price: Some(900.0),
                total_amount: Some(1499.0),
                ..Pricing::default()
            },
            payment_info: PaymentInfo {
                transaction_id: Some("tx-1".to_string()),
                payment_status: Some("Confirmed".to_string()),
                ..PaymentInfo::default()
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn bookings_round_trip_with_nested_documents() {
        let repo = memory_repo().await;
        let original = booking("REF1", "a@x.com", "Alice");
        repo.insert(&original).await.unwrap();

        let stored = repo.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.booking_reference, "REF1");
        assert_eq!(
            stored.flight_details.unwrap().airline.as_deref(),
            Some("Air France")
        );
        assert_eq!(stored.pricing.total_amount, Some(1499.0));
        assert_eq!(stored.payment_info.payment_status.as_deref(), Some("Confirmed"));
    }

    #[tokio::test]
    async fn the_reference_index_rejects_a_duplicate_even_when_the_probe_is_skipped() {
        let repo = memory_repo().await;
        repo.insert(&booking("REF1", "a@x.com", "Alice")).await.unwrap();

        // Direct insert, no evaluator pass: the index alone must reject it.
        let err = repo
            .insert(&booking("REF1", "b@x.com", "Bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[tokio::test]
    async fn the_trip_index_rejects_a_duplicate_tuple_under_a_fresh_reference() {
        let repo = memory_repo().await;
        repo.insert(&booking("REF1", "a@x.com", "Alice")).await.unwrap();

        let err = repo
            .insert(&booking("REF2", "a@x.com", "Alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        // Same tuple under a different owner is a different trip.
        repo.insert(&booking("REF3", "b@x.com", "Alice")).await.unwrap();
    }

    #[tokio::test]
    async fn find_conflict_matches_on_either_axis() {
        let repo = memory_repo().await;
        let existing = booking("REF1", "a@x.com", "Alice");
        repo.insert(&existing).await.unwrap();

        let by_reference = ConflictProbe {
            booking_reference: "REF1".to_string(),
            owner_email: "other@x.com".to_string(),
            destination: "Elsewhere".to_string(),
            departure_date: String::new(),
            return_date: String::new(),
            traveler_name: "Nobody".to_string(),
        };
        assert_eq!(repo.find_conflict(&by_reference).await.unwrap(), Some(existing.id));

        let by_tuple = ConflictProbe {
            booking_reference: "REF2".to_string(),
            owner_email: "a@x.com".to_string(),
            destination: "Paris, France".to_string(),
            departure_date: "2026-09-01".to_string(),
            return_date: "2026-09-08".to_string(),
            traveler_name: "Alice".to_string(),
        };
        assert_eq!(repo.find_conflict(&by_tuple).await.unwrap(), Some(existing.id));

        let neither = ConflictProbe {
            booking_reference: "REF2".to_string(),
            owner_email: "a@x.com".to_string(),
            destination: "Paris, France".to_string(),
            departure_date: "2026-09-01".to_string(),
            return_date: "2026-09-08".to_string(),
            traveler_name: "Carol".to_string(),
        };
        assert_eq!(repo.find_conflict(&neither).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_payment_info_only_touches_the_payment_document() {
        let repo = memory_repo().await;
        let original = booking("REF1", "a@x.com", "Alice");
        repo.insert(&original).await.unwrap();

        let mut payment = original.payment_info.clone();
        payment.payment_status = Some("Cancelled".to_string());
        repo.update_payment_info(original.id, &payment).await.unwrap();

        let stored = repo.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.payment_info.payment_status.as_deref(), Some("Cancelled"));
        assert_eq!(stored.payment_info.transaction_id.as_deref(), Some("tx-1"));
        assert_eq!(stored.booking_reference, "REF1");
    }

    #[tokio::test]
    async fn update_payment_info_on_an_unknown_id_is_not_found() {
        let repo = memory_repo().await;
        let err = repo
            .update_payment_info(Uuid::new_v4(), &PaymentInfo::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    /// Two identical creates racing through the full ledger path against a
    /// multi-connection pool: the unique indexes, not the evaluator, must
    /// guarantee that exactly one record survives.
    #[tokio::test]
    async fn concurrent_creates_persist_exactly_one_booking() {
        let path = std::env::temp_dir().join(format!("wayfare-race-{}.db", Uuid::new_v4()));
        let url = format!("sqlite:{}", path.display());
        let db = DbClient::new(&url).await.unwrap();
        db.migrate().await.unwrap();

        let repo = Arc::new(StoreBookingRepository::new(db.pool.clone()));
        let ledger = Arc::new(BookingLedger::new(repo.clone()));
        let identity = Identity {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
        };

        let draft = || BookingDraft {
            booking_reference: Some("REF-RACE".to_string()),
            destination: Some("Paris, France".to_string()),
            traveler_name: Some("Alice".to_string()),
            departure_date: Some("2026-09-01".to_string()),
            return_date: Some("2026-09-08".to_string()),
            num_travelers: Some(2),
            pricing: Some(Pricing::default()),
            payment_info: Some(PaymentInfo::default()),
            ..BookingDraft::default()
        };

        let (a, b) = tokio::join!(
            {
                let ledger = ledger.clone();
                let identity = identity.clone();
                async move { ledger.create(&identity, draft()).await }
            },
            {
                let ledger = ledger.clone();
                let identity = identity.clone();
                async move { ledger.create(&identity, draft()).await }
            }
        );

        assert_eq!(
            [&a, &b].iter().filter(|r| r.is_ok()).count(),
            1,
            "exactly one of the racing creates may win: {a:?} / {b:?}"
        );
        let loser = if a.is_err() { a } else { b };
        assert!(matches!(loser, Err(Error::Conflict { .. })));

        let stored = repo.list_for_owner("a@x.com").await.unwrap();
        assert_eq!(stored.len(), 1);

        drop(db);
        let _ = std::fs::remove_file(&path);
    }
}
