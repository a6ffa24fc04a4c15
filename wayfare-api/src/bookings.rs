use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use wayfare_core::identity::Identity;
use wayfare_domain::booking::BookingDraft;
use wayfare_domain::presentation::BookingView;

use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let booking_id = state.ledger.create(&identity, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Booking stored successfully",
            "bookingId": booking_id,
        })),
    ))
}

pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let views = state.ledger.list(&identity).await?;
    Ok(Json(views))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    // A malformed id can name no record, so it reads as absent.
    let booking_id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFoundError("Booking not found".to_string()))?;

    state.ledger.cancel(&identity, booking_id).await?;
    Ok(Json(json!({ "message": "Booking cancelled successfully" })))
}
