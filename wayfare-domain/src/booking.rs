use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted booking record.
///
/// `user_email` is a weak reference to the owner by value, set exactly once
/// at creation from the authenticated session. `payment_info.payment_status`
/// is the only field that ever changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub booking_reference: String,
    pub user_email: String,
    pub destination: String,
    pub traveler_name: String,
    pub departure_date: String,
    pub return_date: String,
    pub num_travelers: i64,
    pub accommodation_type: Option<String>,
    pub flight_details: Option<FlightDetails>,
    pub pricing: Pricing,
    pub payment_info: PaymentInfo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub base_price: Option<f64>,
    pub accommodation_price: Option<f64>,
    pub activities_cost: Option<f64>,
    pub flight_cost: Option<f64>,
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
    pub payment_date: Option<String>,
    pub payment_status: Option<String>,
}

/// The payment status value a cancelled booking is driven to. One-way: the
/// ledger never transitions a booking out of it.
pub const PAYMENT_STATUS_CANCELLED: &str = "Cancelled";

/// The payment status that presents as a confirmed booking; every other
/// value presents as pending.
pub const PAYMENT_STATUS_CONFIRMED: &str = "Confirmed";

/// An incoming booking request, before validation. Any client-supplied
/// owner field is ignored; the ledger stamps the owner from the session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(default)]
    pub booking_reference: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub traveler_name: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub num_travelers: Option<i64>,
    #[serde(default)]
    pub accommodation_type: Option<String>,
    #[serde(default)]
    pub flight_details: Option<FlightDetails>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub payment_info: Option<PaymentInfo>,
}
