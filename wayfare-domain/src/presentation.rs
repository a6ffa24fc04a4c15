use serde::Serialize;
use uuid::Uuid;

use crate::booking::{Booking, PAYMENT_STATUS_CONFIRMED};

/// Client-facing view of a booking, derived from the stored record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub destination: String,
    pub status: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: i64,
    pub price: Option<f64>,
    pub image_url: String,
}

impl BookingView {
    pub fn from_booking(booking: &Booking) -> Self {
        let status = if booking.payment_info.payment_status.as_deref()
            == Some(PAYMENT_STATUS_CONFIRMED)
        {
            "confirmed"
        } else {
            "pending"
        };

        BookingView {
            id: booking.id,
            destination: booking.destination.clone(),
            status: status.to_string(),
            check_in: booking.departure_date.clone(),
            check_out: booking.return_date.clone(),
            guests: booking.num_travelers,
            price: booking.pricing.total_amount,
            image_url: format!("/images/{}", image_filename(&booking.destination)),
        }
    }
}

/// Known destinations and their image assets. Anything else falls back to
/// the slug rule below.
const DESTINATION_IMAGES: &[(&str, &str)] = &[
    ("Paris, France", "paris.png"),
    ("Tokyo, Japan", "tokyo.jpg"),
    ("Rome, Italy", "rome.png"),
    ("Barcelona, Spain", "barcelona.png"),
    ("Iceland", "iceland.png"),
    ("Ha Long Bay, Vietnam", "vietnam.png"),
    ("New York City, USA", "newyork.png"),
    ("Santorini, Greece", "greece.png"),
    ("Machu Picchu, Peru", "machu.png"),
    ("Maldives", "maldives.png"),
    ("Dubai, UAE", "dubai.png"),
    ("Bali, Indonesia", "bali.png"),
    ("Cape Town, South Africa", "capetwon.png"),
    ("Sydney, Australia", "sydney.png"),
    ("Swiss Alps, Switzerland", "swiss-alps.png"),
    ("Kyoto, Japan", "kyoto.png"),
    ("Marrakech, Morocco", "marrakech.png"),
    ("Rio de Janeiro, Brazil", "rio.png"),
    ("Amsterdam, Netherlands", "amsterdam.png"),
    ("Petra, Jordan", "petra.png"),
    ("Queenstown, New Zealand", "queenstown.png"),
    ("Amalfi Coast,Italy", "amalfi.png"),
    ("Havana, Cuba", "havana.png"),
    ("Cairo, Egypt", "cairo.png"),
    ("Seychelles", "seychelles.png"),
    ("Singapore", "singapore.png"),
];

/// Table hit, or the fallback slug: lowercase, runs of whitespace replaced
/// by a single hyphen, `.jpg` extension.
pub fn image_filename(destination: &str) -> String {
    if let Some((_, filename)) = DESTINATION_IMAGES
        .iter()
        .find(|(name, _)| *name == destination)
    {
        return (*filename).to_string();
    }

    let mut slug = String::with_capacity(destination.len());
    let mut in_whitespace = false;
    for c in destination.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }
    format!("{slug}.jpg")
}
