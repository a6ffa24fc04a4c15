pub mod booking;
pub mod dedup;
pub mod ledger;
pub mod presentation;
pub mod repository;

pub use booking::{Booking, BookingDraft};
pub use ledger::BookingLedger;
pub use presentation::BookingView;
