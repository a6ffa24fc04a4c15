use std::sync::Arc;

use wayfare_core::{IdentityStore, SessionAuthority};
use wayfare_domain::BookingLedger;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityStore>,
    pub sessions: Arc<SessionAuthority>,
    pub ledger: Arc<BookingLedger>,
}
