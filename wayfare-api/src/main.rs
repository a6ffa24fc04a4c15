use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{app, state::AppState};
use wayfare_core::{IdentityStore, SessionAuthority};
use wayfare_domain::BookingLedger;
use wayfare_store::{DbClient, StoreBookingRepository, StoreUserRepository};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = wayfare_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Wayfare API on port {}", config.server.port);

    // Storage is opened once here and handed to each component by reference;
    // the pool closes when the process exits.
    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Failed to run migrations");

    let users = Arc::new(StoreUserRepository::new(db.pool.clone()));
    let bookings = Arc::new(StoreBookingRepository::new(db.pool.clone()));

    let app_state = AppState {
        identity: Arc::new(IdentityStore::new(users.clone())),
        sessions: Arc::new(SessionAuthority::new(users, config.session.ttl_seconds)),
        ledger: Arc::new(BookingLedger::new(bookings)),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
