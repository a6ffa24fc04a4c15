use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wayfare_core::identity::NewUser;

use crate::error::AppError;
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginQuery {
    redirect: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    message: String,
    username: String,
    token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/api/auth/status", get(auth_status))
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    state.identity.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .sessions
        .authenticate(&req.username, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        username: session.identity.username,
        token: session.token,
        redirect: query.redirect.map(|path| format!("/{path}")),
    }))
}

/// Idempotent: logging out without a live session still succeeds.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(token);
    }
    Json(json!({ "message": "Logged out successfully" }))
}

async fn auth_status(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    let identity = bearer_token(&headers).and_then(|token| state.sessions.resolve(token).ok());

    match identity {
        Some(identity) => Json(json!({
            "loggedIn": true,
            "username": identity.username,
            "email": identity.email,
        })),
        None => Json(json!({ "loggedIn": false })),
    }
}
