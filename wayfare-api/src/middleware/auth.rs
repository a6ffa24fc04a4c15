use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Pulls the session token out of the `Authorization: Bearer <token>`
/// header. The cookie mechanics of any browser front-end are a transport
/// concern outside this service.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Resolves the bearer token through the session authority and injects the
/// bound identity into request extensions for the handlers downstream.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::AuthenticationError("User not logged in".to_string()))?;

    let identity = state.sessions.resolve(token)?;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
