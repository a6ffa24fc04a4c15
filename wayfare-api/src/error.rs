use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError {
        message: String,
        existing_booking_id: Option<String>,
    },
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::AuthenticationError(msg) => {
                (StatusCode::UNAUTHORIZED, json!({ "error": msg }))
            }
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError {
                message,
                existing_booking_id,
            } => {
                let body = match existing_booking_id {
                    Some(id) => json!({ "error": message, "existingBookingId": id }),
                    None => json!({ "error": message }),
                };
                (StatusCode::CONFLICT, body)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<wayfare_core::Error> for AppError {
    fn from(err: wayfare_core::Error) -> Self {
        use wayfare_core::Error;
        match err {
            Error::Validation(msg) => AppError::ValidationError(msg),
            Error::Conflict {
                message,
                existing_id,
            } => AppError::ConflictError {
                message,
                existing_booking_id: existing_id,
            },
            Error::InvalidCredentials => {
                AppError::AuthenticationError("Invalid username or password".to_string())
            }
            Error::Unauthenticated => {
                AppError::AuthenticationError("User not logged in".to_string())
            }
            Error::Forbidden(msg) => AppError::AuthorizationError(msg),
            Error::NotFound(msg) => AppError::NotFoundError(msg),
            Error::Storage(cause) => AppError::InternalServerError(format!("{cause:#}")),
        }
    }
}
