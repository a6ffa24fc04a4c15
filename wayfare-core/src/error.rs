use thiserror::Error;

/// Shared error taxonomy for the ledger, identity and session services.
///
/// The API layer owns the mapping to HTTP status codes; everything below it
/// speaks in these terms.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint was violated. `existing_id` names the record
    /// that already occupies the slot, when it is known, so callers can
    /// point the user at it.
    #[error("{message}")]
    Conflict {
        message: String,
        existing_id: Option<String>,
    },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not logged in")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Storage-layer fault. The cause is logged at the operation boundary
    /// and never shown to the caller.
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

impl Error {
    pub fn conflict(message: impl Into<String>, existing_id: Option<String>) -> Self {
        Error::Conflict {
            message: message.into(),
            existing_id,
        }
    }

    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        Error::Storage(err.into())
    }
}
