use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::identity::{NewUser, User};

/// Repository trait for user records.
///
/// Implementations must enforce email uniqueness at the storage layer and
/// surface a violation as [`Error::Conflict`]; the insert itself is the
/// arbiter of conflict, there is no pre-check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &NewUser) -> Result<Uuid, Error>;

    /// Exact, case-sensitive credential match.
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, Error>;
}
