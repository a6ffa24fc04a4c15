use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;
use wayfare_core::error::Error;
use wayfare_core::identity::{NewUser, User};
use wayfare_core::repository::UserRepository;

use crate::database::is_unique_violation;

pub struct StoreUserRepository {
    pool: SqlitePool,
}

impl StoreUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, Error> {
        Ok(User {
            id: Uuid::parse_str(&self.id).map_err(Error::storage)?,
            username: self.username,
            email: self.email,
            password: self.password,
        })
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn insert_user(&self, user: &NewUser) -> Result<Uuid, Error> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO users (id, username, email, password) VALUES (?1, ?2, ?3, ?4)")
            .bind(id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    Error::conflict("Account already exists! Login to continue...", None)
                } else {
                    Error::storage(err)
                }
            })?;

        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, Error> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password FROM users WHERE username = ?1 AND password = ?2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::storage)?;

        row.map(UserRow::into_user).transpose()
    }
}
