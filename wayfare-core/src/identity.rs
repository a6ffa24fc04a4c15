use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::repository::UserRepository;

/// The authenticated principal attached to every protected operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Signup payload. Fields default to empty so an absent field reads as a
/// missing value and fails validation rather than deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Symbols accepted (and required, at least one) by the password policy.
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Minimum 6 characters, at least one lowercase letter, one uppercase
/// letter, one digit and one of `@$!%*?&`, with no character outside
/// those classes.
pub fn password_meets_policy(password: &str) -> bool {
    password.len() >= 6
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
}

/// Registration service over the user repository.
///
/// Users are immutable after signup and never deleted; the only operation
/// here is `register`.
pub struct IdentityStore {
    users: Arc<dyn UserRepository>,
}

impl IdentityStore {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(&self, req: NewUser) -> Result<Uuid, Error> {
        if req.username.is_empty() || req.email.is_empty() || req.password.is_empty() {
            return Err(Error::Validation("All fields are required".to_string()));
        }

        if !password_meets_policy(&req.password) {
            return Err(Error::Validation(
                "Password must be at least 6 characters long, with one uppercase letter, \
                 one lowercase letter, one number, and one special character."
                    .to_string(),
            ));
        }

        let user_id = self.users.insert_user(&req).await?;
        tracing::info!(username = %req.username, "user registered");
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_accepts_minimal_valid_password() {
        assert!(password_meets_policy("Aa1!aa"));
        assert!(password_meets_policy("Bb2@bb"));
    }

    #[test]
    fn policy_requires_each_character_class() {
        assert!(!password_meets_policy("aa1!aa")); // no uppercase
        assert!(!password_meets_policy("AA1!AA")); // no lowercase
        assert!(!password_meets_policy("Aab!aa")); // no digit
        assert!(!password_meets_policy("Aa1xaa")); // no special
    }

    #[test]
    fn policy_rejects_short_passwords() {
        assert!(!password_meets_policy("Aa1!a"));
        assert!(!password_meets_policy(""));
    }

    #[test]
    fn policy_rejects_characters_outside_the_allowed_set() {
        assert!(!password_meets_policy("Aa1!aa ")); // space
        assert!(!password_meets_policy("Aa1#aa")); // '#' is not in the set
    }
}
