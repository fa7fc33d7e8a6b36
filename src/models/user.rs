use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, msg};

/// A login account. Tokens embed the numeric `id` and `username`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

impl CreateUser {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::BadRequest(msg::USERNAME_EMPTY.into()));
        }
        if self.password.is_empty() {
            return Err(AppError::BadRequest(msg::PASSWORD_EMPTY.into()));
        }
        Ok(())
    }
}
