use serde::{Deserialize, Serialize};

use crate::models::User;

/// Custom claims carried by an access token.
/// Standard claims (iat, exp, nbf, sub) are handled by jwt-simple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for UserClaims {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}
