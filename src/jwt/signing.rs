use jwt_simple::prelude::*;
use rusqlite::Connection;

use crate::db::queries;
use crate::error::{AppError, Result};
use crate::models::User;

use super::UserClaims;

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Issues and verifies HS256 access tokens.
///
/// The secret is supplied once at construction and never changes.
#[derive(Clone)]
pub struct TokenService {
    key: HS256Key,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            key: HS256Key::from_bytes(secret),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs()
    }

    /// Sign a token for `user` that expires `ttl` from now.
    pub fn issue(&self, user: &User) -> Result<String> {
        let claims = Claims::with_custom_claims(UserClaims::from(user), self.ttl)
            .with_subject(user.id.to_string());
        self.sign(claims)
    }

    /// Sign an arbitrary claim set with this service's key.
    pub fn sign(&self, claims: JWTClaims<UserClaims>) -> Result<String> {
        self.key
            .authenticate(claims)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry and return the embedded claims.
    ///
    /// Every failure is reported as `AppError::InvalidToken`; the cause is
    /// only logged.
    pub fn decode(&self, token: &str) -> Result<UserClaims> {
        let options = VerificationOptions {
            time_tolerance: Some(Duration::from_secs(0)),
            ..Default::default()
        };

        self.key
            .verify_token::<UserClaims>(token, Some(options))
            .map(|claims| claims.custom)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AppError::InvalidToken
            })
    }

    /// Verify a token and resolve it to the user it was issued for.
    ///
    /// A bad signature, an expired token, and a deleted user all produce
    /// the same `AppError::InvalidToken`.
    pub fn verify(&self, conn: &Connection, token: &str) -> Result<User> {
        let claims = self.decode(token)?;

        queries::get_user_by_id(conn, claims.user_id)?.ok_or_else(|| {
            tracing::debug!("Token rejected: user {} no longer exists", claims.user_id);
            AppError::InvalidToken
        })
    }
}
