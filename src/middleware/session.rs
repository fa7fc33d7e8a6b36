use std::sync::OnceLock;

use async_graphql::{Context, ErrorExtensions, Guard};
use axum::http::HeaderMap;

use crate::db::AppState;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::util::extract_bearer_token;

/// What the client presented in its Authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No header, or a header without the `"Bearer "` prefix
    Missing,
    Bearer(String),
}

impl Credentials {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match extract_bearer_token(headers) {
            Some(token) => Credentials::Bearer(token.to_string()),
            None => Credentials::Missing,
        }
    }
}

/// Per-request authentication state, stored in the GraphQL request data.
///
/// The outcome is computed on first use and shared by every protected field
/// of the same request.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    outcome: OnceLock<std::result::Result<User, SessionError>>,
}

/// Cached failure. `AppError` is not `Clone`, so the variants that can
/// come out of authentication are mirrored here.
#[derive(Debug, Clone)]
enum SessionError {
    MissingAuthorization,
    InvalidToken,
    Internal(String),
}

impl From<AppError> for SessionError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::MissingAuthorization => SessionError::MissingAuthorization,
            AppError::InvalidToken => SessionError::InvalidToken,
            other => SessionError::Internal(other.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingAuthorization => AppError::MissingAuthorization,
            SessionError::InvalidToken => AppError::InvalidToken,
            SessionError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            outcome: OnceLock::new(),
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::new(Credentials::from_headers(headers))
    }

    /// Resolve the bearer token to a user.
    ///
    /// Missing credentials fail before any database access.
    pub fn authenticate(&self, state: &AppState) -> Result<User> {
        self.outcome
            .get_or_init(|| self.resolve(state).map_err(SessionError::from))
            .clone()
            .map_err(AppError::from)
    }

    fn resolve(&self, state: &AppState) -> Result<User> {
        let token = match &self.credentials {
            Credentials::Missing => return Err(AppError::MissingAuthorization),
            Credentials::Bearer(token) => token,
        };

        let conn = state.db.get()?;
        let user = state.tokens.verify(&conn, token)?;
        tracing::debug!(user_id = user.id, "request authenticated");
        Ok(user)
    }
}

/// Guard applied to every protected query and mutation field.
pub struct Authenticated;

impl Guard for Authenticated {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        let state = ctx.data::<AppState>()?;
        let session = ctx
            .data_opt::<Session>()
            .ok_or_else(|| AppError::MissingAuthorization.extend())?;

        session
            .authenticate(state)
            .map(|_| ())
            .map_err(|e| e.extend())
    }
}

/// The authenticated user of the current request.
pub fn current_user(ctx: &Context<'_>) -> async_graphql::Result<User> {
    let state = ctx.data::<AppState>()?;
    let session = ctx
        .data_opt::<Session>()
        .ok_or_else(|| AppError::MissingAuthorization.extend())?;
    session.authenticate(state).map_err(|e| e.extend())
}
