use async_graphql::ErrorExtensions;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Human-readable messages shared by resolvers and tests.
pub mod msg {
    pub const AUTH_HEADER_MISSING: &str = "Authorization header missing";
    pub const INVALID_TOKEN: &str = "Invalid or expired token.";
    pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
    pub const NAME_EMPTY: &str = "name cannot be empty";
    pub const USERNAME_EMPTY: &str = "username cannot be empty";
    pub const PASSWORD_EMPTY: &str = "password cannot be empty";
    pub const RELIEVING_BEFORE_JOINING: &str =
        "relieving_date cannot be earlier than joining_date";
    pub const INTERNAL: &str = "Internal server error";

    pub fn organization_not_found(id: i64) -> String {
        format!("Organization with ID {} does not exist.", id)
    }

    pub fn organization_ord_id_not_found(ord_id: i64) -> String {
        format!("Organization with ORD ID {} does not exist.", ord_id)
    }

    pub fn organization_exists(id: i64) -> String {
        format!("Organization with ID {} already exists.", id)
    }

    pub fn employee_not_found(id: i64) -> String {
        format!("Employee with ID {} not found.", id)
    }

    pub fn employee_exists(id: i64) -> String {
        format!("Employee with ID {} already exists.", id)
    }

    pub fn employee_deleted(id: i64) -> String {
        format!("Employee with ID {} has been deleted.", id)
    }

    pub fn invalid_date(field: &str, value: &str) -> String {
        format!("{} must be a YYYY-MM-DD date, got '{}'", field, value)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization header missing")]
    MissingAuthorization,

    #[error("Invalid or expired token.")]
    InvalidToken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable code reported in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingAuthorization | AppError::InvalidToken | AppError::InvalidCredentials => {
                "UNAUTHENTICATED"
            }
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Database(_) | AppError::Pool(_) | AppError::Json(_) | AppError::Internal(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }

    /// Message safe to show to the caller. Infrastructure failures are logged
    /// and replaced with a generic message.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                msg::INTERNAL.to_string()
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                msg::INTERNAL.to_string()
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                msg::INTERNAL.to_string()
            }
            AppError::Internal(m) => {
                tracing::error!("Internal error: {}", m);
                msg::INTERNAL.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingAuthorization | AppError::InvalidToken | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.public_message(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Converts a missing lookup result into `AppError::NotFound`.
pub trait OptionExt<T> {
    fn or_not_found(self, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}

/// Bridges crate results into async-graphql results, attaching error codes.
pub trait GraphQLResultExt<T> {
    fn into_gql(self) -> async_graphql::Result<T>;
}

impl<T> GraphQLResultExt<T> for Result<T> {
    fn into_gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}
