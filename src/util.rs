//! Shared utility functions for the orgql application.

use axum::http::HeaderMap;
use chrono::NaiveDate;

use crate::error::{AppError, Result, msg};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extract a Bearer token from the Authorization header.
///
/// Returns the text after the literal `"Bearer "` prefix, or None if the
/// header is missing, not valid UTF-8, or uses another scheme. An empty
/// token is returned as-is and left for verification to reject.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Parse a `YYYY-MM-DD` date supplied by a client.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(msg::invalid_date(field, value)))
}

/// Parse an optional date. Absent and empty values both mean "not supplied".
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(field, v).map(Some),
        _ => Ok(None),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
