use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::AppState;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe. Fails with 500 when the database is unreachable.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let conn = state.db.get()?;
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
