//! Test utilities and fixtures for orgql integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde_json::{Value, json};
use tower::ServiceExt;

// Re-export the main library crate
pub use orgql::db::{AppState, create_memory_pool, init_db, queries};
pub use orgql::error::{AppError, msg};
pub use orgql::handlers;
pub use orgql::jwt::{DEFAULT_TOKEN_TTL_SECS, TokenService};
pub use orgql::models::*;

pub const TEST_JWT_SECRET: &[u8] = b"orgql-test-secret";
pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Create an in-memory test database with schema initialized
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("Failed to enable foreign keys");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_JWT_SECRET, DEFAULT_TOKEN_TTL_SECS)
}

/// Application state backed by a fresh in-memory database
pub fn create_test_state() -> AppState {
    let pool = create_memory_pool().expect("Failed to create memory pool");
    {
        let conn = pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize schema");
    }
    AppState {
        db: pool,
        tokens: test_tokens(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn create_test_user(conn: &Connection, username: &str, password: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        password: password.to_string(),
    };
    queries::create_user(conn, &input).expect("Failed to create test user")
}

/// Create a test organization with the given id
pub fn create_test_org(conn: &Connection, id: i64, name: &str) -> Organization {
    let input = CreateOrganization {
        id,
        name: name.to_string(),
        establish_date: Some(date(1999, 4, 1)),
        ord_id: None,
    };
    queries::create_organization(conn, &input).expect("Failed to create test organization")
}

pub fn create_test_employee(
    conn: &Connection,
    employee_id: i64,
    name: &str,
    joining_date: NaiveDate,
    organization_id: i64,
) -> Employee {
    let input = CreateEmployee {
        employee_id,
        name: name.to_string(),
        joining_date,
        relieving_date: None,
        organization_id,
    };
    queries::create_employee(conn, &input).expect("Failed to create test employee")
}

/// Seed organization 1 with Alice (joined 2004-01-05) and Bob (joined 2012-09-17).
pub fn seed_alice_and_bob(state: &AppState) {
    let conn = state.db.get().expect("Failed to get connection");
    create_test_org(&conn, 1, "Acme");
    create_test_employee(&conn, 101, "Alice", date(2004, 1, 5), 1);
    create_test_employee(&conn, 102, "Bob", date(2012, 9, 17), 1);
}

/// Create the standard test user and return a bearer token for it.
pub fn login_token(state: &AppState) -> String {
    let conn = state.db.get().expect("Failed to get connection");
    let user = create_test_user(&conn, TEST_USERNAME, TEST_PASSWORD);
    state.tokens.issue(&user).expect("Failed to issue token")
}

/// Router under test, without the GraphiQL explorer
pub fn app(state: AppState) -> Router {
    handlers::router(state, false)
}

/// POST a GraphQL document with an optional raw Authorization header value.
pub async fn graphql_with_header(
    app: &Router,
    query: &str,
    authorization: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header("content-type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }

    let body = json!({ "query": query });
    let response = app
        .clone()
        .oneshot(
            builder
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

/// POST a GraphQL document, authenticating with `token` when given.
pub async fn graphql(app: &Router, query: &str, token: Option<&str>) -> (StatusCode, Value) {
    let header = token.map(|t| format!("Bearer {}", t));
    graphql_with_header(app, query, header.as_deref()).await
}

/// Message and extension code of the first error in a GraphQL response.
pub fn first_error(json: &Value) -> (String, String) {
    let error = &json["errors"][0];
    (
        error["message"].as_str().unwrap_or_default().to_string(),
        error["extensions"]["code"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
    )
}
