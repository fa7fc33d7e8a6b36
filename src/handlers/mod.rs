mod graphql;
mod health;

pub use graphql::*;
pub use health::*;

use axum::{Router, extract::FromRef, routing::get};

use crate::db::AppState;
use crate::graphql::{AppSchema, build_schema};

/// Router state: the executable schema plus the state it was built from.
#[derive(Clone)]
pub struct HttpState {
    pub app: AppState,
    pub schema: AppSchema,
}

impl HttpState {
    pub fn new(app: AppState) -> Self {
        let schema = build_schema(app.clone());
        Self { app, schema }
    }
}

impl FromRef<HttpState> for AppState {
    fn from_ref(state: &HttpState) -> Self {
        state.app.clone()
    }
}

impl FromRef<HttpState> for AppSchema {
    fn from_ref(state: &HttpState) -> Self {
        state.schema.clone()
    }
}

/// `POST /graphql` and `GET /health`. With `dev_mode`, `GET /graphql`
/// serves the GraphiQL explorer.
pub fn router(state: AppState, dev_mode: bool) -> Router {
    let graphql_route = if dev_mode {
        get(graphiql).post(graphql_handler)
    } else {
        axum::routing::post(graphql_handler)
    };

    Router::new()
        .route("/graphql", graphql_route)
        .route("/health", get(health))
        .with_state(HttpState::new(state))
}
