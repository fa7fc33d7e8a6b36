//! GraphQL schema: query and mutation roots over organizations and employees.

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{EmployeeInput, LoginPayload, OrganizationInput, UpdateEmployeeInput};

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema};
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;

use crate::db::AppState;
use crate::error::AppError;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema with the shared application state attached.
pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

/// Schema definition language for the API. Needs no state.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

/// Check out a pooled connection for a resolver.
fn db(ctx: &Context<'_>) -> async_graphql::Result<PooledConnection<SqliteConnectionManager>> {
    let state = ctx.data::<AppState>()?;
    state.db.get().map_err(|e| AppError::from(e).extend())
}
