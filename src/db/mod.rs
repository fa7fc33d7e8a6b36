mod from_row;
pub mod queries;
mod schema;

pub use from_row::{FromRow, query_all, query_one};
pub use schema::init_db;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::jwt::TokenService;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state shared by every request
#[derive(Clone)]
pub struct AppState {
    /// Main database pool (users, organizations, employees)
    pub db: DbPool,
    /// Issues and verifies bearer tokens
    pub tokens: TokenService,
}

/// Every pooled connection enforces foreign keys so employee rows cascade
/// with their organization.
fn manager(manager: SqliteConnectionManager) -> SqliteConnectionManager {
    manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = manager(SqliteConnectionManager::file(database_path));
    Pool::builder().max_size(10).build(manager)
}

/// Single-connection in-memory pool. Each in-memory SQLite connection is its
/// own database, so the pool is capped at one connection that is never
/// recycled.
pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    let manager = manager(SqliteConnectionManager::memory());
    Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
}
