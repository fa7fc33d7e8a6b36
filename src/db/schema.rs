use rusqlite::Connection;

/// Initialize the database schema
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        -- Login accounts (password_hash is an Argon2id PHC string)
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        -- Organizations (id is supplied by the caller)
        CREATE TABLE IF NOT EXISTS organizations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            establish_date TEXT,
            ord_id INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_organizations_ord_id ON organizations(ord_id);

        -- Employees (dates stored as YYYY-MM-DD so text comparison is chronological)
        CREATE TABLE IF NOT EXISTS employees (
            employee_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            joining_date TEXT NOT NULL,
            relieving_date TEXT,
            organization_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_employees_org ON employees(organization_id);
        CREATE INDEX IF NOT EXISTS idx_employees_joining_date ON employees(joining_date);
        "#,
    )
}
