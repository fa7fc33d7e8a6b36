use chrono::Utc;
use rusqlite::{Connection, ToSql, params, types::Value};

use crate::crypto::hash_password;
use crate::error::{AppError, Result, msg};
use crate::models::*;
use crate::util::format_date;

use super::from_row::{
    EMPLOYEE_COLS, FromRow, ORGANIZATION_COLS, USER_COLS, query_all, query_one,
};

fn now() -> i64 {
    Utc::now().timestamp()
}

/// True if the error is a primary key or unique constraint violation.
fn is_duplicate_key(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Builder for dynamic UPDATE statements with optional fields.
/// Combines multiple field updates into a single query.
struct UpdateBuilder {
    table: &'static str,
    key_column: &'static str,
    id: i64,
    fields: Vec<(&'static str, Value)>,
}

impl UpdateBuilder {
    fn new(table: &'static str, key_column: &'static str, id: i64) -> Self {
        Self {
            table,
            key_column,
            id,
            fields: Vec::new(),
        }
    }

    fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    fn set_opt<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Execute the update and return the updated row using a RETURNING clause.
    /// With no fields set the current row is returned unchanged.
    /// Returns None if no row matched.
    fn execute_returning<T: FromRow>(
        self,
        conn: &Connection,
        returning_cols: &str,
    ) -> Result<Option<T>> {
        if self.fields.is_empty() {
            return query_one(
                conn,
                &format!(
                    "SELECT {} FROM {} WHERE {} = ?1",
                    returning_cols, self.table, self.key_column
                ),
                &[&self.id],
            );
        }
        let sets: Vec<String> = self
            .fields
            .iter()
            .map(|(col, _)| format!("{} = ?", col))
            .collect();
        let mut values: Vec<Value> = self.fields.into_iter().map(|(_, v)| v).collect();
        values.push(self.id.into());
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ? RETURNING {}",
            self.table,
            sets.join(", "),
            self.key_column,
            returning_cols
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query_map(rusqlite::params_from_iter(values), T::from_row)?;
        rows.next().transpose().map_err(Into::into)
    }
}

// ============ Users ============

/// Create a login account, hashing the password.
pub fn create_user(conn: &Connection, input: &CreateUser) -> Result<User> {
    input.validate()?;
    let username = input.username.trim().to_string();
    let password_hash = hash_password(&input.password)?;
    let created_at = now();

    conn.execute(
        "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
        params![&username, &password_hash, created_at],
    )
    .map_err(|e| {
        if is_duplicate_key(&e) {
            AppError::Conflict(format!("User '{}' already exists.", username))
        } else {
            e.into()
        }
    })?;

    Ok(User {
        id: conn.last_insert_rowid(),
        username,
        password_hash,
        created_at,
    })
}

pub fn get_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLS),
        &[&id],
    )
}

pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let username = username.trim();
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE username = ?1", USER_COLS),
        &[&username],
    )
}

pub fn count_users(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(Into::into)
}

// ============ Organizations ============

/// Insert an organization with its caller-supplied id.
/// A taken id is reported as `AppError::Conflict`.
pub fn create_organization(conn: &Connection, input: &CreateOrganization) -> Result<Organization> {
    let name = input.name.trim().to_string();

    conn.execute(
        "INSERT INTO organizations (id, name, establish_date, ord_id) VALUES (?1, ?2, ?3, ?4)",
        params![input.id, &name, input.establish_date, input.ord_id],
    )
    .map_err(|e| {
        if is_duplicate_key(&e) {
            AppError::Conflict(msg::organization_exists(input.id))
        } else {
            e.into()
        }
    })?;

    Ok(Organization {
        id: input.id,
        name,
        establish_date: input.establish_date,
        ord_id: input.ord_id,
    })
}

pub fn get_organization_by_id(conn: &Connection, id: i64) -> Result<Option<Organization>> {
    query_one(
        conn,
        &format!("SELECT {} FROM organizations WHERE id = ?1", ORGANIZATION_COLS),
        &[&id],
    )
}

/// Look up by external reference code. If several organizations share a
/// code the one with the lowest id wins.
pub fn get_organization_by_ord_id(conn: &Connection, ord_id: i64) -> Result<Option<Organization>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM organizations WHERE ord_id = ?1 ORDER BY id LIMIT 1",
            ORGANIZATION_COLS
        ),
        &[&ord_id],
    )
}

pub fn list_organizations(conn: &Connection) -> Result<Vec<Organization>> {
    query_all(
        conn,
        &format!("SELECT {} FROM organizations ORDER BY id", ORGANIZATION_COLS),
        &[],
    )
}

// ============ Employees ============

/// Insert an employee. The referenced organization must exist; callers
/// check that first to report a readable error.
pub fn create_employee(conn: &Connection, input: &CreateEmployee) -> Result<Employee> {
    let name = input.name.trim().to_string();

    conn.execute(
        "INSERT INTO employees (employee_id, name, joining_date, relieving_date, organization_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            input.employee_id,
            &name,
            input.joining_date,
            input.relieving_date,
            input.organization_id
        ],
    )
    .map_err(|e| {
        if is_duplicate_key(&e) {
            AppError::Conflict(msg::employee_exists(input.employee_id))
        } else {
            e.into()
        }
    })?;

    Ok(Employee {
        employee_id: input.employee_id,
        name,
        joining_date: input.joining_date,
        relieving_date: input.relieving_date,
        organization_id: input.organization_id,
    })
}

pub fn get_employee_by_id(conn: &Connection, employee_id: i64) -> Result<Option<Employee>> {
    query_one(
        conn,
        &format!("SELECT {} FROM employees WHERE employee_id = ?1", EMPLOYEE_COLS),
        &[&employee_id],
    )
}

/// Employees matching every supplied criterion, ascending by employee_id.
pub fn filter_employees(conn: &Connection, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
    let predicates = filter.predicates();
    let where_clause = if filter.is_empty() {
        String::new()
    } else {
        let clauses: Vec<&str> = predicates.iter().map(|(clause, _)| *clause).collect();
        format!("WHERE {}", clauses.join(" AND "))
    };
    let params: Vec<&dyn ToSql> = predicates.iter().map(|(_, v)| v as &dyn ToSql).collect();

    tracing::debug!(criteria = predicates.len(), "filtering employees");

    query_all(
        conn,
        &format!(
            "SELECT {} FROM employees {} ORDER BY employee_id",
            EMPLOYEE_COLS, where_clause
        ),
        &params,
    )
}

pub fn list_employees(conn: &Connection) -> Result<Vec<Employee>> {
    filter_employees(conn, &EmployeeFilter::default())
}

pub fn list_employees_for_organization(
    conn: &Connection,
    organization_id: i64,
) -> Result<Vec<Employee>> {
    filter_employees(
        conn,
        &EmployeeFilter {
            organization_id: Some(organization_id),
            ..Default::default()
        },
    )
}

/// Apply a partial update in one statement. Returns the updated employee,
/// or None if not found.
pub fn update_employee(
    conn: &Connection,
    employee_id: i64,
    input: &UpdateEmployee,
) -> Result<Option<Employee>> {
    UpdateBuilder::new("employees", "employee_id", employee_id)
        .set_opt("name", input.name.as_ref().map(|n| n.trim().to_string()))
        .set_opt("joining_date", input.joining_date.map(format_date))
        .set_opt("relieving_date", input.relieving_date.map(format_date))
        .set_opt("organization_id", input.organization_id)
        .execute_returning(conn, EMPLOYEE_COLS)
}

pub fn delete_employee(conn: &Connection, employee_id: i64) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM employees WHERE employee_id = ?1",
        params![employee_id],
    )?;
    Ok(deleted > 0)
}
