//! Employee filter query tests

#[path = "../common/mod.rs"]
mod common;

use common::*;

fn seeded() -> rusqlite::Connection {
    let conn = setup_test_db();
    create_test_org(&conn, 1, "Acme");
    create_test_org(&conn, 2, "Globex");
    create_test_employee(&conn, 102, "Bob", date(2012, 9, 17), 1);
    create_test_employee(&conn, 101, "Alice", date(2004, 1, 5), 1);
    create_test_employee(&conn, 201, "Carol", date(2008, 6, 1), 2);
    conn
}

fn ids(employees: Vec<Employee>) -> Vec<i64> {
    employees.into_iter().map(|e| e.employee_id).collect()
}

fn filter(org: Option<i64>, after: Option<&str>, before: Option<&str>) -> EmployeeFilter {
    EmployeeFilter::parse(org, after, before).expect("valid filter")
}

#[test]
fn test_no_criteria_returns_all_ordered() {
    let conn = seeded();
    let result = queries::filter_employees(&conn, &EmployeeFilter::default()).unwrap();
    assert_eq!(ids(result), vec![101, 102, 201]);
}

#[test]
fn test_organization_only() {
    let conn = seeded();
    let result = queries::filter_employees(&conn, &filter(Some(1), None, None)).unwrap();
    assert_eq!(ids(result), vec![101, 102]);
}

#[test]
fn test_all_criteria_conjunctive() {
    let conn = seeded();
    let result = queries::filter_employees(
        &conn,
        &filter(Some(1), Some("2001-01-01"), Some("2010-01-01")),
    )
    .unwrap();
    assert_eq!(ids(result), vec![101], "only Alice joined org 1 in range");
}

#[test]
fn test_lower_bound_only() {
    let conn = seeded();
    let result = queries::filter_employees(&conn, &filter(None, Some("2008-06-01"), None)).unwrap();
    assert_eq!(ids(result), vec![102, 201], "bounds are inclusive");
}

#[test]
fn test_upper_bound_only() {
    let conn = seeded();
    let result = queries::filter_employees(&conn, &filter(None, None, Some("2008-06-01"))).unwrap();
    assert_eq!(ids(result), vec![101, 201]);
}

#[test]
fn test_empty_range_returns_nothing() {
    let conn = seeded();
    let result = queries::filter_employees(
        &conn,
        &filter(None, Some("2013-01-01"), Some("2001-01-01")),
    )
    .unwrap();
    assert!(result.is_empty(), "inverted range matches nothing");
}

#[test]
fn test_unknown_organization_returns_empty() {
    let conn = seeded();
    let result = queries::filter_employees(&conn, &filter(Some(99), None, None)).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_single_day_range_is_inclusive() {
    let conn = seeded();
    let result = queries::filter_employees(
        &conn,
        &filter(None, Some("2004-01-05"), Some("2004-01-05")),
    )
    .unwrap();
    assert_eq!(ids(result), vec![101], "both bounds include the joining day");
}

#[test]
fn test_malformed_date_rejected() {
    let result = EmployeeFilter::parse(None, Some("05/01/2004"), None);
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}
