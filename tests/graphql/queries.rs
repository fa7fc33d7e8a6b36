//! Query field tests: listings, lookups, filtering, nested fields

#[path = "../common/mod.rs"]
mod common;

use common::*;
use serde_json::Value;

/// Authenticated app seeded with Alice and Bob in organization 1
fn seeded_app() -> (axum::Router, String) {
    let state = create_test_state();
    seed_alice_and_bob(&state);
    let token = login_token(&state);
    (app(state), token)
}

fn employee_ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("expected a list")
        .iter()
        .map(|e| e["employeeId"].as_i64().expect("employeeId"))
        .collect()
}

#[tokio::test]
async fn test_list_organizations_and_employees() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(
        &app,
        "{ organizations { id name establishDate ordId } employees { employeeId name } }",
        Some(&token),
    )
    .await;

    assert!(json["errors"].is_null(), "unexpected errors: {}", json);
    let orgs = json["data"]["organizations"].as_array().unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0]["name"], "Acme");
    assert_eq!(orgs[0]["establishDate"], "1999-04-01");
    assert!(orgs[0]["ordId"].is_null());
    assert_eq!(employee_ids(&json["data"]["employees"]), vec![101, 102]);
}

#[tokio::test]
async fn test_filtered_employees_by_org_and_range() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(
        &app,
        r#"{ filteredEmployees(organizationId: 1, joiningDateAfter: "2003-01-01", joiningDateBefore: "2005-01-01") { employeeId name joiningDate } }"#,
        Some(&token),
    )
    .await;

    assert!(json["errors"].is_null(), "unexpected errors: {}", json);
    let list = &json["data"]["filteredEmployees"];
    assert_eq!(employee_ids(list), vec![101], "only Alice joined in range");
    assert_eq!(list[0]["name"], "Alice");
    assert_eq!(list[0]["joiningDate"], "2004-01-05");
}

#[tokio::test]
async fn test_filtered_employees_range_returns_all_matches_in_id_order() {
    let state = create_test_state();
    {
        let conn = state.db.get().unwrap();
        create_test_org(&conn, 1, "Org");
        create_test_employee(&conn, 102, "Bob", date(2022, 2, 10), 1);
        create_test_employee(&conn, 101, "Alice", date(2004, 1, 5), 1);
        create_test_employee(&conn, 103, "Charlie", date(2003, 3, 15), 1);
    }
    let token = login_token(&state);
    let app = app(state);

    let (_, json) = graphql(
        &app,
        r#"{ filteredEmployees(organizationId: 1, joiningDateAfter: "2003-01-01", joiningDateBefore: "2022-02-28") { employeeId name } }"#,
        Some(&token),
    )
    .await;

    assert!(json["errors"].is_null(), "unexpected errors: {}", json);
    let list = &json["data"]["filteredEmployees"];
    assert_eq!(
        employee_ids(list),
        vec![101, 102, 103],
        "every employee in range, ascending by id"
    );
    assert_eq!(list[0]["name"], "Alice");
    assert_eq!(list[1]["name"], "Bob");
    assert_eq!(list[2]["name"], "Charlie");
}

#[tokio::test]
async fn test_filtered_employees_without_criteria_returns_all() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(&app, "{ filteredEmployees { employeeId } }", Some(&token)).await;

    assert_eq!(employee_ids(&json["data"]["filteredEmployees"]), vec![101, 102]);
}

#[tokio::test]
async fn test_filtered_employees_lower_bound_only() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(
        &app,
        r#"{ filteredEmployees(joiningDateAfter: "2010-01-01") { employeeId } }"#,
        Some(&token),
    )
    .await;

    assert_eq!(employee_ids(&json["data"]["filteredEmployees"]), vec![102]);
}

#[tokio::test]
async fn test_filtered_employees_rejects_malformed_date() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(
        &app,
        r#"{ filteredEmployees(joiningDateAfter: "January 2010") { employeeId } }"#,
        Some(&token),
    )
    .await;

    let (_, code) = first_error(&json);
    assert_eq!(code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_organization_by_id() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(&app, "{ getOrganizationById(id: 1) { id name } }", Some(&token)).await;
    assert_eq!(json["data"]["getOrganizationById"]["name"], "Acme");

    let (_, json) = graphql(&app, "{ getOrganizationById(id: 99) { id } }", Some(&token)).await;
    let (message, code) = first_error(&json);
    assert_eq!(message, msg::organization_not_found(99));
    assert_eq!(code, "NOT_FOUND");
}

#[tokio::test]
async fn test_get_organization_by_ord_id() {
    let state = create_test_state();
    {
        let conn = state.db.get().unwrap();
        queries::create_organization(
            &conn,
            &CreateOrganization {
                id: 3,
                name: "Initech".to_string(),
                establish_date: None,
                ord_id: Some(4242),
            },
        )
        .unwrap();
    }
    let token = login_token(&state);
    let app = app(state);

    let (_, json) = graphql(&app, "{ getOrganizationByOrdId(ordId: 4242) { id name } }", Some(&token)).await;
    assert_eq!(json["data"]["getOrganizationByOrdId"]["id"], 3);

    let (_, json) = graphql(&app, "{ getOrganizationByOrdId(ordId: 1) { id } }", Some(&token)).await;
    let (message, _) = first_error(&json);
    assert_eq!(message, msg::organization_ord_id_not_found(1));
}

#[tokio::test]
async fn test_get_employee_by_id() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(
        &app,
        "{ getEmployeeById(employeeId: 102) { name relievingDate organizationId } }",
        Some(&token),
    )
    .await;
    let employee = &json["data"]["getEmployeeById"];
    assert_eq!(employee["name"], "Bob");
    assert!(employee["relievingDate"].is_null());
    assert_eq!(employee["organizationId"], 1);

    let (_, json) = graphql(&app, "{ getEmployeeById(employeeId: 999) { name } }", Some(&token)).await;
    let (message, code) = first_error(&json);
    assert_eq!(message, msg::employee_not_found(999));
    assert_eq!(code, "NOT_FOUND");
}

#[tokio::test]
async fn test_nested_fields_resolve_both_ways() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(
        &app,
        "{ getOrganizationById(id: 1) { employees { employeeId organization { name } } } }",
        Some(&token),
    )
    .await;

    assert!(json["errors"].is_null(), "unexpected errors: {}", json);
    let employees = &json["data"]["getOrganizationById"]["employees"];
    assert_eq!(employee_ids(employees), vec![101, 102]);
    assert_eq!(employees[0]["organization"]["name"], "Acme");
}

#[tokio::test]
async fn test_me_returns_token_owner() {
    let (app, token) = seeded_app();

    let (_, json) = graphql(&app, "{ me { username } }", Some(&token)).await;

    assert_eq!(json["data"]["me"]["username"], TEST_USERNAME);
}
