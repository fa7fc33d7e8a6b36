use async_graphql::{Context, Object};

use crate::crypto::{verify_dummy_password, verify_password};
use crate::db::{AppState, queries};
use crate::error::{AppError, GraphQLResultExt, OptionExt, Result, msg};
use crate::middleware::Authenticated;
use crate::models::{Employee, Organization};

use super::types::{EmployeeInput, LoginPayload, OrganizationInput, UpdateEmployeeInput};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    #[graphql(guard = "Authenticated")]
    async fn create_organization(
        &self,
        ctx: &Context<'_>,
        input: OrganizationInput,
    ) -> async_graphql::Result<Organization> {
        let state = ctx.data::<AppState>()?;
        create_organization(state, input).into_gql()
    }

    #[graphql(guard = "Authenticated")]
    async fn create_employee(
        &self,
        ctx: &Context<'_>,
        input: EmployeeInput,
    ) -> async_graphql::Result<Employee> {
        let state = ctx.data::<AppState>()?;
        create_employee(state, input).into_gql()
    }

    #[graphql(guard = "Authenticated")]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        input: UpdateEmployeeInput,
    ) -> async_graphql::Result<Employee> {
        let state = ctx.data::<AppState>()?;
        update_employee(state, input).into_gql()
    }

    /// Returns a confirmation message.
    #[graphql(guard = "Authenticated")]
    async fn delete_employee(
        &self,
        ctx: &Context<'_>,
        employee_id: i64,
    ) -> async_graphql::Result<String> {
        let state = ctx.data::<AppState>()?;
        delete_employee(state, employee_id).into_gql()
    }

    /// Exchange credentials for a bearer token. Does not require a token.
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> async_graphql::Result<LoginPayload> {
        let state = ctx.data::<AppState>()?;
        login(state, &username, &password).into_gql()
    }
}

fn create_organization(state: &AppState, input: OrganizationInput) -> Result<Organization> {
    let input = input.into_create()?;
    let conn = state.db.get()?;

    let org = queries::create_organization(&conn, &input)?;
    tracing::info!(organization_id = org.id, "organization created");
    Ok(org)
}

fn create_employee(state: &AppState, input: EmployeeInput) -> Result<Employee> {
    let input = input.into_create()?;
    let conn = state.db.get()?;

    queries::get_organization_by_id(&conn, input.organization_id)?
        .or_not_found(msg::organization_not_found(input.organization_id))?;

    if queries::get_employee_by_id(&conn, input.employee_id)?.is_some() {
        return Err(AppError::Conflict(msg::employee_exists(input.employee_id)));
    }

    let employee = queries::create_employee(&conn, &input)?;
    tracing::info!(
        employee_id = employee.employee_id,
        organization_id = employee.organization_id,
        "employee created"
    );
    Ok(employee)
}

fn update_employee(state: &AppState, input: UpdateEmployeeInput) -> Result<Employee> {
    let employee_id = input.employee_id;
    let update = input.into_update()?;
    let conn = state.db.get()?;

    let existing = queries::get_employee_by_id(&conn, employee_id)?
        .or_not_found(msg::employee_not_found(employee_id))?;

    if let Some(org_id) = update.organization_id {
        queries::get_organization_by_id(&conn, org_id)?
            .or_not_found(msg::organization_not_found(org_id))?;
    }

    update.validate(&existing)?;

    if update.is_empty() {
        return Ok(existing);
    }

    let employee = queries::update_employee(&conn, employee_id, &update)?
        .or_not_found(msg::employee_not_found(employee_id))?;
    tracing::info!(employee_id, "employee updated");
    Ok(employee)
}

fn delete_employee(state: &AppState, employee_id: i64) -> Result<String> {
    let conn = state.db.get()?;

    if !queries::delete_employee(&conn, employee_id)? {
        return Err(AppError::NotFound(msg::employee_not_found(employee_id)));
    }

    tracing::info!(employee_id, "employee deleted");
    Ok(msg::employee_deleted(employee_id))
}

fn login(state: &AppState, username: &str, password: &str) -> Result<LoginPayload> {
    let conn = state.db.get()?;

    let Some(user) = queries::get_user_by_username(&conn, username)? else {
        verify_dummy_password(password);
        tracing::debug!("login failed: unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "login failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user)?;
    tracing::info!(user_id = user.id, "login succeeded");

    Ok(LoginPayload {
        token,
        username: user.username,
    })
}
