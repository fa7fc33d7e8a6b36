use async_graphql::{Context, Object};

use crate::db::queries;
use crate::error::{GraphQLResultExt, OptionExt, msg};
use crate::middleware::{Authenticated, current_user};
use crate::models::{Employee, EmployeeFilter, Organization, User};

use super::db;

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[graphql(guard = "Authenticated")]
    async fn organizations(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Organization>> {
        let conn = db(ctx)?;
        queries::list_organizations(&conn).into_gql()
    }

    #[graphql(guard = "Authenticated")]
    async fn employees(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Employee>> {
        let conn = db(ctx)?;
        queries::list_employees(&conn).into_gql()
    }

    #[graphql(guard = "Authenticated")]
    async fn get_organization_by_id(
        &self,
        ctx: &Context<'_>,
        id: i64,
    ) -> async_graphql::Result<Organization> {
        let conn = db(ctx)?;
        queries::get_organization_by_id(&conn, id)
            .and_then(|org| org.or_not_found(msg::organization_not_found(id)))
            .into_gql()
    }

    /// Look up an organization by its external reference code.
    #[graphql(guard = "Authenticated")]
    async fn get_organization_by_ord_id(
        &self,
        ctx: &Context<'_>,
        ord_id: i64,
    ) -> async_graphql::Result<Organization> {
        let conn = db(ctx)?;
        queries::get_organization_by_ord_id(&conn, ord_id)
            .and_then(|org| org.or_not_found(msg::organization_ord_id_not_found(ord_id)))
            .into_gql()
    }

    #[graphql(guard = "Authenticated")]
    async fn get_employee_by_id(
        &self,
        ctx: &Context<'_>,
        employee_id: i64,
    ) -> async_graphql::Result<Employee> {
        let conn = db(ctx)?;
        queries::get_employee_by_id(&conn, employee_id)
            .and_then(|employee| employee.or_not_found(msg::employee_not_found(employee_id)))
            .into_gql()
    }

    /// Employees matching every supplied criterion. Date bounds are
    /// inclusive `YYYY-MM-DD` strings. Results are ordered by employee id.
    #[graphql(guard = "Authenticated")]
    async fn filtered_employees(
        &self,
        ctx: &Context<'_>,
        organization_id: Option<i64>,
        joining_date_after: Option<String>,
        joining_date_before: Option<String>,
    ) -> async_graphql::Result<Vec<Employee>> {
        let filter = EmployeeFilter::parse(
            organization_id,
            joining_date_after.as_deref(),
            joining_date_before.as_deref(),
        )
        .into_gql()?;
        let conn = db(ctx)?;
        queries::filter_employees(&conn, &filter).into_gql()
    }

    /// The account the bearer token belongs to.
    #[graphql(guard = "Authenticated")]
    async fn me(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        current_user(ctx)
    }
}
