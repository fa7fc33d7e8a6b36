//! GraphQL object and input types.
//!
//! Dates cross the wire as `YYYY-MM-DD` strings and are parsed into
//! `NaiveDate` before reaching the data layer.

use async_graphql::{Context, InputObject, Object, SimpleObject};

use crate::db::queries;
use crate::error::{GraphQLResultExt, OptionExt, Result, msg};
use crate::models::{
    CreateEmployee, CreateOrganization, Employee, Organization, UpdateEmployee, User,
};
use crate::util::{format_date, parse_date, parse_optional_date};

use super::db;

#[Object]
impl Organization {
    async fn id(&self) -> i64 {
        self.id
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn establish_date(&self) -> Option<String> {
        self.establish_date.map(format_date)
    }

    /// External reference code
    async fn ord_id(&self) -> Option<i64> {
        self.ord_id
    }

    /// Employees of this organization, ascending by employee id
    async fn employees(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Employee>> {
        let conn = db(ctx)?;
        queries::list_employees_for_organization(&conn, self.id).into_gql()
    }
}

#[Object]
impl Employee {
    async fn employee_id(&self) -> i64 {
        self.employee_id
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn joining_date(&self) -> String {
        format_date(self.joining_date)
    }

    async fn relieving_date(&self) -> Option<String> {
        self.relieving_date.map(format_date)
    }

    async fn organization_id(&self) -> i64 {
        self.organization_id
    }

    async fn organization(&self, ctx: &Context<'_>) -> async_graphql::Result<Organization> {
        let conn = db(ctx)?;
        queries::get_organization_by_id(&conn, self.organization_id)
            .and_then(|org| org.or_not_found(msg::organization_not_found(self.organization_id)))
            .into_gql()
    }
}

/// The account a token was issued to.
#[Object(name = "Viewer")]
impl User {
    async fn id(&self) -> i64 {
        self.id
    }

    async fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug, InputObject)]
pub struct OrganizationInput {
    pub id: i64,
    pub name: String,
    pub establish_date: Option<String>,
    pub ord_id: Option<i64>,
}

impl OrganizationInput {
    pub fn into_create(self) -> Result<CreateOrganization> {
        let input = CreateOrganization {
            establish_date: parse_optional_date("establishDate", self.establish_date.as_deref())?,
            id: self.id,
            name: self.name,
            ord_id: self.ord_id,
        };
        input.validate()?;
        Ok(input)
    }
}

#[derive(Debug, InputObject)]
pub struct EmployeeInput {
    pub employee_id: i64,
    pub name: String,
    pub joining_date: String,
    pub relieving_date: Option<String>,
    pub organization_id: i64,
}

impl EmployeeInput {
    pub fn into_create(self) -> Result<CreateEmployee> {
        let input = CreateEmployee {
            joining_date: parse_date("joiningDate", &self.joining_date)?,
            relieving_date: parse_optional_date("relievingDate", self.relieving_date.as_deref())?,
            employee_id: self.employee_id,
            name: self.name,
            organization_id: self.organization_id,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Partial employee update. Omitted, null, or empty fields keep their
/// stored value.
#[derive(Debug, InputObject)]
pub struct UpdateEmployeeInput {
    pub employee_id: i64,
    pub name: Option<String>,
    pub joining_date: Option<String>,
    pub relieving_date: Option<String>,
    pub organization_id: Option<i64>,
}

impl UpdateEmployeeInput {
    pub fn into_update(self) -> Result<UpdateEmployee> {
        Ok(UpdateEmployee {
            joining_date: parse_optional_date("joiningDate", self.joining_date.as_deref())?,
            relieving_date: parse_optional_date("relievingDate", self.relieving_date.as_deref())?,
            name: self.name.filter(|name| !name.trim().is_empty()),
            organization_id: self.organization_id,
        })
    }
}

#[derive(Debug, SimpleObject)]
pub struct LoginPayload {
    pub token: String,
    pub username: String,
}
