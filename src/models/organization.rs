use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, msg};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Caller-supplied primary key
    pub id: i64,
    pub name: String,
    pub establish_date: Option<NaiveDate>,
    /// External reference code
    pub ord_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganization {
    pub id: i64,
    pub name: String,
    pub establish_date: Option<NaiveDate>,
    pub ord_id: Option<i64>,
}

impl CreateOrganization {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest(msg::NAME_EMPTY.into()));
        }
        Ok(())
    }
}
