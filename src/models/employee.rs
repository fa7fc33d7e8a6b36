use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, msg};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Caller-supplied primary key
    pub employee_id: i64,
    pub name: String,
    pub joining_date: NaiveDate,
    pub relieving_date: Option<NaiveDate>,
    pub organization_id: i64,
}

/// Rejects a relieving date that falls before the joining date.
pub fn validate_service_dates(joining: NaiveDate, relieving: Option<NaiveDate>) -> Result<()> {
    match relieving {
        Some(relieving) if relieving < joining => {
            Err(AppError::BadRequest(msg::RELIEVING_BEFORE_JOINING.into()))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub employee_id: i64,
    pub name: String,
    pub joining_date: NaiveDate,
    pub relieving_date: Option<NaiveDate>,
    pub organization_id: i64,
}

impl CreateEmployee {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest(msg::NAME_EMPTY.into()));
        }
        validate_service_dates(self.joining_date, self.relieving_date)
    }
}

/// Partial update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub relieving_date: Option<NaiveDate>,
    pub organization_id: Option<i64>,
}

impl UpdateEmployee {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.joining_date.is_none()
            && self.relieving_date.is_none()
            && self.organization_id.is_none()
    }

    /// Validate the update against the record it will be applied to.
    pub fn validate(&self, existing: &Employee) -> Result<()> {
        if let Some(ref name) = self.name
            && name.trim().is_empty()
        {
            return Err(AppError::BadRequest(msg::NAME_EMPTY.into()));
        }
        let merged = self.apply_to(existing);
        validate_service_dates(merged.joining_date, merged.relieving_date)
    }

    /// The record as it will look once the update is persisted.
    pub fn apply_to(&self, existing: &Employee) -> Employee {
        Employee {
            employee_id: existing.employee_id,
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            joining_date: self.joining_date.unwrap_or(existing.joining_date),
            relieving_date: self.relieving_date.or(existing.relieving_date),
            organization_id: self.organization_id.unwrap_or(existing.organization_id),
        }
    }
}
