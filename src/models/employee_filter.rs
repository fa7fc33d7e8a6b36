//! Typed criteria for the filtered employee listing.
//!
//! Each supplied criterion becomes one SQL predicate; the predicates are
//! ANDed together. Omitted criteria impose no constraint.

use chrono::NaiveDate;
use rusqlite::types::Value;

use crate::error::Result;
use crate::util::{format_date, parse_optional_date};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    pub organization_id: Option<i64>,
    /// Inclusive lower bound on joining_date
    pub joining_date_after: Option<NaiveDate>,
    /// Inclusive upper bound on joining_date
    pub joining_date_before: Option<NaiveDate>,
}

impl EmployeeFilter {
    /// Build a filter from string-encoded dates as received on the wire.
    pub fn parse(
        organization_id: Option<i64>,
        joining_date_after: Option<&str>,
        joining_date_before: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            organization_id,
            joining_date_after: parse_optional_date("joiningDateAfter", joining_date_after)?,
            joining_date_before: parse_optional_date("joiningDateBefore", joining_date_before)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.organization_id.is_none()
            && self.joining_date_after.is_none()
            && self.joining_date_before.is_none()
    }

    /// Conjunctive predicate list: `(clause, bound value)` pairs.
    pub fn predicates(&self) -> Vec<(&'static str, Value)> {
        let mut predicates = Vec::new();
        if let Some(org_id) = self.organization_id {
            predicates.push(("organization_id = ?", Value::Integer(org_id)));
        }
        if let Some(after) = self.joining_date_after {
            predicates.push(("joining_date >= ?", Value::Text(format_date(after))));
        }
        if let Some(before) = self.joining_date_before {
            predicates.push(("joining_date <= ?", Value::Text(format_date(before))));
        }
        predicates
    }
}
