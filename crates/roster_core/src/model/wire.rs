//! JSON wire representation for employees.
//!
//! # Responsibility
//! - Define the camelCase request/response shapes used by the HTTP surface.
//! - Convert between wire and stored shapes with explicit total functions.
//!
//! # Invariants
//! - `id`, `dateCreated`, `dateUpdated` are read-only and ignored on input.
//! - Status is rendered with its canonical token.

use crate::model::employee::{
    Employee, EmployeeId, EmployeeStatus, EmployeeValidationError, NewEmployee,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Request body for create and update.
///
/// Every field is optional at the decoding layer so that missing input is
/// reported as a validation error instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    /// Wire name of the employee code.
    pub employee_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub primary_skill: Option<String>,
    pub secondary_skill: Option<String>,
}

/// Response body for a stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: EmployeeId,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub status: EmployeeStatus,
    pub primary_skill: String,
    pub secondary_skill: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl TryFrom<EmployeePayload> for NewEmployee {
    type Error = EmployeeValidationError;

    /// Maps wire input to validated write input.
    ///
    /// Required text fields are checked in declaration order, then status is
    /// parsed, then `NewEmployee::validate()` runs.
    fn try_from(payload: EmployeePayload) -> Result<Self, Self::Error> {
        let employee_code = required("employeeId", payload.employee_id)?;
        let first_name = required("firstName", payload.first_name)?;
        let last_name = required("lastName", payload.last_name)?;
        let email = required("email", payload.email)?;
        let role = required("role", payload.role)?;
        let status = required("status", payload.status)?.parse::<EmployeeStatus>()?;
        let primary_skill = required("primarySkill", payload.primary_skill)?;

        let input = NewEmployee {
            employee_code,
            first_name,
            last_name,
            email,
            role,
            status,
            primary_skill,
            secondary_skill: payload.secondary_skill,
        };
        input.validate()?;
        Ok(input)
    }
}

impl From<&Employee> for EmployeeView {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            employee_id: employee.employee_code.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            role: employee.role.clone(),
            status: employee.status,
            primary_skill: employee.primary_skill.clone(),
            secondary_skill: employee.secondary_skill.clone(),
            date_created: epoch_ms_to_utc(employee.created_at),
            date_updated: epoch_ms_to_utc(employee.updated_at),
        }
    }
}

impl From<Employee> for EmployeeView {
    fn from(employee: Employee) -> Self {
        Self::from(&employee)
    }
}

fn required(
    field: &'static str,
    value: Option<String>,
) -> Result<String, EmployeeValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(EmployeeValidationError::MissingField(field)),
    }
}

// Out-of-range values clamp to the epoch rather than failing the whole read.
fn epoch_ms_to_utc(value: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(value).single().unwrap_or_default()
}
