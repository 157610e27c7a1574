//! Employee domain model.
//!
//! # Responsibility
//! - Define the stored employee record and the validated write input.
//! - Own the closed status enumeration and its token round-trip.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another employee.
//! - `status` is always one of `ACTIVE|BENCH|RESIGNED`.
//! - `NewEmployee::validate()` must pass before any repository write.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Maximum accepted email length (RFC 5321).
pub const MAX_EMAIL_LEN: usize = 254;
/// Maximum accepted length for every other text field.
pub const MAX_TEXT_LEN: usize = 255;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .expect("valid email regex")
});

/// Surrogate storage identifier.
pub type EmployeeId = i64;

/// Employment status. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    /// Currently assigned to work.
    Active,
    /// Employed but unassigned.
    Bench,
    /// No longer with the company.
    Resigned,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [Self::Active, Self::Bench, Self::Resigned];

    /// Stable wire/storage token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Bench => "BENCH",
            Self::Resigned => "RESIGNED",
        }
    }
}

impl Display for EmployeeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = EmployeeValidationError;

    /// Exact, case-sensitive token match.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVE" => Ok(Self::Active),
            "BENCH" => Ok(Self::Bench),
            "RESIGNED" => Ok(Self::Resigned),
            other => Err(EmployeeValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// Validation failure for employee input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Required field is absent or blank.
    MissingField(&'static str),
    /// Field exceeds its length limit.
    FieldTooLong { field: &'static str, max: usize },
    /// Email does not look like an address.
    InvalidEmail(String),
    /// Status token is not one of `ACTIVE|BENCH|RESIGNED`.
    InvalidStatus(String),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} is too long (max {max} chars)")
            }
            Self::InvalidEmail(value) => write!(f, "email must be valid: `{value}`"),
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status `{value}`; expected ACTIVE|BENCH|RESIGNED"
            ),
        }
    }
}

impl Error for EmployeeValidationError {}

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    /// External unique identifier, e.g. `EMP001`.
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all records.
    pub email: String,
    pub role: String,
    pub status: EmployeeStatus,
    pub primary_skill: String,
    pub secondary_skill: Option<String>,
    /// Unix epoch milliseconds, set on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

/// Write input for create and full-replace update.
///
/// Carries every client-settable field; id and timestamps are storage-owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub status: EmployeeStatus,
    pub primary_skill: String,
    pub secondary_skill: Option<String>,
}

impl NewEmployee {
    /// Validates required fields, lengths and email syntax.
    ///
    /// # Errors
    /// - `MissingField` when a required field is blank.
    /// - `FieldTooLong` when a field exceeds its limit.
    /// - `InvalidEmail` when `email` is not a syntactically valid address.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        require_text("employeeId", &self.employee_code, MAX_TEXT_LEN)?;
        require_text("firstName", &self.first_name, MAX_TEXT_LEN)?;
        require_text("lastName", &self.last_name, MAX_TEXT_LEN)?;
        require_text("email", &self.email, MAX_EMAIL_LEN)?;
        require_text("role", &self.role, MAX_TEXT_LEN)?;
        require_text("primarySkill", &self.primary_skill, MAX_TEXT_LEN)?;
        if let Some(secondary) = self.secondary_skill.as_deref() {
            check_len("secondarySkill", secondary, MAX_TEXT_LEN)?;
        }

        if !is_valid_email(&self.email) {
            return Err(EmployeeValidationError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

/// Returns whether `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), EmployeeValidationError> {
    if value.trim().is_empty() {
        return Err(EmployeeValidationError::MissingField(field));
    }
    check_len(field, value, max)
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), EmployeeValidationError> {
    if value.chars().count() > max {
        return Err(EmployeeValidationError::FieldTooLong { field, max });
    }
    Ok(())
}
