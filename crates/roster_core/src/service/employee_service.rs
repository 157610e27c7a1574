//! Employee lifecycle service.
//!
//! # Responsibility
//! - Provide create/get/update/delete/list entry points for core callers.
//! - Translate wire payloads into validated input before touching storage.
//! - Map repository failures into the service error taxonomy.
//!
//! # Invariants
//! - Validation fully precedes persistence; a failed call writes nothing.
//! - `update` is a full replace: every settable field is overwritten.
//! - Service layer remains storage-agnostic.
//! - Log lines carry ids and employee codes only, never names or emails.

use crate::model::employee::{
    Employee, EmployeeId, EmployeeStatus, EmployeeValidationError, NewEmployee,
};
use crate::model::wire::EmployeePayload;
use crate::repo::employee_repo::{EmployeeListQuery, EmployeeRepository, RepoError, UniqueField};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, EmployeeServiceError>;

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// Required input missing, blank, too long or malformed.
    Validation(EmployeeValidationError),
    /// Status token is not `ACTIVE|BENCH|RESIGNED`.
    InvalidStatus(String),
    /// Email already belongs to another record.
    DuplicateEmail(String),
    /// Employee code already belongs to another record.
    DuplicateEmployeeCode(String),
    /// No record with this id.
    NotFound(EmployeeId),
    /// No record with this employee code.
    EmployeeCodeNotFound(String),
    /// Persistence-layer failure.
    Store(RepoError),
}

impl EmployeeServiceError {
    /// Whether the caller, not the store, is at fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// Stable machine-readable error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvalidStatus(_) => "invalid_status",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::DuplicateEmployeeCode(_) => "duplicate_employee_code",
            Self::NotFound(_) | Self::EmployeeCodeNotFound(_) => "not_found",
            Self::Store(_) => "internal_error",
        }
    }
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status `{value}`; expected ACTIVE|BENCH|RESIGNED"
            ),
            Self::DuplicateEmail(email) => write!(f, "Email already exists: {email}"),
            Self::DuplicateEmployeeCode(code) => write!(f, "Employee ID already exists: {code}"),
            Self::NotFound(id) => write!(f, "Employee not found with id: {id}"),
            Self::EmployeeCodeNotFound(code) => {
                write!(f, "Employee not found with employeeId: {code}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for EmployeeServiceError {
    fn from(value: EmployeeValidationError) -> Self {
        match value {
            EmployeeValidationError::InvalidStatus(token) => Self::InvalidStatus(token),
            other => Self::Validation(other),
        }
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Duplicate {
                field: UniqueField::Email,
                value,
            } => Self::DuplicateEmail(value),
            RepoError::Duplicate {
                field: UniqueField::EmployeeCode,
                value,
            } => Self::DuplicateEmployeeCode(value),
            RepoError::Validation(err) => Self::from(err),
            other => Self::Store(other),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum OpKind {
    Read,
    Write,
}

/// Employee lifecycle facade over repository implementations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one employee from a wire payload.
    ///
    /// # Errors
    /// - `Validation` / `InvalidStatus` for bad input, before any store access.
    /// - `DuplicateEmail`, then `DuplicateEmployeeCode`, for taken values.
    pub fn create(&mut self, payload: EmployeePayload) -> ServiceResult<Employee> {
        let input = NewEmployee::try_from(payload)?;
        self.create_employee(&input)
    }

    /// Creates one employee from already-typed input.
    pub fn create_employee(&mut self, input: &NewEmployee) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        debug!(
            "event=employee_create module=service status=start employee_code={}",
            input.employee_code
        );
        let result = self
            .repo
            .create_employee(input)
            .map_err(EmployeeServiceError::from);
        if let Ok(created) = &result {
            info!(
                "event=employee_created module=service id={} employee_code={}",
                created.id, created.employee_code
            );
        }
        finish("employee_create", OpKind::Write, started_at, result)
    }

    /// Creates several employees atomically; on any failure none are stored.
    pub fn create_employees(&mut self, inputs: &[NewEmployee]) -> ServiceResult<Vec<Employee>> {
        let started_at = Instant::now();
        debug!(
            "event=employee_create_batch module=service status=start count={}",
            inputs.len()
        );
        let result = self
            .repo
            .create_employees(inputs)
            .map_err(EmployeeServiceError::from);
        finish("employee_create_batch", OpKind::Write, started_at, result)
    }

    /// Gets one employee by storage id.
    pub fn get_by_id(&self, id: EmployeeId) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        debug!("event=employee_get module=service status=start id={id}");
        let result = self
            .repo
            .get_employee(id)
            .map_err(EmployeeServiceError::from)
            .and_then(|found| found.ok_or(EmployeeServiceError::NotFound(id)));
        finish("employee_get", OpKind::Read, started_at, result)
    }

    /// Gets one employee by external employee code.
    pub fn get_by_employee_code(&self, employee_code: &str) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        debug!("event=employee_get_by_code module=service status=start employee_code={employee_code}");
        let result = self
            .repo
            .find_by_employee_code(employee_code)
            .map_err(EmployeeServiceError::from)
            .and_then(|found| {
                found.ok_or_else(|| {
                    EmployeeServiceError::EmployeeCodeNotFound(employee_code.to_string())
                })
            });
        finish("employee_get_by_code", OpKind::Read, started_at, result)
    }

    /// Replaces every settable field of an employee from a wire payload.
    ///
    /// Omitted optional fields are cleared; omitted required fields fail
    /// validation.
    pub fn update(&mut self, id: EmployeeId, payload: EmployeePayload) -> ServiceResult<Employee> {
        let input = NewEmployee::try_from(payload)?;
        self.update_employee(id, &input)
    }

    /// Replaces every settable field of an employee from typed input.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `DuplicateEmail` / `DuplicateEmployeeCode` when a changed value is
    ///   owned by a different record. Keeping one's own value is allowed.
    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        input: &NewEmployee,
    ) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        debug!(
            "event=employee_update module=service status=start id={id} employee_code={}",
            input.employee_code
        );
        let result = self
            .repo
            .update_employee(id, input)
            .map_err(EmployeeServiceError::from);
        finish("employee_update", OpKind::Write, started_at, result)
    }

    /// Permanently removes an employee.
    pub fn delete(&mut self, id: EmployeeId) -> ServiceResult<()> {
        let started_at = Instant::now();
        debug!("event=employee_delete module=service status=start id={id}");
        let result = self
            .repo
            .delete_employee(id)
            .map_err(EmployeeServiceError::from);
        finish("employee_delete", OpKind::Write, started_at, result)
    }

    /// Lists every employee ordered by id.
    pub fn list(&self) -> ServiceResult<Vec<Employee>> {
        self.list_where("employee_list", &EmployeeListQuery::default())
    }

    /// Lists employees whose role equals `role` exactly.
    pub fn list_by_role(&self, role: &str) -> ServiceResult<Vec<Employee>> {
        let query = EmployeeListQuery {
            role: Some(role.to_string()),
            ..EmployeeListQuery::default()
        };
        self.list_where("employee_list_by_role", &query)
    }

    /// Lists employees with the given status token.
    ///
    /// # Errors
    /// - `InvalidStatus` when `status` is not an exact status token.
    pub fn list_by_status(&self, status: &str) -> ServiceResult<Vec<Employee>> {
        let status = status.parse::<EmployeeStatus>()?;
        let query = EmployeeListQuery {
            status: Some(status),
            ..EmployeeListQuery::default()
        };
        self.list_where("employee_list_by_status", &query)
    }

    /// Lists employees whose primary or secondary skill equals `skill`.
    pub fn list_by_skill(&self, skill: &str) -> ServiceResult<Vec<Employee>> {
        let query = EmployeeListQuery {
            skill: Some(skill.to_string()),
            ..EmployeeListQuery::default()
        };
        self.list_where("employee_list_by_skill", &query)
    }

    /// Returns the number of stored employees.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count_employees()?)
    }

    fn list_where(
        &self,
        event: &'static str,
        query: &EmployeeListQuery,
    ) -> ServiceResult<Vec<Employee>> {
        let started_at = Instant::now();
        debug!("event={event} module=service status=start");
        let result = self
            .repo
            .list_employees(query)
            .map_err(EmployeeServiceError::from);
        if let Ok(items) = &result {
            debug!("event={event} module=service rows={}", items.len());
        }
        finish(event, OpKind::Read, started_at, result)
    }
}

fn finish<T>(
    event: &'static str,
    kind: OpKind,
    started_at: Instant,
    result: ServiceResult<T>,
) -> ServiceResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match (&result, kind) {
        (Ok(_), OpKind::Write) => {
            info!("event={event} module=service status=ok duration_ms={duration_ms}")
        }
        (Ok(_), OpKind::Read) => {
            debug!("event={event} module=service status=ok duration_ms={duration_ms}")
        }
        (Err(err), _) if err.is_client_error() => warn!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code={}",
            err.code()
        ),
        (Err(err), _) => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code=store_failure error={err}"
        ),
    }
    result
}
