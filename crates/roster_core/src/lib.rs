//! Core domain logic for the Roster employee service.
//! This crate is the single source of truth for employee invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::employee::{
    Employee, EmployeeId, EmployeeStatus, EmployeeValidationError, NewEmployee,
};
pub use model::wire::{EmployeePayload, EmployeeView};
pub use repo::employee_repo::{
    EmployeeListQuery, EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
    UniqueField,
};
pub use seed::{sample_employees, seed_sample_employees};
pub use service::employee_service::{EmployeeService, EmployeeServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
