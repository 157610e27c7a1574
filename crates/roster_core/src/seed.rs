//! Sample employee data for demos and local development.

use crate::model::employee::{EmployeeStatus, NewEmployee};
use crate::repo::employee_repo::EmployeeRepository;
use crate::service::employee_service::{EmployeeService, ServiceResult};
use log::info;

/// Returns the five bundled sample employees (EMP001..EMP005).
pub fn sample_employees() -> Vec<NewEmployee> {
    [
        (
            "EMP001",
            "Juan",
            "Dela Cruz",
            "juan.delacruz@company.com",
            "Software Engineer",
            EmployeeStatus::Active,
            "Java",
            "Spring Boot",
        ),
        (
            "EMP002",
            "Maria",
            "Santos",
            "maria.santos@company.com",
            "Senior Developer",
            EmployeeStatus::Active,
            "Python",
            "Django",
        ),
        (
            "EMP003",
            "Pedro",
            "Garcia",
            "pedro.garcia@company.com",
            "Full Stack Developer",
            EmployeeStatus::Bench,
            "JavaScript",
            "React",
        ),
        (
            "EMP004",
            "Anna",
            "Reyes",
            "anna.reyes@company.com",
            "DevOps Engineer",
            EmployeeStatus::Active,
            "Docker",
            "Kubernetes",
        ),
        (
            "EMP005",
            "Jose",
            "Ramos",
            "jose.ramos@company.com",
            "QA Engineer",
            EmployeeStatus::Resigned,
            "Selenium",
            "TestNG",
        ),
    ]
    .into_iter()
    .map(
        |(code, first, last, email, role, status, primary, secondary)| NewEmployee {
            employee_code: code.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            status,
            primary_skill: primary.to_string(),
            secondary_skill: Some(secondary.to_string()),
        },
    )
    .collect()
}

/// Inserts the sample employees when the store is empty.
///
/// All samples are written in one transaction, so a failed seed leaves the
/// table empty and the next start retries. Returns how many records were
/// inserted (`0` when data already exists).
pub fn seed_sample_employees<R: EmployeeRepository>(
    service: &mut EmployeeService<R>,
) -> ServiceResult<usize> {
    if service.count()? > 0 {
        info!("event=seed_sample module=seed status=skipped reason=not_empty");
        return Ok(0);
    }

    let inserted = service.create_employees(&sample_employees())?.len();

    info!("event=seed_sample module=seed status=ok inserted={inserted}");
    Ok(inserted)
}
