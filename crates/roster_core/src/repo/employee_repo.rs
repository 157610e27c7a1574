//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered-scan APIs over the `employees` table.
//! - Keep SQL details inside the core persistence boundary.
//! - Enforce email/employee-code uniqueness atomically with the write.
//!
//! # Invariants
//! - Write paths call `NewEmployee::validate()` before any SQL mutation.
//! - Uniqueness checks and the write share one `IMMEDIATE` transaction.
//! - `UNIQUE` index failures surface as `RepoError::Duplicate`, never as raw
//!   DB errors.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::employee::{
    Employee, EmployeeId, EmployeeStatus, EmployeeValidationError, NewEmployee,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    employee_code,
    first_name,
    last_name,
    email,
    role,
    status,
    primary_skill,
    secondary_skill,
    created_at,
    updated_at
FROM employees";

/// Current time in Unix epoch milliseconds, evaluated by SQLite.
const NOW_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

pub type RepoResult<T> = Result<T, RepoError>;

/// Column guarded by a uniqueness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    EmployeeCode,
}

impl Display for UniqueField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::EmployeeCode => f.write_str("employeeId"),
        }
    }
}

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Db(DbError),
    NotFound(EmployeeId),
    Duplicate { field: UniqueField, value: String },
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found with id: {id}"),
            Self::Duplicate { field, value } => write!(f, "{field} already exists: {value}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter options for listing employees. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListQuery {
    /// Exact, case-sensitive role match.
    pub role: Option<String>,
    pub status: Option<EmployeeStatus>,
    /// Matches either the primary or the secondary skill exactly.
    pub skill: Option<String>,
}

/// Repository interface for employee records.
pub trait EmployeeRepository {
    /// Inserts a new record and returns it with id and timestamps assigned.
    fn create_employee(&mut self, input: &NewEmployee) -> RepoResult<Employee>;
    /// Inserts all records or none of them.
    fn create_employees(&mut self, inputs: &[NewEmployee]) -> RepoResult<Vec<Employee>>;
    /// Replaces every mutable field of an existing record.
    fn update_employee(&mut self, id: EmployeeId, input: &NewEmployee) -> RepoResult<Employee>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_by_employee_code(&self, employee_code: &str) -> RepoResult<Option<Employee>>;
    /// Lists matching records ordered by id ascending.
    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>>;
    /// Hard-deletes one record.
    fn delete_employee(&mut self, id: EmployeeId) -> RepoResult<()>;
    fn exists_by_email(&self, email: &str) -> RepoResult<bool>;
    fn exists_by_employee_code(&self, employee_code: &str) -> RepoResult<bool>;
    fn count_employees(&self) -> RepoResult<u64>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when migrations have not been applied.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        if !table_exists(conn, "employees")? {
            return Err(RepoError::MissingRequiredTable("employees"));
        }
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&mut self, input: &NewEmployee) -> RepoResult<Employee> {
        input.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let created = insert_employee(&tx, input)?;
        tx.commit()?;

        Ok(created)
    }

    fn create_employees(&mut self, inputs: &[NewEmployee]) -> RepoResult<Vec<Employee>> {
        for input in inputs {
            input.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(insert_employee(&tx, input)?);
        }
        tx.commit()?;

        Ok(created)
    }

    fn update_employee(&mut self, id: EmployeeId, input: &NewEmployee) -> RepoResult<Employee> {
        input.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !employee_exists(&tx, id)? {
            return Err(RepoError::NotFound(id));
        }
        ensure_unique(&tx, input, Some(id))?;

        tx.execute(
            &format!(
                "UPDATE employees
                 SET
                    employee_code = ?1,
                    first_name = ?2,
                    last_name = ?3,
                    email = ?4,
                    role = ?5,
                    status = ?6,
                    primary_skill = ?7,
                    secondary_skill = ?8,
                    updated_at = MAX(created_at, {NOW_MS_SQL})
                 WHERE id = ?9;"
            ),
            params![
                input.employee_code.as_str(),
                input.first_name.as_str(),
                input.last_name.as_str(),
                input.email.as_str(),
                input.role.as_str(),
                input.status.as_str(),
                input.primary_skill.as_str(),
                input.secondary_skill.as_deref(),
                id,
            ],
        )
        .map_err(|err| translate_write_error(err, input))?;

        let updated = select_by_id(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        tx.commit()?;

        Ok(updated)
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        select_by_id(self.conn, id)
    }

    fn find_by_employee_code(&self, employee_code: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE employee_code = ?1;"))?;
        let mut rows = stmt.query([employee_code])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_employee_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        let mut sql = format!("{EMPLOYEE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(role) = query.role.as_ref() {
            sql.push_str(" AND role = ?");
            bind_values.push(Value::Text(role.clone()));
        }

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }

        if let Some(skill) = query.skill.as_ref() {
            sql.push_str(" AND (primary_skill = ? OR secondary_skill = ?)");
            bind_values.push(Value::Text(skill.clone()));
            bind_values.push(Value::Text(skill.clone()));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn delete_employee(&mut self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        value_taken(self.conn, "email", email, None)
    }

    fn exists_by_employee_code(&self, employee_code: &str) -> RepoResult<bool> {
        value_taken(self.conn, "employee_code", employee_code, None)
    }

    fn count_employees(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative employee count `{count}`")))
    }
}

/// Checks uniqueness, inserts one row and reads it back inside `tx`.
fn insert_employee(tx: &Connection, input: &NewEmployee) -> RepoResult<Employee> {
    ensure_unique(tx, input, None)?;

    tx.execute(
        "INSERT INTO employees (
            employee_code,
            first_name,
            last_name,
            email,
            role,
            status,
            primary_skill,
            secondary_skill
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        params![
            input.employee_code.as_str(),
            input.first_name.as_str(),
            input.last_name.as_str(),
            input.email.as_str(),
            input.role.as_str(),
            input.status.as_str(),
            input.primary_skill.as_str(),
            input.secondary_skill.as_deref(),
        ],
    )
    .map_err(|err| translate_write_error(err, input))?;

    let id = tx.last_insert_rowid();
    select_by_id(tx, id)?.ok_or_else(|| {
        RepoError::InvalidData(format!("inserted employee {id} missing on read-back"))
    })
}

/// Rejects input whose email or employee code belongs to another record.
///
/// Email is checked first, so an input colliding on both reports email.
fn ensure_unique(
    conn: &Connection,
    input: &NewEmployee,
    excluding: Option<EmployeeId>,
) -> RepoResult<()> {
    if value_taken(conn, "email", &input.email, excluding)? {
        return Err(RepoError::Duplicate {
            field: UniqueField::Email,
            value: input.email.clone(),
        });
    }
    if value_taken(conn, "employee_code", &input.employee_code, excluding)? {
        return Err(RepoError::Duplicate {
            field: UniqueField::EmployeeCode,
            value: input.employee_code.clone(),
        });
    }
    Ok(())
}

// `column` is always a crate-internal literal, never caller input.
fn value_taken(
    conn: &Connection,
    column: &'static str,
    value: &str,
    excluding: Option<EmployeeId>,
) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(
                SELECT 1
                FROM employees
                WHERE {column} = ?1
                  AND (?2 IS NULL OR id != ?2)
            );"
        ),
        params![value, excluding],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn employee_exists(conn: &Connection, id: EmployeeId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn select_by_id(conn: &Connection, id: EmployeeId) -> RepoResult<Option<Employee>> {
    let mut stmt = conn.prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_employee_row(row)?)),
        None => Ok(None),
    }
}

fn translate_write_error(err: rusqlite::Error, input: &NewEmployee) -> RepoError {
    let err = DbError::Sqlite(err);
    match err.unique_violation_column() {
        Some("employees.email") => RepoError::Duplicate {
            field: UniqueField::Email,
            value: input.email.clone(),
        },
        Some("employees.employee_code") => RepoError::Duplicate {
            field: UniqueField::EmployeeCode,
            value: input.employee_code.clone(),
        },
        _ => RepoError::Db(err),
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;
    let status_text: String = row.get("status")?;
    let status = status_text.parse::<EmployeeStatus>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in employees.status for id {id}"
        ))
    })?;

    Ok(Employee {
        id,
        employee_code: row.get("employee_code")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        role: row.get("role")?,
        status,
        primary_skill: row.get("primary_skill")?,
        secondary_skill: row.get("secondary_skill")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(name.is_some())
}

#[cfg(test)]
mod tests {
    use super::{translate_write_error, RepoError, UniqueField};
    use crate::model::employee::{EmployeeStatus, NewEmployee};
    use rusqlite::Connection;

    fn input() -> NewEmployee {
        NewEmployee {
            employee_code: "EMP001".to_string(),
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            email: "juan@company.com".to_string(),
            role: "Engineer".to_string(),
            status: EmployeeStatus::Active,
            primary_skill: "Java".to_string(),
            secondary_skill: None,
        }
    }

    #[test]
    fn unique_index_failures_translate_to_duplicates() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE employees (id INTEGER PRIMARY KEY, email TEXT, employee_code TEXT);
             CREATE UNIQUE INDEX idx_email ON employees(email);
             CREATE UNIQUE INDEX idx_code ON employees(employee_code);
             INSERT INTO employees (email, employee_code) VALUES ('juan@company.com', 'EMP001');",
        )
        .unwrap();

        let err = conn
            .execute(
                "INSERT INTO employees (email, employee_code) VALUES ('juan@company.com', 'EMP999');",
                [],
            )
            .unwrap_err();
        assert!(matches!(
            translate_write_error(err, &input()),
            RepoError::Duplicate {
                field: UniqueField::Email,
                ..
            }
        ));

        let err = conn
            .execute(
                "INSERT INTO employees (email, employee_code) VALUES ('other@company.com', 'EMP001');",
                [],
            )
            .unwrap_err();
        assert!(matches!(
            translate_write_error(err, &input()),
            RepoError::Duplicate {
                field: UniqueField::EmployeeCode,
                ..
            }
        ));
    }

    #[test]
    fn other_write_errors_stay_db_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .execute("INSERT INTO missing_table VALUES (1);", [])
            .unwrap_err();
        assert!(matches!(
            translate_write_error(err, &input()),
            RepoError::Db(_)
        ));
    }
}
