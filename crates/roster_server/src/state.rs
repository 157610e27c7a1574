//! Shared request state.

use crate::error::{ApiError, ApiResult};
use roster_core::{EmployeeService, ServiceResult, SqliteEmployeeRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Handle to the single SQLite connection shared by all handlers.
///
/// Store calls are serialized by the mutex and run on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one employee use-case against the shared connection.
    pub async fn with_employees<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&mut EmployeeService<SqliteEmployeeRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut conn = db
                .lock()
                .map_err(|_| ApiError::Internal("database lock poisoned".to_string()))?;
            let repo = SqliteEmployeeRepository::try_new(&mut conn)?;
            let mut service = EmployeeService::new(repo);
            op(&mut service).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
    }
}
