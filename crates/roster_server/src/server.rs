//! Process bootstrap: database preparation, router assembly and serving.

use axum::{middleware, Router};
use log::{info, warn};
use roster_core::db::{open_db, open_db_in_memory, DbError};
use roster_core::{seed_sample_employees, EmployeeService, EmployeeServiceError, SqliteEmployeeRepository};
use rusqlite::Connection;
use tokio::net::TcpListener;

use crate::api;
use crate::config::Config;
use crate::middleware::log_requests;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("database bootstrap failed: {0}")]
    Db(#[from] DbError),

    #[error("sample data seeding failed: {0}")]
    Seed(#[from] EmployeeServiceError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the application router with state and request logging.
pub fn build_router(state: AppState) -> Router {
    api::router()
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Opens (and migrates) the configured database, seeding it when enabled.
pub fn prepare_database(config: &Config) -> Result<Connection, ServerError> {
    let mut conn = if config.uses_in_memory_db() {
        warn!("event=db_config module=server status=ok mode=memory note=data_not_persisted");
        open_db_in_memory()?
    } else {
        open_db(&config.db_path)?
    };

    if config.seed_sample_data {
        let repo = SqliteEmployeeRepository::try_new(&mut conn).map_err(EmployeeServiceError::from)?;
        let mut service = EmployeeService::new(repo);
        seed_sample_employees(&mut service)?;
    }

    Ok(conn)
}

/// Runs the HTTP server until Ctrl-C.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let conn = prepare_database(&config)?;
    let app = build_router(AppState::new(conn));

    let listener = TcpListener::bind(&config.http_addr).await?;
    info!(
        "event=server_start module=server status=ok addr={} version={}",
        listener.local_addr()?,
        roster_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=server status=error error={err}");
    }
}
