//! HTTP server for the Roster employee service.
//!
//! Thin axum layer over `roster_core`: decode requests, delegate to
//! `EmployeeService`, render views or mapped errors.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use server::{build_router, prepare_database, run, ServerError};
pub use state::AppState;
