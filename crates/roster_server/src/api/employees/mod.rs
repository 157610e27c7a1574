//! Employee API module.

mod handler;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Employee router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(handler::list).post(handler::create))
        .route(
            "/employees/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/employees/role/{role}", get(handler::list_by_role))
        .route("/employees/status/{status}", get(handler::list_by_status))
        .route(
            "/employees/code/{employee_id}",
            get(handler::get_by_employee_code),
        )
        .route("/employees/skill/{skill}", get(handler::list_by_skill))
}
