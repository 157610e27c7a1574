//! Employee API handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use roster_core::{Employee, EmployeeId, EmployeePayload, EmployeeView};

use crate::error::ApiResult;
use crate::state::AppState;

type EmployeeList = Json<Vec<EmployeeView>>;

/// List all employees.
pub async fn list(State(state): State<AppState>) -> ApiResult<EmployeeList> {
    let employees = state.with_employees(|service| service.list()).await?;
    Ok(render_list(employees))
}

/// Get employee by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let Path(id) = id?;
    let employee = state
        .with_employees(move |service| service.get_by_id(id))
        .await?;
    Ok(Json(EmployeeView::from(employee)))
}

/// Create a new employee.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmployeeView>)> {
    let Json(payload) = payload?;
    let employee = state
        .with_employees(move |service| service.create(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(EmployeeView::from(employee))))
}

/// Replace an employee.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let employee = state
        .with_employees(move |service| service.update(id, payload))
        .await?;
    Ok(Json(EmployeeView::from(employee)))
}

/// Hard delete an employee.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state
        .with_employees(move |service| service.delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List employees with exactly this role.
pub async fn list_by_role(
    State(state): State<AppState>,
    role: Result<Path<String>, PathRejection>,
) -> ApiResult<EmployeeList> {
    let Path(role) = role?;
    let employees = state
        .with_employees(move |service| service.list_by_role(&role))
        .await?;
    Ok(render_list(employees))
}

/// List employees in one status; unknown tokens are rejected.
pub async fn list_by_status(
    State(state): State<AppState>,
    status: Result<Path<String>, PathRejection>,
) -> ApiResult<EmployeeList> {
    let Path(status) = status?;
    let employees = state
        .with_employees(move |service| service.list_by_status(&status))
        .await?;
    Ok(render_list(employees))
}

/// Get employee by employee code.
pub async fn get_by_employee_code(
    State(state): State<AppState>,
    employee_code: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let Path(employee_code) = employee_code?;
    let employee = state
        .with_employees(move |service| service.get_by_employee_code(&employee_code))
        .await?;
    Ok(Json(EmployeeView::from(employee)))
}

/// List employees having this primary or secondary skill.
pub async fn list_by_skill(
    State(state): State<AppState>,
    skill: Result<Path<String>, PathRejection>,
) -> ApiResult<EmployeeList> {
    let Path(skill) = skill?;
    let employees = state
        .with_employees(move |service| service.list_by_skill(&skill))
        .await?;
    Ok(render_list(employees))
}

fn render_list(employees: Vec<Employee>) -> EmployeeList {
    Json(employees.iter().map(EmployeeView::from).collect())
}
