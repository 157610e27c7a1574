use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use roster_core::db::open_db_in_memory;
use roster_server::{build_router, prepare_database, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_router(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn employee(code: &str, email: &str, status: &str) -> Value {
    json!({
        "employeeId": code,
        "firstName": "A",
        "lastName": "B",
        "email": email,
        "role": "Engineer",
        "status": status,
        "primarySkill": "X"
    })
}

#[tokio::test]
async fn end_to_end_lifecycle() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/employees",
        Some(employee("EMP010", "a@b.com", "ACTIVE")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["employeeId"], "EMP010");
    assert_eq!(created["status"], "ACTIVE");
    assert!(created["secondarySkill"].is_null());
    assert!(created["dateCreated"].is_string());

    let (status, fetched) = send(&app, Method::GET, &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let mut replacement = employee("EMP010", "a@b.com", "ACTIVE");
    replacement["role"] = json!("Senior Engineer");
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/employees/{id}"),
        Some(replacement),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["role"], "Senior Engineer");
    assert_eq!(updated["dateCreated"], created["dateCreated"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send(&app, Method::GET, &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn duplicates_and_validation_are_bad_requests() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/employees",
        Some(employee("EMP1", "one@b.com", "ACTIVE")),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(employee("EMP2", "one@b.com", "ACTIVE")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_email");
    assert_eq!(body["message"], "Email already exists: one@b.com");

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(employee("EMP1", "two@b.com", "ACTIVE")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_employee_code");

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(employee("EMP3", "three@b.com", "RETIRED")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_status");

    let mut missing = employee("EMP3", "three@b.com", "ACTIVE");
    missing.as_object_mut().unwrap().remove("firstName");
    let (status, body) = send(&app, Method::POST, "/employees", Some(missing)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "firstName is required");

    let (status, list) = send(&app, Method::GET, "/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_json_and_bad_ids_are_bad_requests() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/employees")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/employees/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn undecodable_path_segments_use_json_error_body() {
    let app = app();

    for uri in [
        "/employees/role/%FF",
        "/employees/status/%FF",
        "/employees/code/%FF",
        "/employees/skill/%FF",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "bad_request", "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn update_rejects_values_owned_by_another_employee() {
    let app = app();
    let (_, first) = send(
        &app,
        Method::POST,
        "/employees",
        Some(employee("EMP1", "one@b.com", "ACTIVE")),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/employees",
        Some(employee("EMP2", "two@b.com", "ACTIVE")),
    )
    .await;
    let uri = format!("/employees/{}", first["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(employee("EMP1", "two@b.com", "ACTIVE")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_email");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(employee("EMP2", "one@b.com", "ACTIVE")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_employee_code");
    assert_eq!(body["message"], "Employee ID already exists: EMP2");

    let (status, unchanged) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, first);
}

#[tokio::test]
async fn update_and_delete_missing_ids_are_not_found() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/employees/77",
        Some(employee("EMP1", "one@b.com", "ACTIVE")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/employees/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/employees", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn filtered_listings() {
    let app = app();
    for (code, email, status) in [
        ("EMP1", "one@b.com", "ACTIVE"),
        ("EMP2", "two@b.com", "BENCH"),
        ("EMP3", "three@b.com", "ACTIVE"),
    ] {
        let (created, _) = send(
            &app,
            Method::POST,
            "/employees",
            Some(employee(code, email, status)),
        )
        .await;
        assert_eq!(created, StatusCode::CREATED);
    }

    let (status, active) = send(&app, Method::GET, "/employees/status/ACTIVE", None).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["employeeId"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["EMP1", "EMP3"]);

    let (status, body) = send(&app, Method::GET, "/employees/status/BOGUS", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_status");

    let (status, engineers) = send(&app, Method::GET, "/employees/role/Engineer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(engineers.as_array().unwrap().len(), 3);

    let (status, nobody) = send(&app, Method::GET, "/employees/role/Senior%20Engineer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(nobody.as_array().unwrap().is_empty());

    let (status, skilled) = send(&app, Method::GET, "/employees/skill/X", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(skilled.as_array().unwrap().len(), 3);

    let (status, found) = send(&app, Method::GET, "/employees/code/EMP2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["status"], "BENCH");

    let (status, _) = send(&app, Method::GET, "/employees/code/EMP9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_version() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], roster_core::core_version());
}

#[tokio::test]
async fn prepared_database_can_be_seeded() {
    let config = Config {
        db_path: ":memory:".to_string(),
        seed_sample_data: true,
        ..Config::default()
    };
    let app = build_router(AppState::new(prepare_database(&config).unwrap()));

    let (status, list) = send(&app, Method::GET, "/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 5);

    let (_, resigned) = send(&app, Method::GET, "/employees/status/RESIGNED", None).await;
    assert_eq!(resigned[0]["employeeId"], "EMP005");
}
