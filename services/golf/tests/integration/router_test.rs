use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use hearth_golf::router::build_router;
use hearth_golf::state::AppState;
use hearth_testing::auth::MockIdentity;

fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    server().get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_reject_course_request_without_tenant() {
    let response = server().get("/courses").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "MISSING_TENANT");
}

#[tokio::test]
async fn should_validate_course_with_tenant_header_only() {
    let response = server()
        .post("/courses")
        .add_header(
            HeaderName::from_static("x-tenant-id"),
            HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
        )
        .json(&json!({
            "name": "Pitch and Putt",
            "number_of_holes": 12,
            "total_par": 36,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_INPUT");
}

#[tokio::test]
async fn should_require_user_for_rounds() {
    let response = server()
        .get("/rounds")
        .add_header(
            HeaderName::from_static("x-tenant-id"),
            HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_bad_hole_par_before_touching_storage() {
    let identity = MockIdentity::random();
    let mut request = server()
        .put(&format!("/rounds/{}/holes/1", Uuid::new_v4()))
        .json(&json!({ "par": 9, "score": 4 }));
    for (name, value) in identity.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }

    let response = request.await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_INPUT");
}
