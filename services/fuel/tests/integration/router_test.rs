use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use hearth_fuel::router::build_router;
use hearth_fuel::state::AppState;
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
async fn should_reject_request_without_tenant_header() {
    let response = server().get("/vehicles").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "MISSING_TENANT");
}

#[tokio::test]
async fn should_reject_request_without_user_header() {
    let response = server()
        .get(&format!("/vehicles/{}/fill-ups", Uuid::new_v4()))
        .add_header(
            HeaderName::from_static("x-tenant-id"),
            HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_invalid_vehicle_year_before_touching_storage() {
    let identity = MockIdentity::random();
    let mut request = server().post("/vehicles").json(&json!({
        "make": "Benz",
        "model": "Patent-Motorwagen",
        "year": 1885,
    }));
    for (name, value) in identity.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }

    let response = request.await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "INVALID_INPUT");
}
