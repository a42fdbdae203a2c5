use axum::{
    Router,
    routing::{get, post},
};

use hearth_core::health::{healthz, readyz};
use hearth_core::middleware::with_http_layers;

use crate::handlers::{
    fill_up::{delete_fill_up, get_fill_up, get_fill_ups, record_fill_up},
    report::{delete_report, generate_report, get_report, get_reports},
    vehicle::{
        create_vehicle, deactivate_vehicle, delete_vehicle, get_vehicle, get_vehicles,
        reactivate_vehicle, update_vehicle,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Vehicles
        .route("/vehicles", get(get_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/vehicles/{id}/deactivate", post(deactivate_vehicle))
        .route("/vehicles/{id}/reactivate", post(reactivate_vehicle))
        // Fill-ups
        .route(
            "/vehicles/{id}/fill-ups",
            get(get_fill_ups).post(record_fill_up),
        )
        .route("/fill-ups/{id}", get(get_fill_up).delete(delete_fill_up))
        // Efficiency reports
        .route(
            "/vehicles/{id}/reports",
            get(get_reports).post(generate_report),
        )
        .route("/reports/{id}", get(get_report).delete(delete_report))
        .with_state(state);
    with_http_layers(router)
}
