use axum::{
    Router,
    routing::{get, put},
};

use hearth_core::health::{healthz, readyz};
use hearth_core::middleware::with_http_layers;

use crate::handlers::{
    course::{create_course, delete_course, get_course, get_courses, update_course},
    round::{
        create_round, delete_hole_score, delete_round, get_rounds, get_scorecard,
        record_hole_score, update_round,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Courses (tenant-wide)
        .route("/courses", get(get_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        // Rounds (per golfer)
        .route("/rounds", get(get_rounds).post(create_round))
        .route(
            "/rounds/{id}",
            get(get_scorecard).put(update_round).delete(delete_round),
        )
        .route(
            "/rounds/{id}/holes/{hole_number}",
            put(record_hole_score).delete(delete_hole_score),
        )
        .with_state(state);
    with_http_layers(router)
}
