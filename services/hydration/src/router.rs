use axum::{
    Router,
    routing::{get, post},
};

use hearth_core::health::{healthz, readyz};
use hearth_core::middleware::with_http_layers;

use crate::handlers::{
    goal::{create_goal, delete_goal, get_goal, get_goals, update_goal},
    intake::{create_intake, delete_intake, get_intake, get_intakes, update_intake},
    reminder::{
        create_reminder, delete_reminder, get_reminder, get_reminders, toggle_reminder,
        update_reminder,
    },
    summary::get_summary,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Intakes
        .route("/intakes", get(get_intakes).post(create_intake))
        .route(
            "/intakes/{id}",
            get(get_intake).put(update_intake).delete(delete_intake),
        )
        // Goals
        .route("/goals", get(get_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        // Reminders
        .route("/reminders", get(get_reminders).post(create_reminder))
        .route(
            "/reminders/{id}",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
        .route("/reminders/{id}/toggle", post(toggle_reminder))
        // Summary
        .route("/summary", get(get_summary))
        .with_state(state);
    with_http_layers(router)
}
