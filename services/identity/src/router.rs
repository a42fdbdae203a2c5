use axum::{
    Router,
    routing::{get, post, put},
};

use hearth_core::health::{healthz, readyz};
use hearth_core::middleware::with_http_layers;

use crate::handlers::{
    role::{assign_role, create_role, get_roles, revoke_role},
    token::{create_token, introspect_token},
    user::{get_me, register_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(register_user))
        .route("/users/@me", get(get_me))
        .route(
            "/users/{user_id}/roles/{role_id}",
            put(assign_role).delete(revoke_role),
        )
        // Roles
        .route("/roles", get(get_roles).post(create_role))
        // Tokens
        .route("/token", post(create_token))
        .route("/token/introspect", post(introspect_token))
        .with_state(state);
    with_http_layers(router)
}
