use sea_orm::Database;
use tracing::info;

use hearth_core::tracing::init_tracing;
use hearth_identity::config::IdentityConfig;
use hearth_identity::infra::password::Argon2PasswordHasher;
use hearth_identity::router::build_router;
use hearth_identity::state::AppState;
use hearth_outbox::config::spawn_relay;

#[tokio::main]
async fn main() {
    init_tracing("identity");

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    spawn_relay(db.clone(), &config.relay).expect("failed to start outbox relay");

    let router = build_router(AppState {
        db,
        hasher: Argon2PasswordHasher::default(),
        jwt_secret: config.jwt_secret,
        token_ttl_secs: config.access_token_ttl_secs,
    });
    let addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
