use sea_orm::Database;
use tracing::info;

use hearth_core::tracing::init_tracing;
use hearth_fuel::config::FuelConfig;
use hearth_fuel::router::build_router;
use hearth_fuel::state::AppState;
use hearth_outbox::config::spawn_relay;

#[tokio::main]
async fn main() {
    init_tracing("fuel");

    let config = FuelConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    spawn_relay(db.clone(), &config.relay).expect("failed to start outbox relay");

    let router = build_router(AppState { db });
    let addr = format!("0.0.0.0:{}", config.fuel_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("fuel service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
