use hearth_outbox::config::RelayConfig;

/// Hydration service configuration loaded from environment variables.
#[derive(Debug)]
pub struct HydrationConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3101). Env var: `HYDRATION_PORT`.
    pub hydration_port: u16,
    pub relay: RelayConfig,
}

impl HydrationConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            hydration_port: std::env::var("HYDRATION_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3101),
            relay: RelayConfig::from_env("hydration"),
        }
    }
}
