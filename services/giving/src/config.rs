use hearth_outbox::config::RelayConfig;

/// Giving service configuration loaded from environment variables.
#[derive(Debug)]
pub struct GivingConfig {
    pub database_url: String,
    /// Env var: `GIVING_PORT`, default 3104.
    pub giving_port: u16,
    pub relay: RelayConfig,
}

impl GivingConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            giving_port: std::env::var("GIVING_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3104),
            relay: RelayConfig::from_env("giving"),
        }
    }
}
