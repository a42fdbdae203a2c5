use hearth_outbox::config::RelayConfig;

/// Golf service configuration loaded from environment variables.
#[derive(Debug)]
pub struct GolfConfig {
    pub database_url: String,
    /// Env var: `GOLF_PORT`, default 3103.
    pub golf_port: u16,
    pub relay: RelayConfig,
}

impl GolfConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            golf_port: std::env::var("GOLF_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3103),
            relay: RelayConfig::from_env("golf"),
        }
    }
}
