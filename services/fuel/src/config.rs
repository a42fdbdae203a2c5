use hearth_outbox::config::RelayConfig;

/// Fuel service configuration loaded from environment variables.
#[derive(Debug)]
pub struct FuelConfig {
    pub database_url: String,
    /// Env var: `FUEL_PORT`, default 3102.
    pub fuel_port: u16,
    pub relay: RelayConfig,
}

impl FuelConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            fuel_port: std::env::var("FUEL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3102),
            relay: RelayConfig::from_env("fuel"),
        }
    }
}
