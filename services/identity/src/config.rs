use hearth_outbox::config::RelayConfig;

/// Default access token lifetime in seconds.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 3600;

/// Identity service configuration loaded from environment variables.
#[derive(Debug)]
pub struct IdentityConfig {
    pub database_url: String,
    /// HMAC secret for signing access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Env var: `ACCESS_TOKEN_TTL_SECS`, default 3600.
    pub access_token_ttl_secs: u64,
    /// Env var: `IDENTITY_PORT`, default 3100.
    pub identity_port: u16,
    pub relay: RelayConfig,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            access_token_ttl_secs: std::env::var("ACCESS_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECS),
            identity_port: std::env::var("IDENTITY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
            relay: RelayConfig::from_env("identity"),
        }
    }
}
