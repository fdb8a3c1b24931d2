use agendly_core::config::{env_lookup, parse_or, required, ConfigError, LifecycleConfig, Lookup};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Postgres connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Business timezone and access rule tunables.
    pub lifecycle: LifecycleConfig,
    /// Interval for the in-process completion sweep loop. `0` disables it,
    /// leaving sweeps to an external scheduler hitting the HTTP endpoint.
    pub sweep_interval_secs: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    /// Load configuration with defaults.
    ///
    /// | Env Var                | Default  |
    /// |------------------------|----------|
    /// | `HOST`                 | `0.0.0.0`|
    /// | `PORT`                 | `3000`   |
    /// | `CORS_ORIGINS`         | `*`      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`     |
    /// | `SWEEP_INTERVAL_SECS`  | `0`      |
    ///
    /// `DATABASE_URL` is required. Plus the [`JwtConfig`] and
    /// [`LifecycleConfig`] variables.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(lookup, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let sweep_interval_secs = parse_or(lookup, "SWEEP_INTERVAL_SECS", 0u64)?;
        let jwt = JwtConfig::from_lookup(lookup)?;
        let database_url = required(lookup, "DATABASE_URL")?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            jwt,
            lifecycle: LifecycleConfig::from_lookup(lookup)?,
            sweep_interval_secs,
        })
    }

    /// Whether any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}
