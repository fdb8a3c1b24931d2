use std::time::Duration;

use agendly_core::config::{
    env_lookup, parse_flag, parse_or, required, ConfigError, LifecycleConfig, Lookup,
};

/// Default seconds between sweeps.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub lifecycle: LifecycleConfig,
    /// Time between sweeps in loop mode.
    pub sweep_interval: Duration,
    /// Run a single sweep and exit, for cron-style schedulers.
    pub run_once: bool,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    /// | Env Var               | Default             |
    /// |-----------------------|---------------------|
    /// | `DATABASE_URL`        | required            |
    /// | `SWEEP_INTERVAL_SECS` | `300`               |
    /// | `SWEEP_ONCE`          | `false`             |
    ///
    /// Plus the [`LifecycleConfig`] variables.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let database_url = required(lookup, "DATABASE_URL")?;
        let lifecycle = LifecycleConfig::from_lookup(lookup)?;

        let interval_secs = parse_or(lookup, "SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "SWEEP_INTERVAL_SECS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        let run_once = parse_flag(lookup, "SWEEP_ONCE", false)?;

        Ok(Self {
            database_url,
            lifecycle,
            sweep_interval: Duration::from_secs(interval_secs),
            run_once,
        })
    }
}
