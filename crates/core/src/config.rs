//! Environment-driven configuration shared by the API server and the worker.
//!
//! Parsing goes through a lookup function rather than `std::env` directly so
//! tests can feed a fixed map of variables.

use std::fmt::Display;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::access::{AccessPolicy, MAX_PAST_DUE_GRACE_DAYS};
use crate::clock::{parse_timezone, BusinessClock, DEFAULT_BUSINESS_TIMEZONE};

/// Configuration problems detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Variable lookup used by every `from_lookup` constructor.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a variable from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// A variable that must be present and non-empty.
pub fn required(lookup: Lookup<'_>, name: &'static str) -> Result<String, ConfigError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Parse a variable, falling back to `default` when it is unset.
pub fn parse_or<T>(lookup: Lookup<'_>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
pub fn parse_flag(lookup: Lookup<'_>, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: "expected true or false".into(),
        }),
    }
}

/// Settings both lifecycle components are constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Reference zone for "now" and for wall-clock input.
    pub timezone: Tz,
    /// Tunables for the access rule table.
    pub access: AccessPolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Sao_Paulo,
            access: AccessPolicy::default(),
        }
    }
}

impl LifecycleConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    /// Load from an arbitrary variable source.
    ///
    /// | Env Var               | Default             |
    /// |-----------------------|---------------------|
    /// | `BUSINESS_TIMEZONE`   | `America/Sao_Paulo` |
    /// | `PAST_DUE_GRACE_DAYS` | `0` (max 3650)      |
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let tz_name =
            lookup("BUSINESS_TIMEZONE").unwrap_or_else(|| DEFAULT_BUSINESS_TIMEZONE.to_string());
        let timezone = parse_timezone(&tz_name).map_err(|e| ConfigError::Invalid {
            name: "BUSINESS_TIMEZONE",
            value: tz_name.clone(),
            reason: e.to_string(),
        })?;

        let past_due_grace_days = parse_or(lookup, "PAST_DUE_GRACE_DAYS", 0u32)?;
        if past_due_grace_days > MAX_PAST_DUE_GRACE_DAYS {
            return Err(ConfigError::Invalid {
                name: "PAST_DUE_GRACE_DAYS",
                value: past_due_grace_days.to_string(),
                reason: format!("must be at most {MAX_PAST_DUE_GRACE_DAYS}"),
            });
        }

        Ok(Self {
            timezone,
            access: AccessPolicy {
                past_due_grace_days,
            },
        })
    }

    /// A system clock in the configured zone.
    pub fn business_clock(&self) -> BusinessClock {
        BusinessClock::system(self.timezone)
    }
}
