//! Injected clocks and the business reference timezone.
//!
//! Components never read the host clock or the host timezone directly. They
//! receive a [`BusinessClock`] built from configuration, which pairs a
//! [`Clock`] with the IANA zone every business-facing time is expressed in.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default business timezone.
pub const DEFAULT_BUSINESS_TIMEZONE: &str = "America/Sao_Paulo";

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Timestamp;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Parse an IANA timezone name such as `America/Sao_Paulo`.
pub fn parse_timezone(name: &str) -> Result<Tz, CoreError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| CoreError::Validation(format!("Invalid timezone '{name}': {e}")))
}

/// A clock anchored to the business reference timezone.
#[derive(Debug, Clone)]
pub struct BusinessClock {
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl BusinessClock {
    pub fn new(clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self { clock, timezone }
    }

    /// System clock in the given zone.
    pub fn system(timezone: Tz) -> Self {
        Self::new(Arc::new(SystemClock), timezone)
    }

    /// Clock frozen at `now`, for tests and replays.
    pub fn fixed(now: Timestamp, timezone: Tz) -> Self {
        Self::new(Arc::new(FixedClock(now)), timezone)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The current absolute instant.
    pub fn now_utc(&self) -> Timestamp {
        self.clock.now()
    }

    /// The current instant expressed in the business zone.
    ///
    /// Comparisons against stored instants are zone-independent; the zone
    /// only changes how the instant is rendered and how wall-clock input is
    /// interpreted.
    pub fn now_local(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.timezone)
    }

    /// Interpret a wall-clock time in the business zone as an absolute instant.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant. Times
    /// that do not exist (DST spring-forward gap) are rejected.
    pub fn localize(&self, local: NaiveDateTime) -> Result<Timestamp, CoreError> {
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "{local} does not exist in timezone {}",
                    self.timezone
                ))
            })
    }
}
