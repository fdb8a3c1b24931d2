//! Appointment lifecycle states and the transition table.
//!
//! The `appointments.status` column stores the snake_case names below; a
//! CHECK constraint in the migrations keeps the two in sync.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a single appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Every state, in declaration order.
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// Database / wire name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    /// The transition the completion sweep applies to overdue rows.
    pub const SWEEP_TRANSITION: (AppointmentStatus, AppointmentStatus) =
        (AppointmentStatus::Scheduled, AppointmentStatus::Completed);

    /// Terminal states never transition again, automatically or otherwise.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }

    /// Only `scheduled` moves, and only into a terminal state.
    pub const fn can_transition(self, to: AppointmentStatus) -> bool {
        !self.is_terminal() && to.is_terminal()
    }
}

const _: () = assert!(AppointmentStatus::SWEEP_TRANSITION
    .0
    .can_transition(AppointmentStatus::SWEEP_TRANSITION.1));

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown appointment status '{s}'")))
    }
}
