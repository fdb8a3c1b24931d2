//! Appointment rows.

use agendly_core::appointment::AppointmentStatus;
use agendly_core::error::CoreError;
use agendly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub business_id: DbId,
    pub scheduled_at: Timestamp,
    pub status: String,
    /// Set by the completion sweep when it moves the row to `completed`.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    /// Parse the stored status name.
    pub fn lifecycle_status(&self) -> Result<AppointmentStatus, CoreError> {
        self.status.parse()
    }
}

/// DTO for inserting an appointment. New appointments start as `scheduled`
/// unless a status is given.
#[derive(Debug, Deserialize)]
pub struct CreateAppointment {
    pub business_id: DbId,
    pub scheduled_at: Timestamp,
    pub status: Option<AppointmentStatus>,
}
