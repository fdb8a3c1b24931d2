//! Repository for the `appointments` table.
//!
//! The only mutation this crate performs on existing appointments is the
//! completion sweep, expressed as a single predicate-based UPDATE so that a
//! row leaves `scheduled` at most once even under concurrent sweeps.

use agendly_core::appointment::AppointmentStatus;
use agendly_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::appointment::{Appointment, CreateAppointment};

/// Column list for `appointments` queries.
const COLUMNS: &str = "\
    id, business_id, scheduled_at, status, completed_at, \
    created_at, updated_at";

/// Provides query operations for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a new appointment, `scheduled` unless the DTO says otherwise.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let status = input.status.unwrap_or(AppointmentStatus::Scheduled);
        let query = format!(
            "INSERT INTO appointments (business_id, scheduled_at, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(input.business_id)
            .bind(input.scheduled_at)
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an appointment by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count appointments a sweep at `now` would transition.
    pub async fn count_overdue(pool: &PgPool, now: Timestamp) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM appointments WHERE scheduled_at < $1 AND status = $2",
        )
        .bind(now)
        .bind(AppointmentStatus::SWEEP_TRANSITION.0.as_str())
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Move every `scheduled` appointment whose time is before `now` to
    /// `completed`. Returns the number of rows transitioned.
    ///
    /// Postgres re-checks the `status` predicate after acquiring each row
    /// lock, so overlapping sweeps split the rows between them instead of
    /// counting any row twice.
    pub async fn complete_overdue(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let (from, to) = AppointmentStatus::SWEEP_TRANSITION;
        let result = sqlx::query(
            "UPDATE appointments \
             SET status = $2, completed_at = NOW() \
             WHERE scheduled_at < $1 AND status = $3",
        )
        .bind(now)
        .bind(to.as_str())
        .bind(from.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
