//! Repository for the `schedules` table.

use beautyboss_core::schedule::WeeklySchedule;
use beautyboss_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::models::schedule::ScheduleEntry;

const COLUMNS: &str = "id, owner_id, weekday, enabled, start_time, end_time";

pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Rows ordered Monday first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<ScheduleEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules WHERE owner_id = $1
             ORDER BY array_position(
                ARRAY['monday','tuesday','wednesday','thursday','friday','saturday','sunday'],
                weekday)"
        );
        sqlx::query_as::<_, ScheduleEntry>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the owner's weekly rows (delete then insert, inside `tx`).
    /// Exactly one row per weekday remains (`uq_schedules_owner_weekday`).
    pub async fn replace_for_owner_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        owner_id: DbId,
        schedule: &WeeklySchedule,
    ) -> Result<Vec<ScheduleEntry>, sqlx::Error> {
        sqlx::query("DELETE FROM schedules WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut **tx)
            .await?;

        let query = format!(
            "INSERT INTO schedules (owner_id, weekday, enabled, start_time, end_time)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(7);
        for (day, hours) in schedule.entries() {
            let row = sqlx::query_as::<_, ScheduleEntry>(&query)
                .bind(owner_id)
                .bind(day.as_str())
                .bind(hours.enabled)
                .bind(&hours.start)
                .bind(&hours.end)
                .fetch_one(&mut **tx)
                .await?;
            rows.push(row);
        }
        Ok(rows)
    }
}
