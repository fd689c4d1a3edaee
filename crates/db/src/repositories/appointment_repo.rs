//! Repository for the `appointments` table.

use beautyboss_core::appointment::AppointmentStatus;
use beautyboss_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::appointment::{Appointment, AppointmentDetail, CreateAppointment};

const COLUMNS: &str = "id, owner_id, client_id, professional_id, service_id, starts_at, \
                        status, created_at, updated_at";

/// Joined columns for [`AppointmentDetail`].
const DETAIL_SELECT: &str = "SELECT a.id, a.client_id, c.name AS client_name, \
        a.professional_id, p.name AS professional_name, \
        a.service_id, s.name AS service_name, s.price, \
        a.starts_at, a.status \
     FROM appointments a \
     JOIN clients c ON c.id = a.client_id \
     LEFT JOIN professionals p ON p.id = a.professional_id \
     LEFT JOIN services s ON s.id = a.service_id";

pub struct AppointmentRepo;

impl AppointmentRepo {
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments (owner_id, client_id, professional_id, service_id, starts_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(owner_id)
            .bind(input.client_id)
            .bind(input.professional_id)
            .bind(input.service_id)
            .bind(input.starts_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE owner_id = $1 AND id = $2");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Returns `None` if the appointment does not belong to `owner_id`.
    pub async fn update_status(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET status = $3
             WHERE owner_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(owner_id)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Appointments starting in `[from, to)`, earliest first. An open `to`
    /// lists everything from `from` on.
    pub async fn list_details_between(
        pool: &PgPool,
        owner_id: DbId,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<AppointmentDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE a.owner_id = $1
               AND a.starts_at >= $2
               AND ($3::TIMESTAMPTZ IS NULL OR a.starts_at < $3)
             ORDER BY a.starts_at, a.id"
        );
        sqlx::query_as::<_, AppointmentDetail>(&query)
            .bind(owner_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
