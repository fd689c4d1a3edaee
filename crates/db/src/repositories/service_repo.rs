//! Repository for the `services` table.

use beautyboss_core::onboarding::ServiceDraft;
use beautyboss_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::models::service::Service;

const COLUMNS: &str =
    "id, owner_id, professional_id, name, duration_minutes, price, sort_order, created_at";

pub struct ServiceRepo;

impl ServiceRepo {
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Service>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM services WHERE owner_id = $1 ORDER BY sort_order, id");
        sqlx::query_as::<_, Service>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Replace the owner's services (delete then insert, inside `tx`).
    pub async fn replace_for_owner_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        owner_id: DbId,
        professional_id: Option<DbId>,
        services: &[ServiceDraft],
    ) -> Result<Vec<Service>, sqlx::Error> {
        sqlx::query("DELETE FROM services WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut **tx)
            .await?;

        let query = format!(
            "INSERT INTO services (owner_id, professional_id, name, duration_minutes, price, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(services.len());
        for (i, service) in services.iter().enumerate() {
            let row = sqlx::query_as::<_, Service>(&query)
                .bind(owner_id)
                .bind(professional_id)
                .bind(&service.name)
                .bind(service.duration)
                .bind(service.price)
                .bind(i as i32)
                .fetch_one(&mut **tx)
                .await?;
            rows.push(row);
        }
        Ok(rows)
    }
}
