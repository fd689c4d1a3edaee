//! Repository for the `professionals` table.

use beautyboss_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::models::professional::Professional;

const COLUMNS: &str = "id, owner_id, user_id, name, sort_order, created_at";

pub struct ProfessionalRepo;

impl ProfessionalRepo {
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Professional>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM professionals WHERE owner_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Professional>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the owner's staff list (delete then insert, inside `tx`).
    ///
    /// The first name is linked to the owner's user account.
    pub async fn replace_for_owner_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        owner_id: DbId,
        names: &[String],
    ) -> Result<Vec<Professional>, sqlx::Error> {
        sqlx::query("DELETE FROM professionals WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut **tx)
            .await?;

        let query = format!(
            "INSERT INTO professionals (owner_id, user_id, name, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let user_id = (i == 0).then_some(owner_id);
            let row = sqlx::query_as::<_, Professional>(&query)
                .bind(owner_id)
                .bind(user_id)
                .bind(name)
                .bind(i as i32)
                .fetch_one(&mut **tx)
                .await?;
            rows.push(row);
        }
        Ok(rows)
    }
}
