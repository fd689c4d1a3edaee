//! Repository for the `clients` table.

use beautyboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, ClientQuery, CreateClient};

const COLUMNS: &str = "id, owner_id, professional_id, name, email, phone, created_at";

pub struct ClientRepo;

impl ClientRepo {
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (owner_id, professional_id, name, email, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(owner_id)
            .bind(input.professional_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE owner_id = $1 AND id = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List clients alphabetically, optionally filtered by a lower-cased
    /// term matched against name, email and phone.
    pub async fn list(
        pool: &PgPool,
        owner_id: DbId,
        params: &ClientQuery,
    ) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE owner_id = $1
               AND ($2::TEXT IS NULL
                    OR LOWER(name) LIKE '%' || $2 || '%'
                    OR LOWER(email) LIKE '%' || $2 || '%'
                    OR phone LIKE '%' || $2 || '%')
             ORDER BY name, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(owner_id)
            .bind(&params.search)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
