//! Repository for the `booking_links` table.

use beautyboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking_link::{BookingLink, UpsertBookingLink};

const COLUMNS: &str = "id, owner_id, slug, is_active, welcome_message, created_at, updated_at";

pub struct BookingLinkRepo;

impl BookingLinkRepo {
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Option<BookingLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM booking_links WHERE owner_id = $1");
        sqlx::query_as::<_, BookingLink>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BookingLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM booking_links WHERE slug = $1");
        sqlx::query_as::<_, BookingLink>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the owner's link. A slug held by another owner
    /// fails on `uq_booking_links_slug`.
    pub async fn upsert(
        pool: &PgPool,
        owner_id: DbId,
        input: &UpsertBookingLink,
    ) -> Result<BookingLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO booking_links (owner_id, slug, is_active, welcome_message)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_booking_links_owner
             DO UPDATE SET slug = EXCLUDED.slug,
                           is_active = EXCLUDED.is_active,
                           welcome_message = EXCLUDED.welcome_message
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookingLink>(&query)
            .bind(owner_id)
            .bind(&input.slug)
            .bind(input.is_active)
            .bind(&input.welcome_message)
            .fetch_one(pool)
            .await
    }
}
