//! Repository for the `onboarding_drafts` table.

use beautyboss_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::onboarding_draft::OnboardingDraftRow;

pub struct OnboardingDraftRepo;

impl OnboardingDraftRepo {
    pub async fn find(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Option<OnboardingDraftRow>, sqlx::Error> {
        sqlx::query_as::<_, OnboardingDraftRow>(
            "SELECT owner_id, draft, updated_at FROM onboarding_drafts WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(pool)
        .await
    }

    /// Lock the owner's draft row for the rest of `tx`, inserting `seed`
    /// first when the owner has none.
    pub async fn lock_inner(
        tx: &mut Transaction<'_, Postgres>,
        owner_id: DbId,
        seed: &serde_json::Value,
    ) -> Result<OnboardingDraftRow, sqlx::Error> {
        sqlx::query(
            "INSERT INTO onboarding_drafts (owner_id, draft) VALUES ($1, $2)
             ON CONFLICT (owner_id) DO NOTHING",
        )
        .bind(owner_id)
        .bind(seed)
        .execute(&mut **tx)
        .await?;

        sqlx::query_as::<_, OnboardingDraftRow>(
            "SELECT owner_id, draft, updated_at FROM onboarding_drafts
             WHERE owner_id = $1 FOR UPDATE",
        )
        .bind(owner_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn update_inner(
        tx: &mut Transaction<'_, Postgres>,
        owner_id: DbId,
        draft: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE onboarding_drafts SET draft = $2 WHERE owner_id = $1")
            .bind(owner_id)
            .bind(draft)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
