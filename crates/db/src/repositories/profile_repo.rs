//! Repository for the `profiles` table.

use beautyboss_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres};

use crate::models::profile::{BusinessProfile, UpdateBusinessDetails};

const COLUMNS: &str = "id, owner_id, business_type, plan_id, business_name, address, phone, \
                        bio, onboarded_at, trial_ends_at, created_at, updated_at";

/// Profiles are created lazily: every write is an upsert keyed on
/// `uq_profiles_owner`.
pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Option<BusinessProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE owner_id = $1");
        sqlx::query_as::<_, BusinessProfile>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_bio(
        pool: &PgPool,
        owner_id: DbId,
        bio: Option<&str>,
    ) -> Result<BusinessProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (owner_id, bio) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_profiles_owner
             DO UPDATE SET bio = EXCLUDED.bio
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BusinessProfile>(&query)
            .bind(owner_id)
            .bind(bio)
            .fetch_one(pool)
            .await
    }

    pub async fn update_business_details(
        pool: &PgPool,
        owner_id: DbId,
        input: &UpdateBusinessDetails,
    ) -> Result<BusinessProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (owner_id, business_name, address, phone) VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_profiles_owner
             DO UPDATE SET business_name = EXCLUDED.business_name,
                           address = EXCLUDED.address,
                           phone = EXCLUDED.phone
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BusinessProfile>(&query)
            .bind(owner_id)
            .bind(&input.business_name)
            .bind(&input.address)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Record the onboarding choices inside the setup transaction.
    ///
    /// `onboarded_at` and `trial_ends_at` keep their first value so saving
    /// again does not extend the trial.
    pub async fn record_onboarding_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        owner_id: DbId,
        business_type: Option<&str>,
        plan_id: Option<&str>,
        now: Timestamp,
        trial_ends_at: Timestamp,
    ) -> Result<BusinessProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (owner_id, business_type, plan_id, onboarded_at, trial_ends_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_profiles_owner
             DO UPDATE SET business_type = EXCLUDED.business_type,
                           plan_id = EXCLUDED.plan_id,
                           onboarded_at = COALESCE(profiles.onboarded_at, EXCLUDED.onboarded_at),
                           trial_ends_at = COALESCE(profiles.trial_ends_at, EXCLUDED.trial_ends_at)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BusinessProfile>(&query)
            .bind(owner_id)
            .bind(business_type)
            .bind(plan_id)
            .bind(now)
            .bind(trial_ends_at)
            .fetch_one(&mut **tx)
            .await
    }
}
