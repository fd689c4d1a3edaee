use beautyboss_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `onboarding_drafts` table: the wizard state as JSON.
#[derive(Debug, Clone, FromRow)]
pub struct OnboardingDraftRow {
    pub owner_id: DbId,
    pub draft: serde_json::Value,
    pub updated_at: Timestamp,
}
