//! Transactional write of a completed onboarding.

use beautyboss_core::onboarding::OnboardingSubmission;
use beautyboss_core::plans::TRIAL_DAYS;
use beautyboss_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::profile::BusinessProfile;
use crate::repositories::{ProfessionalRepo, ProfileRepo, ScheduleRepo, ServiceRepo};
use crate::store::SetupCounts;

pub struct SetupRepo;

impl SetupRepo {
    /// Replace staff, services and weekly schedule, and record business
    /// type and plan on the profile, all in one transaction.
    ///
    /// Services are attached to the owner's own staff entry.
    pub async fn replace(
        pool: &PgPool,
        owner_id: DbId,
        submission: &OnboardingSubmission,
        now: Timestamp,
    ) -> Result<(BusinessProfile, SetupCounts), sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Services first: they reference professionals.
        sqlx::query("DELETE FROM services WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
        let professionals =
            ProfessionalRepo::replace_for_owner_inner(&mut tx, owner_id, &submission.professionals)
                .await?;
        let owner_professional = professionals.first().map(|p| p.id);
        let services = ServiceRepo::replace_for_owner_inner(
            &mut tx,
            owner_id,
            owner_professional,
            &submission.services,
        )
        .await?;
        let schedule =
            ScheduleRepo::replace_for_owner_inner(&mut tx, owner_id, &submission.schedule).await?;

        let profile = ProfileRepo::record_onboarding_inner(
            &mut tx,
            owner_id,
            submission.business_type.map(|t| t.as_str()),
            submission.plan_id.as_deref(),
            now,
            now + chrono::Duration::days(TRIAL_DAYS),
        )
        .await?;

        tx.commit().await?;

        Ok((
            profile,
            SetupCounts {
                professionals: professionals.len(),
                services: services.len(),
                schedule_days: schedule.len(),
            },
        ))
    }
}
