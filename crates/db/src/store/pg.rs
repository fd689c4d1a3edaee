//! Postgres-backed [`Store`](super::Store), delegating to the repositories.

use async_trait::async_trait;
use beautyboss_core::appointment::AppointmentStatus;
use beautyboss_core::onboarding::{OnboardingDraft, OnboardingSubmission};
use beautyboss_core::types::{DbId, Timestamp};

use super::{
    AppointmentStore, BookingLinkStore, ClientStore, DraftEdit, HealthStore, SessionStore,
    SetupCounts, SetupStore, UserStore,
};
use crate::error::StoreError;
use crate::models::appointment::{Appointment, AppointmentDetail, CreateAppointment};
use crate::models::booking_link::{BookingLink, UpsertBookingLink};
use crate::models::client::{Client, ClientQuery, CreateClient};
use crate::models::professional::Professional;
use crate::models::profile::{BusinessProfile, UpdateBusinessDetails};
use crate::models::schedule::ScheduleEntry;
use crate::models::service::Service;
use crate::models::session::{CreateSession, UserSession};
use crate::models::user::{CreateUser, UpdateAccount, User};
use crate::repositories::{
    AppointmentRepo, BookingLinkRepo, ClientRepo, OnboardingDraftRepo, ProfessionalRepo,
    ProfileRepo, ScheduleRepo, ServiceRepo, SessionRepo, SetupRepo, UserRepo,
};
use crate::DbPool;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl HealthStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn increment_failed_login(&self, id: DbId) -> Result<(), StoreError> {
        Ok(UserRepo::increment_failed_login(&self.pool, id).await?)
    }

    async fn lock_account(&self, id: DbId, until: Timestamp) -> Result<(), StoreError> {
        Ok(UserRepo::lock_account(&self.pool, id, until).await?)
    }

    async fn record_successful_login(&self, id: DbId) -> Result<(), StoreError> {
        Ok(UserRepo::record_successful_login(&self.pool, id).await?)
    }

    async fn update_account(
        &self,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<User>, StoreError> {
        let Some(user) = UserRepo::update_account(&self.pool, id, input).await? else {
            return Ok(None);
        };
        ProfileRepo::update_bio(&self.pool, id, input.bio.as_deref()).await?;
        Ok(Some(user))
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserSession>, StoreError> {
        Ok(SessionRepo::find_by_refresh_token_hash(&self.pool, token_hash).await?)
    }

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }

    async fn revoke_all_sessions(&self, user_id: DbId) -> Result<u64, StoreError> {
        Ok(SessionRepo::revoke_all_for_user(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl SetupStore for PgStore {
    async fn find_profile(&self, owner_id: DbId) -> Result<Option<BusinessProfile>, StoreError> {
        Ok(ProfileRepo::find_by_owner(&self.pool, owner_id).await?)
    }

    async fn update_business_details(
        &self,
        owner_id: DbId,
        input: &UpdateBusinessDetails,
    ) -> Result<BusinessProfile, StoreError> {
        Ok(ProfileRepo::update_business_details(&self.pool, owner_id, input).await?)
    }

    async fn load_onboarding_draft(
        &self,
        owner_id: DbId,
    ) -> Result<Option<OnboardingDraft>, StoreError> {
        match OnboardingDraftRepo::find(&self.pool, owner_id).await? {
            Some(row) => Ok(Some(serde_json::from_value(row.draft)?)),
            None => Ok(None),
        }
    }

    async fn update_onboarding_draft(
        &self,
        owner_id: DbId,
        seed: OnboardingDraft,
        edit: DraftEdit<'_>,
    ) -> Result<OnboardingDraft, StoreError> {
        let seed = serde_json::to_value(&seed)?;
        let mut tx = self.pool.begin().await?;
        let row = OnboardingDraftRepo::lock_inner(&mut tx, owner_id, &seed).await?;
        let mut draft: OnboardingDraft = serde_json::from_value(row.draft)?;
        // Dropping `tx` on error rolls back the seed insert.
        edit(&mut draft)?;
        OnboardingDraftRepo::update_inner(&mut tx, owner_id, &serde_json::to_value(&draft)?)
            .await?;
        tx.commit().await?;
        Ok(draft)
    }

    async fn replace_business_setup(
        &self,
        owner_id: DbId,
        submission: &OnboardingSubmission,
        now: Timestamp,
    ) -> Result<SetupCounts, StoreError> {
        let (_, counts) = SetupRepo::replace(&self.pool, owner_id, submission, now).await?;
        Ok(counts)
    }

    async fn list_professionals(&self, owner_id: DbId) -> Result<Vec<Professional>, StoreError> {
        Ok(ProfessionalRepo::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn list_services(&self, owner_id: DbId) -> Result<Vec<Service>, StoreError> {
        Ok(ServiceRepo::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn count_services(&self, owner_id: DbId) -> Result<i64, StoreError> {
        Ok(ServiceRepo::count_by_owner(&self.pool, owner_id).await?)
    }

    async fn list_schedule(&self, owner_id: DbId) -> Result<Vec<ScheduleEntry>, StoreError> {
        Ok(ScheduleRepo::list_by_owner(&self.pool, owner_id).await?)
    }
}

#[async_trait]
impl ClientStore for PgStore {
    async fn create_client(
        &self,
        owner_id: DbId,
        input: &CreateClient,
    ) -> Result<Client, StoreError> {
        Ok(ClientRepo::create(&self.pool, owner_id, input).await?)
    }

    async fn find_client(&self, owner_id: DbId, id: DbId) -> Result<Option<Client>, StoreError> {
        Ok(ClientRepo::find_by_id(&self.pool, owner_id, id).await?)
    }

    async fn list_clients(
        &self,
        owner_id: DbId,
        params: &ClientQuery,
    ) -> Result<Vec<Client>, StoreError> {
        Ok(ClientRepo::list(&self.pool, owner_id, params).await?)
    }

    async fn count_clients(&self, owner_id: DbId) -> Result<i64, StoreError> {
        Ok(ClientRepo::count_by_owner(&self.pool, owner_id).await?)
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn create_appointment(
        &self,
        owner_id: DbId,
        input: &CreateAppointment,
    ) -> Result<Appointment, StoreError> {
        Ok(AppointmentRepo::create(&self.pool, owner_id, input).await?)
    }

    async fn find_appointment(
        &self,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Appointment>, StoreError> {
        Ok(AppointmentRepo::find_by_id(&self.pool, owner_id, id).await?)
    }

    async fn update_appointment_status(
        &self,
        owner_id: DbId,
        id: DbId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        Ok(AppointmentRepo::update_status(&self.pool, owner_id, id, status).await?)
    }

    async fn list_appointment_details(
        &self,
        owner_id: DbId,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<AppointmentDetail>, StoreError> {
        Ok(AppointmentRepo::list_details_between(&self.pool, owner_id, from, to).await?)
    }
}

#[async_trait]
impl BookingLinkStore for PgStore {
    async fn find_booking_link(&self, owner_id: DbId) -> Result<Option<BookingLink>, StoreError> {
        Ok(BookingLinkRepo::find_by_owner(&self.pool, owner_id).await?)
    }

    async fn find_booking_link_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BookingLink>, StoreError> {
        Ok(BookingLinkRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn upsert_booking_link(
        &self,
        owner_id: DbId,
        input: &UpsertBookingLink,
    ) -> Result<BookingLink, StoreError> {
        Ok(BookingLinkRepo::upsert(&self.pool, owner_id, input).await?)
    }
}
