//! Backend-agnostic persistence interface.
//!
//! Handlers depend on `Arc<dyn Store>`. [`pg::PgStore`] delegates to the
//! repositories; [`memory::MemoryStore`] keeps everything in process and
//! backs the API tests and the `STORAGE_BACKEND=memory` mode.

pub mod memory;
pub mod pg;

use async_trait::async_trait;
use beautyboss_core::appointment::AppointmentStatus;
use beautyboss_core::error::CoreError;
use beautyboss_core::onboarding::{OnboardingDraft, OnboardingSubmission};
use beautyboss_core::types::{DbId, Timestamp};
use serde::Serialize;

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

/// Rows written by [`SetupStore::replace_business_setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetupCounts {
    pub professionals: usize,
    pub services: usize,
    pub schedule_days: usize,
}

/// Edit applied by [`SetupStore::update_onboarding_draft`]. An error
/// aborts the update.
pub type DraftEdit<'a> =
    Box<dyn FnOnce(&mut OnboardingDraft) -> Result<(), CoreError> + Send + 'a>;

#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Cheap round trip to the backend.
    async fn ping(&self) -> Result<(), StoreError>;
}

// ── Users & sessions ───────────────────────────────────────────────

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user. A taken email is a conflict.
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    /// Emails compare case-insensitively.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn increment_failed_login(&self, id: DbId) -> Result<(), StoreError>;

    async fn lock_account(&self, id: DbId, until: Timestamp) -> Result<(), StoreError>;

    async fn record_successful_login(&self, id: DbId) -> Result<(), StoreError>;

    /// Update name and email on the user and bio on the profile.
    async fn update_account(
        &self,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError>;

    /// Only sessions that are neither revoked nor expired are returned.
    async fn find_active_session(&self, token_hash: &str)
        -> Result<Option<UserSession>, StoreError>;

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError>;

    async fn revoke_all_sessions(&self, user_id: DbId) -> Result<u64, StoreError>;
}

// ── Business setup ─────────────────────────────────────────────────

#[async_trait]
pub trait SetupStore: Send + Sync {
    async fn find_profile(&self, owner_id: DbId) -> Result<Option<BusinessProfile>, StoreError>;

    async fn update_business_details(
        &self,
        owner_id: DbId,
        input: &UpdateBusinessDetails,
    ) -> Result<BusinessProfile, StoreError>;

    async fn load_onboarding_draft(
        &self,
        owner_id: DbId,
    ) -> Result<Option<OnboardingDraft>, StoreError>;

    /// Apply `edit` to the owner's stored draft, starting from `seed` when
    /// none is stored, and store the result. Updates for one owner are
    /// serialized. A failing edit stores nothing and comes back as
    /// [`StoreError::Rejected`].
    async fn update_onboarding_draft(
        &self,
        owner_id: DbId,
        seed: OnboardingDraft,
        edit: DraftEdit<'_>,
    ) -> Result<OnboardingDraft, StoreError>;

    /// Replace staff, services and schedule for `owner_id` and record the
    /// business type and plan. Either everything is written or nothing is.
    async fn replace_business_setup(
        &self,
        owner_id: DbId,
        submission: &OnboardingSubmission,
        now: Timestamp,
    ) -> Result<SetupCounts, StoreError>;

    async fn list_professionals(&self, owner_id: DbId) -> Result<Vec<Professional>, StoreError>;

    async fn list_services(&self, owner_id: DbId) -> Result<Vec<Service>, StoreError>;

    async fn count_services(&self, owner_id: DbId) -> Result<i64, StoreError>;

    /// Rows ordered Monday first.
    async fn list_schedule(&self, owner_id: DbId) -> Result<Vec<ScheduleEntry>, StoreError>;
}

// ── Clients & appointments ─────────────────────────────────────────

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn create_client(&self, owner_id: DbId, input: &CreateClient)
        -> Result<Client, StoreError>;

    async fn find_client(&self, owner_id: DbId, id: DbId) -> Result<Option<Client>, StoreError>;

    async fn list_clients(
        &self,
        owner_id: DbId,
        params: &ClientQuery,
    ) -> Result<Vec<Client>, StoreError>;

    async fn count_clients(&self, owner_id: DbId) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create_appointment(
        &self,
        owner_id: DbId,
        input: &CreateAppointment,
    ) -> Result<Appointment, StoreError>;

    async fn find_appointment(
        &self,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Appointment>, StoreError>;

    async fn update_appointment_status(
        &self,
        owner_id: DbId,
        id: DbId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError>;

    /// Appointments starting in `[from, to)`, earliest first.
    async fn list_appointment_details(
        &self,
        owner_id: DbId,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<AppointmentDetail>, StoreError>;
}

// ── Booking links ──────────────────────────────────────────────────

#[async_trait]
pub trait BookingLinkStore: Send + Sync {
    async fn find_booking_link(&self, owner_id: DbId) -> Result<Option<BookingLink>, StoreError>;

    async fn find_booking_link_by_slug(&self, slug: &str)
        -> Result<Option<BookingLink>, StoreError>;

    /// A slug owned by someone else is a conflict.
    async fn upsert_booking_link(
        &self,
        owner_id: DbId,
        input: &UpsertBookingLink,
    ) -> Result<BookingLink, StoreError>;
}

/// Everything the API needs from persistence.
pub trait Store:
    HealthStore + UserStore + SessionStore + SetupStore + ClientStore + AppointmentStore + BookingLinkStore
{
}

impl<T> Store for T where
    T: HealthStore
        + UserStore
        + SessionStore
        + SetupStore
        + ClientStore
        + AppointmentStore
        + BookingLinkStore
{
}
