//! In-process [`Store`](super::Store) used by the API tests and the
//! `STORAGE_BACKEND=memory` mode.
//!
//! All tables live behind one `tokio::sync::RwLock`, so every write
//! (including the multi-table business setup) is atomic with respect to
//! other requests. Uniqueness rules mirror the `uq_*` constraints of the
//! Postgres schema and surface as [`StoreError::Conflict`].

use std::collections::HashMap;

use async_trait::async_trait;
use beautyboss_core::appointment::AppointmentStatus;
use beautyboss_core::onboarding::{OnboardingDraft, OnboardingSubmission};
use beautyboss_core::plans::TRIAL_DAYS;
use beautyboss_core::types::{DbId, Timestamp};
use chrono::Utc;
use tokio::sync::RwLock;

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

#[derive(Default)]
struct Tables {
    last_id: DbId,
    users: Vec<User>,
    sessions: Vec<UserSession>,
    profiles: Vec<BusinessProfile>,
    professionals: Vec<Professional>,
    services: Vec<Service>,
    schedules: Vec<ScheduleEntry>,
    clients: Vec<Client>,
    appointments: Vec<Appointment>,
    drafts: HashMap<DbId, serde_json::Value>,
    booking_links: Vec<BookingLink>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn user_mut(&mut self, id: DbId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<DbId>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    /// The owner's profile, created empty on first use.
    fn profile_mut(&mut self, owner_id: DbId, now: Timestamp) -> &mut BusinessProfile {
        let index = match self.profiles.iter().position(|p| p.owner_id == owner_id) {
            Some(i) => i,
            None => {
                let id = self.next_id();
                self.profiles.push(BusinessProfile {
                    id,
                    owner_id,
                    business_type: None,
                    plan_id: None,
                    business_name: None,
                    address: None,
                    phone: None,
                    bio: None,
                    onboarded_at: None,
                    trial_ends_at: None,
                    created_at: now,
                    updated_at: now,
                });
                self.profiles.len() - 1
            }
        };
        &mut self.profiles[index]
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh-session rows currently held. Revoked rows are dropped on
    /// revocation and expired ones when the next session is created.
    pub async fn session_rows(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

#[async_trait]
impl HealthStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ── Users & sessions ──────────────────────────────────────────

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let email = input.email.to_lowercase();
        if tables.email_taken(&email, None) {
            return Err(StoreError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            name: input.name.clone(),
            email,
            whatsapp: input.whatsapp.clone(),
            password_hash: input.password_hash.clone(),
            is_subscribed: false,
            failed_login_count: 0,
            locked_until: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn increment_failed_login(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.user_mut(id) {
            user.failed_login_count += 1;
        }
        Ok(())
    }

    async fn lock_account(&self, id: DbId, until: Timestamp) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.user_mut(id) {
            user.locked_until = Some(until);
        }
        Ok(())
    }

    async fn record_successful_login(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.user_mut(id) {
            user.failed_login_count = 0;
            user.locked_until = None;
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn update_account(
        &self,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        let email = input.email.to_lowercase();
        if tables.email_taken(&email, Some(id)) {
            return Err(StoreError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        let now = Utc::now();
        let Some(user) = tables.user_mut(id) else {
            return Ok(None);
        };
        user.name = input.name.clone();
        user.email = email;
        user.updated_at = now;
        let updated = user.clone();

        let profile = tables.profile_mut(id, now);
        profile.bio = input.bio.clone();
        profile.updated_at = now;
        Ok(Some(updated))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        tables.sessions.retain(|s| s.expires_at > now);
        let session = UserSession {
            id: tables.next_id(),
            user_id: input.user_id,
            refresh_token_hash: input.refresh_token_hash.clone(),
            expires_at: input.expires_at,
            is_revoked: false,
            created_at: now,
            updated_at: now,
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserSession>, StoreError> {
        let now = Utc::now();
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.refresh_token_hash == token_hash && !s.is_revoked && s.expires_at > now)
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.id != id);
        Ok(tables.sessions.len() < before)
    }

    async fn revoke_all_sessions(&self, user_id: DbId) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.user_id != user_id);
        Ok((before - tables.sessions.len()) as u64)
    }
}

// ── Business setup ────────────────────────────────────────────

#[async_trait]
impl SetupStore for MemoryStore {
    async fn find_profile(&self, owner_id: DbId) -> Result<Option<BusinessProfile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.owner_id == owner_id)
            .cloned())
    }

    async fn update_business_details(
        &self,
        owner_id: DbId,
        input: &UpdateBusinessDetails,
    ) -> Result<BusinessProfile, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let profile = tables.profile_mut(owner_id, now);
        profile.business_name = Some(input.business_name.clone());
        profile.address = Some(input.address.clone());
        profile.phone = Some(input.phone.clone());
        profile.updated_at = now;
        Ok(profile.clone())
    }

    async fn load_onboarding_draft(
        &self,
        owner_id: DbId,
    ) -> Result<Option<OnboardingDraft>, StoreError> {
        let tables = self.tables.read().await;
        match tables.drafts.get(&owner_id) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn update_onboarding_draft(
        &self,
        owner_id: DbId,
        seed: OnboardingDraft,
        edit: DraftEdit<'_>,
    ) -> Result<OnboardingDraft, StoreError> {
        let mut tables = self.tables.write().await;
        let mut draft = match tables.drafts.get(&owner_id) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => seed,
        };
        edit(&mut draft)?;
        tables.drafts.insert(owner_id, serde_json::to_value(&draft)?);
        Ok(draft)
    }

    async fn replace_business_setup(
        &self,
        owner_id: DbId,
        submission: &OnboardingSubmission,
        now: Timestamp,
    ) -> Result<SetupCounts, StoreError> {
        let mut tables = self.tables.write().await;

        tables.services.retain(|s| s.owner_id != owner_id);
        tables.professionals.retain(|p| p.owner_id != owner_id);
        tables.schedules.retain(|s| s.owner_id != owner_id);

        let mut owner_professional = None;
        for (i, name) in submission.professionals.iter().enumerate() {
            let id = tables.next_id();
            if i == 0 {
                owner_professional = Some(id);
            }
            tables.professionals.push(Professional {
                id,
                owner_id,
                user_id: (i == 0).then_some(owner_id),
                name: name.clone(),
                sort_order: i as i32,
                created_at: now,
            });
        }

        for (i, draft) in submission.services.iter().enumerate() {
            let id = tables.next_id();
            tables.services.push(Service {
                id,
                owner_id,
                professional_id: owner_professional,
                name: draft.name.clone(),
                duration_minutes: draft.duration,
                price: draft.price,
                sort_order: i as i32,
                created_at: now,
            });
        }

        let entries = submission.schedule.entries();
        for (day, hours) in &entries {
            let id = tables.next_id();
            tables.schedules.push(ScheduleEntry {
                id,
                owner_id,
                weekday: day.as_str().to_string(),
                enabled: hours.enabled,
                start_time: hours.start.clone(),
                end_time: hours.end.clone(),
            });
        }

        // Appointments and clients keep their rows when staff or services
        // go away; only the link is cleared.
        let live_professionals: Vec<DbId> = tables
            .professionals
            .iter()
            .map(|p| p.id)
            .collect();
        let live_services: Vec<DbId> = tables.services.iter().map(|s| s.id).collect();
        for appt in tables.appointments.iter_mut().filter(|a| a.owner_id == owner_id) {
            if appt.professional_id.is_some_and(|id| !live_professionals.contains(&id)) {
                appt.professional_id = None;
            }
            if appt.service_id.is_some_and(|id| !live_services.contains(&id)) {
                appt.service_id = None;
            }
        }
        for client in tables.clients.iter_mut().filter(|c| c.owner_id == owner_id) {
            if client.professional_id.is_some_and(|id| !live_professionals.contains(&id)) {
                client.professional_id = None;
            }
        }

        let profile = tables.profile_mut(owner_id, now);
        profile.business_type = submission.business_type.map(|t| t.as_str().to_string());
        profile.plan_id = submission.plan_id.clone();
        profile.onboarded_at.get_or_insert(now);
        profile
            .trial_ends_at
            .get_or_insert(now + chrono::Duration::days(TRIAL_DAYS));
        profile.updated_at = now;

        Ok(SetupCounts {
            professionals: submission.professionals.len(),
            services: submission.services.len(),
            schedule_days: entries.len(),
        })
    }

    async fn list_professionals(&self, owner_id: DbId) -> Result<Vec<Professional>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Professional> = tables
            .professionals
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| (p.sort_order, p.id));
        Ok(rows)
    }

    async fn list_services(&self, owner_id: DbId) -> Result<Vec<Service>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Service> = tables
            .services
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.sort_order, s.id));
        Ok(rows)
    }

    async fn count_services(&self, owner_id: DbId) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .services
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .count() as i64)
    }

    async fn list_schedule(&self, owner_id: DbId) -> Result<Vec<ScheduleEntry>, StoreError> {
        let tables = self.tables.read().await;
        // Rows are inserted Monday first by replace_business_setup.
        Ok(tables
            .schedules
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

// ── Clients & appointments ────────────────────────────────────

#[async_trait]
impl ClientStore for MemoryStore {
    async fn create_client(
        &self,
        owner_id: DbId,
        input: &CreateClient,
    ) -> Result<Client, StoreError> {
        let mut tables = self.tables.write().await;
        let client = Client {
            id: tables.next_id(),
            owner_id,
            professional_id: input.professional_id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            created_at: Utc::now(),
        };
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn find_client(&self, owner_id: DbId, id: DbId) -> Result<Option<Client>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .iter()
            .find(|c| c.owner_id == owner_id && c.id == id)
            .cloned())
    }

    async fn list_clients(
        &self,
        owner_id: DbId,
        params: &ClientQuery,
    ) -> Result<Vec<Client>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Client> = tables
            .clients
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .filter(|c| match params.search.as_deref() {
                Some(term) => {
                    c.name.to_lowercase().contains(term)
                        || c.email.to_lowercase().contains(term)
                        || c.phone.contains(term)
                }
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows
            .into_iter()
            .skip(params.offset.max(0) as usize)
            .take(params.limit.max(0) as usize)
            .collect())
    }

    async fn count_clients(&self, owner_id: DbId) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .count() as i64)
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn create_appointment(
        &self,
        owner_id: DbId,
        input: &CreateAppointment,
    ) -> Result<Appointment, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let appointment = Appointment {
            id: tables.next_id(),
            owner_id,
            client_id: input.client_id,
            professional_id: Some(input.professional_id),
            service_id: Some(input.service_id),
            starts_at: input.starts_at,
            status: AppointmentStatus::Scheduled.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_appointment(
        &self,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .find(|a| a.owner_id == owner_id && a.id == id)
            .cloned())
    }

    async fn update_appointment_status(
        &self,
        owner_id: DbId,
        id: DbId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .appointments
            .iter_mut()
            .find(|a| a.owner_id == owner_id && a.id == id)
            .map(|a| {
                a.status = status.as_str().to_string();
                a.updated_at = Utc::now();
                a.clone()
            }))
    }

    async fn list_appointment_details(
        &self,
        owner_id: DbId,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<AppointmentDetail>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AppointmentDetail> = tables
            .appointments
            .iter()
            .filter(|a| a.owner_id == owner_id && a.starts_at >= from)
            .filter(|a| to.is_none_or(|end| a.starts_at < end))
            .filter_map(|a| {
                let client = tables.clients.iter().find(|c| c.id == a.client_id)?;
                let professional = a
                    .professional_id
                    .and_then(|id| tables.professionals.iter().find(|p| p.id == id));
                let service = a
                    .service_id
                    .and_then(|id| tables.services.iter().find(|s| s.id == id));
                Some(AppointmentDetail {
                    id: a.id,
                    client_id: a.client_id,
                    client_name: client.name.clone(),
                    professional_id: a.professional_id,
                    professional_name: professional.map(|p| p.name.clone()),
                    service_id: a.service_id,
                    service_name: service.map(|s| s.name.clone()),
                    price: service.map(|s| s.price),
                    starts_at: a.starts_at,
                    status: a.status.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|d| (d.starts_at, d.id));
        Ok(rows)
    }
}

// ── Booking links ─────────────────────────────────────────────

#[async_trait]
impl BookingLinkStore for MemoryStore {
    async fn find_booking_link(&self, owner_id: DbId) -> Result<Option<BookingLink>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .booking_links
            .iter()
            .find(|l| l.owner_id == owner_id)
            .cloned())
    }

    async fn find_booking_link_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BookingLink>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.booking_links.iter().find(|l| l.slug == slug).cloned())
    }

    async fn upsert_booking_link(
        &self,
        owner_id: DbId,
        input: &UpsertBookingLink,
    ) -> Result<BookingLink, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .booking_links
            .iter()
            .any(|l| l.slug == input.slug && l.owner_id != owner_id)
        {
            return Err(StoreError::Conflict(format!(
                "Booking link '{}' is already taken",
                input.slug
            )));
        }

        let now = Utc::now();
        if let Some(link) = tables
            .booking_links
            .iter_mut()
            .find(|l| l.owner_id == owner_id)
        {
            link.slug = input.slug.clone();
            link.is_active = input.is_active;
            link.welcome_message = input.welcome_message.clone();
            link.updated_at = now;
            return Ok(link.clone());
        }

        let link = BookingLink {
            id: tables.next_id(),
            owner_id,
            slug: input.slug.clone(),
            is_active: input.is_active,
            welcome_message: input.welcome_message.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.booking_links.push(link.clone());
        Ok(link)
    }
}
