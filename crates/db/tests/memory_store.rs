use std::sync::Arc;

use assert_matches::assert_matches;
use beautyboss_core::appointment::AppointmentStatus;
use beautyboss_core::business_type::BusinessType;
use beautyboss_core::error::CoreError;
use beautyboss_core::onboarding::OnboardingDraft;
use beautyboss_core::schedule::Weekday;
use beautyboss_db::models::appointment::CreateAppointment;
use beautyboss_db::models::booking_link::UpsertBookingLink;
use beautyboss_db::models::client::{ClientQuery, CreateClient};
use beautyboss_db::models::session::CreateSession;
use beautyboss_db::models::user::{CreateUser, UpdateAccount};
use beautyboss_db::{MemoryStore, StoreError};
use beautyboss_db::store::{
    AppointmentStore, BookingLinkStore, ClientStore, DraftEdit, SessionStore, SetupStore,
    UserStore,
};
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        name: "Ana Souza".to_string(),
        email: email.to_string(),
        whatsapp: "11999990000".to_string(),
        password_hash: "hash".to_string(),
    }
}

fn salon_draft() -> OnboardingDraft {
    let mut draft = OnboardingDraft::default();
    draft.set_business_type(BusinessType::HairSalon);
    draft.set_owner_name("Ana Souza");
    draft.add_professional("Bruno Lima");
    draft.load_default_services(BusinessType::HairSalon);
    draft.select_plan("pro").unwrap();
    draft
}

// ---------------------------------------------------------------------------
// Users & sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_email_is_a_conflict_regardless_of_case() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("Ana@Example.com")).await.unwrap();
    assert_eq!(user.email, "ana@example.com");

    let err = store
        .create_user(&new_user("ana@example.COM"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));

    let found = store.find_user_by_email("ANA@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn failed_logins_and_lock_are_cleared_by_success() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@b.com")).await.unwrap();

    store.increment_failed_login(user.id).await.unwrap();
    store.increment_failed_login(user.id).await.unwrap();
    store
        .lock_account(user.id, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();

    let locked = store.find_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(locked.failed_login_count, 2);
    assert!(locked.locked_until.is_some());

    store.record_successful_login(user.id).await.unwrap();
    let cleared = store.find_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(cleared.failed_login_count, 0);
    assert!(cleared.locked_until.is_none());
    assert!(cleared.last_login_at.is_some());
}

#[tokio::test]
async fn update_account_writes_bio_to_profile() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@b.com")).await.unwrap();

    let updated = store
        .update_account(
            user.id,
            &UpdateAccount {
                name: "Ana Maria".to_string(),
                email: "ana.maria@b.com".to_string(),
                bio: Some("Cabeleireira".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Ana Maria");

    let profile = store.find_profile(user.id).await.unwrap().unwrap();
    assert_eq!(profile.bio.as_deref(), Some("Cabeleireira"));

    let missing = store
        .update_account(
            9999,
            &UpdateAccount {
                name: "x".to_string(),
                email: "x@y.com".to_string(),
                bio: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn revoked_and_expired_sessions_are_not_active() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@b.com")).await.unwrap();

    let live = store
        .create_session(&CreateSession {
            user_id: user.id,
            refresh_token_hash: "live".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        })
        .await
        .unwrap();
    store
        .create_session(&CreateSession {
            user_id: user.id,
            refresh_token_hash: "stale".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
        })
        .await
        .unwrap();

    assert!(store.find_active_session("live").await.unwrap().is_some());
    assert!(store.find_active_session("stale").await.unwrap().is_none());

    assert!(store.revoke_session(live.id).await.unwrap());
    assert!(!store.revoke_session(live.id).await.unwrap());
    assert!(store.find_active_session("live").await.unwrap().is_none());
}

#[tokio::test]
async fn revoke_all_counts_only_open_sessions() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@b.com")).await.unwrap();
    for hash in ["one", "two"] {
        store
            .create_session(&CreateSession {
                user_id: user.id,
                refresh_token_hash: hash.to_string(),
                expires_at: Utc::now() + Duration::days(7),
            })
            .await
            .unwrap();
    }

    assert_eq!(store.revoke_all_sessions(user.id).await.unwrap(), 2);
    assert_eq!(store.revoke_all_sessions(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn revoked_and_expired_session_rows_are_dropped() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@b.com")).await.unwrap();
    let session = |hash: &str, expires_at| CreateSession {
        user_id: user.id,
        refresh_token_hash: hash.to_string(),
        expires_at,
    };

    let live = store
        .create_session(&session("live", Utc::now() + Duration::days(7)))
        .await
        .unwrap();
    store
        .create_session(&session("stale", Utc::now() - Duration::minutes(1)))
        .await
        .unwrap();
    assert_eq!(store.session_rows().await, 2);

    store.revoke_session(live.id).await.unwrap();
    assert_eq!(store.session_rows().await, 1);

    // The expired row goes when the next session is written.
    store
        .create_session(&session("next", Utc::now() + Duration::days(7)))
        .await
        .unwrap();
    assert_eq!(store.session_rows().await, 1);
    assert!(store.find_active_session("next").await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Business setup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn saving_twice_leaves_one_row_per_item() {
    let store = MemoryStore::new();
    let owner = store.create_user(&new_user("a@b.com")).await.unwrap().id;
    let submission = salon_draft().submission().unwrap();

    let now = Utc::now();
    let first = store
        .replace_business_setup(owner, &submission, now)
        .await
        .unwrap();
    let second = store
        .replace_business_setup(owner, &submission, now + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(second.professionals, 2);
    assert_eq!(second.services, 4);
    assert_eq!(second.schedule_days, 7);

    assert_eq!(store.list_professionals(owner).await.unwrap().len(), 2);
    assert_eq!(store.list_services(owner).await.unwrap().len(), 4);
    assert_eq!(store.count_services(owner).await.unwrap(), 4);

    let schedule = store.list_schedule(owner).await.unwrap();
    assert_eq!(schedule.len(), 7);
    assert_eq!(schedule[0].weekday, Weekday::Monday.as_str());
    assert_eq!(schedule[6].weekday, Weekday::Sunday.as_str());
}

#[tokio::test]
async fn first_professional_is_linked_to_the_owner() {
    let store = MemoryStore::new();
    let owner = store.create_user(&new_user("a@b.com")).await.unwrap().id;
    let submission = salon_draft().submission().unwrap();
    store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();

    let staff = store.list_professionals(owner).await.unwrap();
    assert_eq!(staff[0].name, "Ana Souza");
    assert_eq!(staff[0].user_id, Some(owner));
    assert_eq!(staff[1].user_id, None);

    let services = store.list_services(owner).await.unwrap();
    assert!(services.iter().all(|s| s.professional_id == Some(staff[0].id)));
    assert_eq!(services[0].name, "Corte Feminino");
    assert_eq!(services[0].price, dec!(80));
}

#[tokio::test]
async fn trial_dates_keep_their_first_value() {
    let store = MemoryStore::new();
    let owner = store.create_user(&new_user("a@b.com")).await.unwrap().id;
    let submission = salon_draft().submission().unwrap();

    let first_save = Utc::now();
    store
        .replace_business_setup(owner, &submission, first_save)
        .await
        .unwrap();
    store
        .replace_business_setup(owner, &submission, first_save + Duration::days(3))
        .await
        .unwrap();

    let profile = store.find_profile(owner).await.unwrap().unwrap();
    assert_eq!(profile.onboarded_at, Some(first_save));
    assert_eq!(profile.trial_ends_at, Some(first_save + Duration::days(7)));
    assert_eq!(profile.business_type.as_deref(), Some("hair_salon"));
    assert_eq!(profile.plan_id.as_deref(), Some("pro"));
}

#[tokio::test]
async fn drafts_round_trip_per_owner() {
    let store = MemoryStore::new();
    assert!(store.load_onboarding_draft(1).await.unwrap().is_none());

    let advance: DraftEdit<'_> = Box::new(|d| d.next_step().map(|_| ()));
    let draft = store
        .update_onboarding_draft(1, salon_draft(), advance)
        .await
        .unwrap();
    assert_eq!(draft.step, 2);

    assert_eq!(store.load_onboarding_draft(1).await.unwrap(), Some(draft));
    assert!(store.load_onboarding_draft(2).await.unwrap().is_none());
}

#[tokio::test]
async fn rejected_draft_edit_stores_nothing() {
    let store = MemoryStore::new();

    let reject: DraftEdit<'_> = Box::new(|d| {
        d.add_professional("Bruno Lima");
        Err(CoreError::validation("Already at the first onboarding step"))
    });
    let err = store
        .update_onboarding_draft(1, salon_draft(), reject)
        .await
        .unwrap_err();

    assert_matches!(err, StoreError::Rejected(CoreError::Validation(_)));
    assert!(store.load_onboarding_draft(1).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_draft_edits_are_all_kept() {
    let store = Arc::new(MemoryStore::new());

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let name = format!("Profissional {i}");
            let add: DraftEdit<'_> = Box::new(move |d| {
                d.add_professional(&name);
                Ok(())
            });
            store
                .update_onboarding_draft(1, OnboardingDraft::default(), add)
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let draft = store.load_onboarding_draft(1).await.unwrap().unwrap();
    assert_eq!(draft.professionals.len(), 21);
}

// ---------------------------------------------------------------------------
// Clients & appointments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_search_is_case_insensitive_and_paged() {
    let store = MemoryStore::new();
    for (name, email) in [
        ("Carla Dias", "carla@x.com"),
        ("Beatriz Alves", "bia@x.com"),
        ("Ana Carla", "ana@x.com"),
    ] {
        store
            .create_client(
                1,
                &CreateClient {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: "11988887777".to_string(),
                    professional_id: None,
                },
            )
            .await
            .unwrap();
    }

    let all = store
        .list_clients(1, &ClientQuery { search: None, limit: 10, offset: 0 })
        .await
        .unwrap();
    let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ana Carla", "Beatriz Alves", "Carla Dias"]);

    let carlas = store
        .list_clients(
            1,
            &ClientQuery {
                search: Some("carla".to_string()),
                limit: 10,
                offset: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(carlas.len(), 2);

    let page = store
        .list_clients(1, &ClientQuery { search: None, limit: 1, offset: 1 })
        .await
        .unwrap();
    assert_eq!(page[0].name, "Beatriz Alves");

    assert_eq!(store.count_clients(1).await.unwrap(), 3);
    assert_eq!(store.count_clients(2).await.unwrap(), 0);
}

#[tokio::test]
async fn appointment_details_join_names_and_prices() {
    let store = MemoryStore::new();
    let owner = store.create_user(&new_user("a@b.com")).await.unwrap().id;
    store
        .replace_business_setup(owner, &salon_draft().submission().unwrap(), Utc::now())
        .await
        .unwrap();
    let professional = store.list_professionals(owner).await.unwrap()[0].id;
    let service = store.list_services(owner).await.unwrap()[1].clone();
    let client = store
        .create_client(
            owner,
            &CreateClient {
                name: "Carla Dias".to_string(),
                email: "carla@x.com".to_string(),
                phone: "11988887777".to_string(),
                professional_id: Some(professional),
            },
        )
        .await
        .unwrap();

    let starts_at = Utc::now() + Duration::hours(2);
    let appt = store
        .create_appointment(
            owner,
            &CreateAppointment {
                client_id: client.id,
                professional_id: professional,
                service_id: service.id,
                starts_at,
            },
        )
        .await
        .unwrap();
    assert_eq!(appt.status, "scheduled");

    let details = store
        .list_appointment_details(owner, starts_at - Duration::hours(1), None)
        .await
        .unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].client_name, "Carla Dias");
    assert_eq!(details[0].service_name.as_deref(), Some("Corte Masculino"));
    assert_eq!(details[0].price, Some(dec!(50)));

    let outside = store
        .list_appointment_details(owner, starts_at + Duration::minutes(1), None)
        .await
        .unwrap();
    assert!(outside.is_empty());

    let done = store
        .update_appointment_status(owner, appt.id, AppointmentStatus::Completed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, "completed");
    assert!(store
        .update_appointment_status(owner + 1, appt.id, AppointmentStatus::Canceled)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn resaving_setup_detaches_appointments_from_removed_services() {
    let store = MemoryStore::new();
    let owner = store.create_user(&new_user("a@b.com")).await.unwrap().id;
    let submission = salon_draft().submission().unwrap();
    store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();
    let professional = store.list_professionals(owner).await.unwrap()[0].id;
    let service = store.list_services(owner).await.unwrap()[0].id;
    let client = store
        .create_client(
            owner,
            &CreateClient {
                name: "Carla".to_string(),
                email: "carla@x.com".to_string(),
                phone: "11988887777".to_string(),
                professional_id: None,
            },
        )
        .await
        .unwrap();
    let appt = store
        .create_appointment(
            owner,
            &CreateAppointment {
                client_id: client.id,
                professional_id: professional,
                service_id: service,
                starts_at: Utc::now(),
            },
        )
        .await
        .unwrap();

    store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();

    let kept = store.find_appointment(owner, appt.id).await.unwrap().unwrap();
    assert_eq!(kept.service_id, None);
    assert_eq!(kept.professional_id, None);
}

#[tokio::test]
async fn resaving_setup_detaches_clients_from_removed_professionals() {
    let store = MemoryStore::new();
    let owner = store.create_user(&new_user("a@b.com")).await.unwrap().id;
    let submission = salon_draft().submission().unwrap();
    store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();
    let bruno = store.list_professionals(owner).await.unwrap()[1].id;
    let client = store
        .create_client(
            owner,
            &CreateClient {
                name: "Carla".to_string(),
                email: "carla@x.com".to_string(),
                phone: "11988887777".to_string(),
                professional_id: Some(bruno),
            },
        )
        .await
        .unwrap();

    store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();

    let live: Vec<_> = store
        .list_professionals(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert!(!live.contains(&bruno));
    let kept = store.find_client(owner, client.id).await.unwrap().unwrap();
    assert_eq!(kept.professional_id, None);
}

// ---------------------------------------------------------------------------
// Booking links
// ---------------------------------------------------------------------------

#[tokio::test]
async fn booking_link_slug_belongs_to_one_owner() {
    let store = MemoryStore::new();
    let link = UpsertBookingLink {
        slug: "studio-ana".to_string(),
        is_active: true,
        welcome_message: "Olá!".to_string(),
    };

    let created = store.upsert_booking_link(1, &link).await.unwrap();
    let updated = store
        .upsert_booking_link(
            1,
            &UpsertBookingLink {
                is_active: false,
                ..link.clone()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, updated.id);
    assert!(!updated.is_active);

    let err = store.upsert_booking_link(2, &link).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));

    let by_slug = store.find_booking_link_by_slug("studio-ana").await.unwrap();
    assert_eq!(by_slug.map(|l| l.owner_id), Some(1));
    assert!(store.find_booking_link(2).await.unwrap().is_none());
}
