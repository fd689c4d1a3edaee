//! Postgres-backed checks. These need `DATABASE_URL` pointing at a server
//! where `sqlx::test` may create scratch databases:
//!
//! ```text
//! cargo test -p beautyboss-db -- --ignored
//! ```

use beautyboss_core::business_type::BusinessType;
use beautyboss_core::error::CoreError;
use beautyboss_core::onboarding::OnboardingDraft;
use beautyboss_db::models::booking_link::UpsertBookingLink;
use beautyboss_db::models::client::{ClientQuery, CreateClient};
use beautyboss_db::models::user::CreateUser;
use beautyboss_db::repositories::{ClientRepo, ScheduleRepo, UserRepo};
use beautyboss_db::store::{BookingLinkStore, DraftEdit, SetupStore, UserStore};
use beautyboss_db::{PgStore, StoreError};
use chrono::{Duration, Utc};
use sqlx::PgPool;

async fn seed_owner(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Ana Souza".to_string(),
            email: "Ana@Example.com".to_string(),
            whatsapp: "11999990000".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn salon_draft() -> OnboardingDraft {
    let mut draft = OnboardingDraft::default();
    draft.set_business_type(BusinessType::HairSalon);
    draft.set_owner_name("Ana Souza");
    draft.add_professional("Bruno Lima");
    draft.load_default_services(BusinessType::HairSalon);
    draft.select_plan("basic").unwrap();
    draft
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_health_and_email_normalisation(pool: PgPool) {
    beautyboss_db::health_check(&pool).await.unwrap();
    seed_owner(&pool).await;

    let found = UserRepo::find_by_email(&pool, "ana@EXAMPLE.com")
        .await
        .unwrap()
        .expect("user should be found case-insensitively");
    assert_eq!(found.email, "ana@example.com");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    seed_owner(&pool).await;
    let store = PgStore::new(pool);

    let err = store
        .create_user(&CreateUser {
            name: "Outra".to_string(),
            email: "ana@example.com".to_string(),
            whatsapp: "11999990001".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        StoreError::Database(sqlx::Error::Database(db)) => {
            assert_eq!(db.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_business_setup_is_idempotent(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    let store = PgStore::new(pool.clone());
    let submission = salon_draft().submission().unwrap();

    store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();
    let counts = store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();
    assert_eq!(counts.professionals, 2);
    assert_eq!(counts.services, 4);
    assert_eq!(counts.schedule_days, 7);

    let staff = store.list_professionals(owner).await.unwrap();
    assert_eq!(staff.len(), 2);
    assert_eq!(staff[0].user_id, Some(owner));
    assert_eq!(store.count_services(owner).await.unwrap(), 4);

    let schedule = ScheduleRepo::list_by_owner(&pool, owner).await.unwrap();
    let days: Vec<_> = schedule.iter().map(|r| r.weekday.as_str()).collect();
    assert_eq!(
        days,
        ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"]
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_trial_end_is_set_once(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    let store = PgStore::new(pool);
    let submission = salon_draft().submission().unwrap();

    store
        .replace_business_setup(owner, &submission, Utc::now())
        .await
        .unwrap();
    let first = store.find_profile(owner).await.unwrap().unwrap();

    store
        .replace_business_setup(owner, &submission, Utc::now() + Duration::days(2))
        .await
        .unwrap();
    let second = store.find_profile(owner).await.unwrap().unwrap();

    assert!(first.trial_ends_at.is_some());
    assert_eq!(first.trial_ends_at, second.trial_ends_at);
    assert_eq!(first.onboarded_at, second.onboarded_at);
    assert_eq!(second.plan_id.as_deref(), Some("basic"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_onboarding_draft_round_trip(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    let store = PgStore::new(pool);

    let advance: DraftEdit<'_> = Box::new(|d| d.next_step().map(|_| ()));
    store
        .update_onboarding_draft(owner, salon_draft(), advance)
        .await
        .unwrap();
    let advance: DraftEdit<'_> = Box::new(|d| d.next_step().map(|_| ()));
    let draft = store
        .update_onboarding_draft(owner, OnboardingDraft::default(), advance)
        .await
        .unwrap();
    assert_eq!(draft.step, 3);

    let loaded = store.load_onboarding_draft(owner).await.unwrap();
    assert_eq!(loaded, Some(draft));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_rejected_draft_edit_stores_nothing(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    let store = PgStore::new(pool);

    let reject: DraftEdit<'_> = Box::new(|_| Err(CoreError::validation("nope")));
    let result = store
        .update_onboarding_draft(owner, salon_draft(), reject)
        .await;

    assert!(matches!(result, Err(StoreError::Rejected(CoreError::Validation(_)))));
    assert!(store.load_onboarding_draft(owner).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_client_search(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    for name in ["Carla Dias", "Beatriz Alves", "Ana Carla"] {
        ClientRepo::create(
            &pool,
            owner,
            &CreateClient {
                name: name.to_string(),
                email: format!("{}@x.com", name.to_lowercase().replace(' ', ".")),
                phone: "11988887777".to_string(),
                professional_id: None,
            },
        )
        .await
        .unwrap();
    }

    let found = ClientRepo::list(
        &pool,
        owner,
        &ClientQuery {
            search: Some("carla".to_string()),
            limit: 10,
            offset: 0,
        },
    )
    .await
    .unwrap();
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ana Carla", "Carla Dias"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_booking_link_upsert(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    let store = PgStore::new(pool);

    let input = UpsertBookingLink {
        slug: "studio-ana".to_string(),
        is_active: true,
        welcome_message: "Olá!".to_string(),
    };
    let created = store.upsert_booking_link(owner, &input).await.unwrap();
    let updated = store
        .upsert_booking_link(
            owner,
            &UpsertBookingLink {
                slug: "studio-ana-2".to_string(),
                ..input
            },
        )
        .await
        .unwrap();

    assert_eq!(created.id, updated.id);
    assert!(store.find_booking_link_by_slug("studio-ana").await.unwrap().is_none());
    assert!(store.find_booking_link_by_slug("studio-ana-2").await.unwrap().is_some());
}
