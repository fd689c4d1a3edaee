//! Handlers for the onboarding wizard.
//!
//! The draft is stored per owner after every mutation so a reload resumes
//! where the owner left off. `POST /save` writes the business setup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use beautyboss_core::business_type::{business_type_options, BusinessType};
use beautyboss_core::error::CoreError;
use beautyboss_core::notice::Notice;
use beautyboss_core::onboarding::{OnboardingDraft, SaveOutcome, TOTAL_STEPS};
use beautyboss_core::plans::subscription_plans;
use beautyboss_core::schedule::{end_time_options, start_time_options, TimeSlotOption, Weekday};
use beautyboss_core::types::{DbId, Minutes};
use beautyboss_db::store::{SetupStore, UserStore};
use beautyboss_events::{event_types, PlatformEvent};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, NoticeResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OnboardingView {
    pub step: u8,
    pub step_label: &'static str,
    pub total_steps: u8,
    pub draft: OnboardingDraft,
}

impl OnboardingView {
    fn of(draft: OnboardingDraft) -> AppResult<Self> {
        let step = draft.current_step()?;
        Ok(Self {
            step: step.to_number(),
            step_label: step.label(),
            total_steps: TOTAL_STEPS,
            draft,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStepRequest {
    pub step: u8,
}

#[derive(Debug, Deserialize)]
pub struct BusinessTypeRequest {
    pub business_type: BusinessType,
}

#[derive(Debug, Deserialize)]
pub struct ProfessionalRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub duration: Minutes,
    pub price: Decimal,
}

#[derive(Debug, Default, Deserialize)]
pub struct DefaultServicesRequest {
    /// Falls back to the business type already chosen in the draft.
    pub business_type: Option<BusinessType>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub enabled: bool,
    /// When both are omitted only the enabled flag changes.
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub plan_id: String,
}

#[derive(Debug, Serialize)]
pub struct TimeSlotsResponse {
    pub start: Vec<TimeSlotOption>,
    pub end: Vec<TimeSlotOption>,
}

type DraftResponse = AppResult<Json<NoticeResponse<OnboardingView>>>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A new draft with the owner's name in slot 0.
async fn fresh_draft(state: &AppState, owner_id: DbId) -> AppResult<OnboardingDraft> {
    let mut draft = OnboardingDraft::default();
    if let Some(user) = state.store.find_user_by_id(owner_id).await? {
        draft.set_owner_name(&user.name);
    }
    Ok(draft)
}

/// The stored draft, or a fresh one.
async fn load_draft(state: &AppState, owner_id: DbId) -> AppResult<OnboardingDraft> {
    match state.store.load_onboarding_draft(owner_id).await? {
        Some(draft) => Ok(draft),
        None => fresh_draft(state, owner_id).await,
    }
}

/// Apply `f` to the owner's draft inside the store, so concurrent edits
/// from the same owner are applied one after another. Nothing is stored
/// when `f` fails.
async fn mutate<T: Send>(
    state: &AppState,
    owner_id: DbId,
    f: impl FnOnce(&mut OnboardingDraft) -> Result<T, CoreError> + Send,
) -> AppResult<(T, OnboardingDraft)> {
    let seed = fresh_draft(state, owner_id).await?;
    let mut out = None;
    let draft = state
        .store
        .update_onboarding_draft(
            owner_id,
            seed,
            Box::new(|d: &mut OnboardingDraft| {
                out = Some(f(d)?);
                Ok(())
            }),
        )
        .await?;
    let out = out.ok_or_else(|| AppError::InternalError("Draft edit was not applied".into()))?;
    Ok((out, draft))
}

fn respond(draft: OnboardingDraft, notice: Option<Notice>) -> DraftResponse {
    Ok(Json(NoticeResponse {
        data: OnboardingView::of(draft)?,
        notice,
    }))
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// GET /api/v1/onboarding
pub async fn get_draft(State(state): State<AppState>, auth: AuthUser) -> DraftResponse {
    respond(load_draft(&state, auth.user_id).await?, None)
}

/// POST /api/v1/onboarding/reset
pub async fn reset(State(state): State<AppState>, auth: AuthUser) -> DraftResponse {
    let owner_name = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_default();
    let (_, draft) = mutate(&state, auth.user_id, |d| {
        d.reset();
        d.set_owner_name(&owner_name);
        Ok(())
    })
    .await?;
    respond(draft, None)
}

/// PUT /api/v1/onboarding/step
pub async fn set_step(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SetStepRequest>,
) -> DraftResponse {
    let (_, draft) = mutate(&state, auth.user_id, |d| d.set_step(input.step)).await?;
    respond(draft, None)
}

/// POST /api/v1/onboarding/next
pub async fn next_step(State(state): State<AppState>, auth: AuthUser) -> DraftResponse {
    let (step, draft) = mutate(&state, auth.user_id, |d| d.next_step()).await?;
    tracing::debug!(user_id = auth.user_id, step = step.to_number(), "Onboarding advanced");
    respond(draft, None)
}

/// POST /api/v1/onboarding/back
pub async fn previous_step(State(state): State<AppState>, auth: AuthUser) -> DraftResponse {
    let (_, draft) = mutate(&state, auth.user_id, |d| d.previous_step()).await?;
    respond(draft, None)
}

/// PUT /api/v1/onboarding/business-type
pub async fn set_business_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BusinessTypeRequest>,
) -> DraftResponse {
    let (_, draft) = mutate(&state, auth.user_id, |d| {
        d.set_business_type(input.business_type);
        Ok(())
    })
    .await?;
    respond(draft, None)
}

// ---------------------------------------------------------------------------
// Professionals
// ---------------------------------------------------------------------------

/// POST /api/v1/onboarding/professionals
///
/// A blank name leaves the list as it is and comes back with an error
/// notice.
pub async fn add_professional(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProfessionalRequest>,
) -> DraftResponse {
    let (added, draft) =
        mutate(&state, auth.user_id, |d| Ok(d.add_professional(&input.name))).await?;
    let notice = (!added).then(|| Notice::error("Informe o nome do profissional."));
    respond(draft, notice)
}

/// DELETE /api/v1/onboarding/professionals/{index}
pub async fn remove_professional(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(index): Path<usize>,
) -> DraftResponse {
    let (removed, draft) =
        mutate(&state, auth.user_id, |d| d.remove_professional(index)).await?;
    respond(
        draft,
        Some(Notice::info(format!("{} removido da equipe.", removed.name))),
    )
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

const INVALID_SERVICE: &str = "Preencha nome, duração e preço do serviço.";

/// POST /api/v1/onboarding/services
pub async fn add_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ServiceRequest>,
) -> DraftResponse {
    let (added, draft) = mutate(&state, auth.user_id, |d| {
        Ok(d.add_service(&input.name, input.duration, input.price))
    })
    .await?;
    respond(draft, (!added).then(|| Notice::error(INVALID_SERVICE)))
}

/// PUT /api/v1/onboarding/services/{index}
pub async fn update_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(index): Path<usize>,
    Json(input): Json<ServiceRequest>,
) -> DraftResponse {
    let (updated, draft) = mutate(&state, auth.user_id, |d| {
        d.update_service(index, &input.name, input.duration, input.price)
    })
    .await?;
    respond(draft, (!updated).then(|| Notice::error(INVALID_SERVICE)))
}

/// DELETE /api/v1/onboarding/services/{index}
pub async fn remove_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(index): Path<usize>,
) -> DraftResponse {
    let (_, draft) = mutate(&state, auth.user_id, |d| d.remove_service(index)).await?;
    respond(draft, None)
}

/// POST /api/v1/onboarding/services/defaults
pub async fn load_default_services(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DefaultServicesRequest>,
) -> DraftResponse {
    let (loaded, draft) = mutate(&state, auth.user_id, |d| {
        let business_type = input
            .business_type
            .or(d.business_type)
            .ok_or_else(|| CoreError::validation("Choose a business type first"))?;
        Ok(d.load_default_services(business_type))
    })
    .await?;
    respond(
        draft,
        Some(Notice::info(format!("{loaded} serviços sugeridos carregados."))),
    )
}

// ---------------------------------------------------------------------------
// Schedule & plan
// ---------------------------------------------------------------------------

/// PUT /api/v1/onboarding/schedule/{day}
pub async fn set_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(day): Path<Weekday>,
    Json(input): Json<ScheduleRequest>,
) -> DraftResponse {
    let (_, draft) = mutate(&state, auth.user_id, |d| match (&input.start, &input.end) {
        (Some(start), Some(end)) => d.set_schedule(day, input.enabled, start, end),
        (None, None) => {
            d.set_day_enabled(day, input.enabled);
            Ok(())
        }
        _ => Err(CoreError::validation(
            "Provide both start and end times, or neither",
        )),
    })
    .await?;
    respond(draft, None)
}

/// PUT /api/v1/onboarding/plan
pub async fn select_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PlanRequest>,
) -> DraftResponse {
    let (_, draft) = mutate(&state, auth.user_id, |d| d.select_plan(&input.plan_id)).await?;
    respond(draft, None)
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

/// POST /api/v1/onboarding/save
///
/// Missing names are a 400. A store failure is reported as a failed
/// [`SaveOutcome`] with status 500 and an error notice.
pub async fn save(State(state): State<AppState>, auth: AuthUser) -> AppResult<Response> {
    let draft = load_draft(&state, auth.user_id).await?;
    let submission = draft.submission()?;

    match state
        .store
        .replace_business_setup(auth.user_id, &submission, Utc::now())
        .await
    {
        Ok(counts) => {
            tracing::info!(
                user_id = auth.user_id,
                professionals = counts.professionals,
                services = counts.services,
                schedule_days = counts.schedule_days,
                "Onboarding saved"
            );
            state.event_bus.publish(
                PlatformEvent::new(event_types::ONBOARDING_SAVED)
                    .with_owner(auth.user_id)
                    .with_payload(serde_json::json!({
                        "business_type": submission.business_type,
                        "plan_id": submission.plan_id,
                        "professionals": counts.professionals,
                        "services": counts.services,
                    })),
            );

            let outcome =
                SaveOutcome::saved(counts.professionals, counts.services, counts.schedule_days);
            let notice = Notice::success(outcome.message.clone());
            Ok(Json(NoticeResponse::new(outcome, notice)).into_response())
        }
        Err(e) => {
            tracing::error!(user_id = auth.user_id, error = %e, "Onboarding save failed");
            let outcome = SaveOutcome::failed("Erro ao salvar configuração. Tente novamente.");
            let notice = Notice::error(outcome.message.clone());
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(NoticeResponse::new(outcome, notice)),
            )
                .into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// GET /api/v1/onboarding/business-types
pub async fn list_business_types() -> impl IntoResponse {
    Json(DataResponse {
        data: business_type_options(),
    })
}

/// GET /api/v1/onboarding/plans
pub async fn list_plans() -> impl IntoResponse {
    Json(DataResponse {
        data: subscription_plans(),
    })
}

/// GET /api/v1/onboarding/time-slots
pub async fn list_time_slots() -> impl IntoResponse {
    Json(DataResponse {
        data: TimeSlotsResponse {
            start: start_time_options(),
            end: end_time_options(),
        },
    })
}
