//! Handlers for the public booking wizard. No authentication.
//!
//! Every visitor works on a server-held session (see
//! [`crate::booking_sessions`]). Confirming publishes `booking.confirmed`
//! and does not write an appointment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_core::booking::{BookingAnswers, BookingDraft, BookingSummary};
use beautyboss_core::booking_link::{validate_slug, DEFAULT_WELCOME_MESSAGE};
use beautyboss_core::catalog::{public_catalog, PublicCatalog};
use beautyboss_core::error::CoreError;
use beautyboss_core::notice::Notice;
use beautyboss_db::store::BookingLinkStore;
use beautyboss_events::{event_types, PlatformEvent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking_sessions::BookingSession;
use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, NoticeResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BookingPage {
    pub welcome_message: String,
    pub catalog: PublicCatalog,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Booking link the visitor arrived through.
    pub slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub step: u8,
    pub title: &'static str,
    pub draft: BookingDraft,
}

impl SessionView {
    fn of(id: Uuid, session: BookingSession) -> Self {
        Self {
            id,
            step: session.draft.step.to_number(),
            title: session.draft.step.title(),
            draft: session.draft,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfirmedBooking {
    pub session: SessionView,
    pub summary: BookingSummary,
}

// ---------------------------------------------------------------------------
// Catalog pages
// ---------------------------------------------------------------------------

/// GET /api/v1/public/booking/catalog
pub async fn catalog() -> impl IntoResponse {
    Json(DataResponse {
        data: public_catalog(),
    })
}

/// GET /api/v1/public/booking/preview
///
/// What a visitor would see, with the default welcome message.
pub async fn preview() -> impl IntoResponse {
    Json(DataResponse {
        data: BookingPage {
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            catalog: public_catalog(),
        },
    })
}

/// GET /api/v1/public/booking/{slug}
///
/// Inactive links are reported as missing.
pub async fn booking_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let slug = validate_slug(&slug).map_err(|_| CoreError::not_found("BookingLink", &slug))?;
    let link = state
        .store
        .find_booking_link_by_slug(&slug)
        .await?
        .filter(|l| l.is_active)
        .ok_or_else(|| CoreError::not_found("BookingLink", &slug))?;

    Ok(Json(DataResponse {
        data: BookingPage {
            welcome_message: link.welcome_message,
            catalog: public_catalog(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Wizard sessions
// ---------------------------------------------------------------------------

/// POST /api/v1/public/booking/sessions
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();

    let owner_id = match input.slug.as_deref() {
        Some(raw) => {
            let slug = validate_slug(raw).map_err(|_| CoreError::not_found("BookingLink", raw))?;
            let link = state
                .store
                .find_booking_link_by_slug(&slug)
                .await?
                .filter(|l| l.is_active)
                .ok_or_else(|| CoreError::not_found("BookingLink", &slug))?;
            Some(link.owner_id)
        }
        None => None,
    };

    let (id, session) = state.booking_sessions.create(owner_id).await.ok_or_else(|| {
        tracing::warn!("Booking session limit reached");
        AppError::TooManyRequests("Too many booking sessions in progress, try again later".into())
    })?;
    tracing::debug!(session_id = %id, owner_id = ?owner_id, "Booking session started");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SessionView::of(id, session),
        }),
    ))
}

/// GET /api/v1/public/booking/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.booking_sessions.get(id).await?;
    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// PUT /api/v1/public/booking/sessions/{id}
///
/// Merge answers without moving between steps.
pub async fn update_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(answers): Json<BookingAnswers>,
) -> AppResult<impl IntoResponse> {
    let ((), session) = state
        .booking_sessions
        .update(id, |draft| draft.apply(answers))
        .await?;
    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/public/booking/sessions/{id}/advance
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (_, session) = state
        .booking_sessions
        .update(id, |draft| draft.advance())
        .await?;
    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/public/booking/sessions/{id}/back
pub async fn go_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (_, session) = state
        .booking_sessions
        .update(id, |draft| draft.go_back())
        .await?;
    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/public/booking/sessions/{id}/confirm
pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (summary, session) = state
        .booking_sessions
        .update(id, |draft| draft.confirm())
        .await?;

    let mut event = PlatformEvent::new(event_types::BOOKING_CONFIRMED).with_payload(
        serde_json::json!({
            "session_id": id,
            "service": summary.service_name,
            "professional": summary.professional_name,
            "date": summary.date,
            "time": summary.time,
        }),
    );
    if let Some(owner_id) = session.owner_id {
        event = event.with_owner(owner_id);
    }
    state.event_bus.publish(event);

    tracing::info!(session_id = %id, owner_id = ?session.owner_id, "Booking confirmed");

    Ok(Json(NoticeResponse::new(
        ConfirmedBooking {
            session: SessionView::of(id, session),
            summary,
        },
        Notice::success("Agendamento confirmado com sucesso!"),
    )))
}

/// GET /api/v1/public/booking/sessions/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.booking_sessions.get(id).await?;
    let summary = session.draft.summary()?;
    Ok(Json(DataResponse { data: summary }))
}
