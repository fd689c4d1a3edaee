//! Handlers for the owner's public booking link.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_core::booking_link::{
    booking_url, suggest_slug, validate_slug, DEFAULT_WELCOME_MESSAGE,
};
use beautyboss_core::error::CoreError;
use beautyboss_core::notice::Notice;
use beautyboss_db::models::booking_link::UpsertBookingLink;
use beautyboss_db::store::{BookingLinkStore, UserStore};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, NoticeResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BookingLinkView {
    pub slug: String,
    pub url: String,
    pub is_active: bool,
    pub welcome_message: String,
    /// False while the link is only a suggestion.
    pub saved: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingLinkRequest {
    pub slug: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub welcome_message: Option<String>,
}

fn default_active() -> bool {
    true
}

/// GET /api/v1/booking-link
///
/// Before the owner saves one, a link derived from their name is suggested.
pub async fn get_booking_link(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let base = &state.config.public_booking_base_url;

    let view = match state.store.find_booking_link(auth.user_id).await? {
        Some(link) => BookingLinkView {
            url: booking_url(base, &link.slug),
            slug: link.slug,
            is_active: link.is_active,
            welcome_message: link.welcome_message,
            saved: true,
        },
        None => {
            let user = state
                .store
                .find_user_by_id(auth.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
                })?;
            let slug = suggest_slug(&user.name);
            BookingLinkView {
                url: booking_url(base, &slug),
                slug,
                is_active: true,
                welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
                saved: false,
            }
        }
    };

    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/booking-link
pub async fn update_booking_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateBookingLinkRequest>,
) -> AppResult<impl IntoResponse> {
    let slug = validate_slug(&input.slug)?;
    let welcome_message = input
        .welcome_message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string());

    let link = state
        .store
        .upsert_booking_link(
            auth.user_id,
            &UpsertBookingLink {
                slug,
                is_active: input.is_active,
                welcome_message,
            },
        )
        .await?;

    tracing::info!(user_id = auth.user_id, slug = %link.slug, "Booking link updated");

    let view = BookingLinkView {
        url: booking_url(&state.config.public_booking_base_url, &link.slug),
        slug: link.slug,
        is_active: link.is_active,
        welcome_message: link.welcome_message,
        saved: true,
    };
    Ok(Json(NoticeResponse::new(
        view,
        Notice::success("Link de agendamento atualizado!"),
    )))
}
