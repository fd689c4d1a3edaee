//! Read views of what onboarding saved: services, staff and opening hours.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_db::models::schedule::to_weekly_schedule;
use beautyboss_db::store::SetupStore;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
pub async fn list_services(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let services = state.store.list_services(auth.user_id).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/professionals
pub async fn list_professionals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let professionals = state.store.list_professionals(auth.user_id).await?;
    Ok(Json(DataResponse {
        data: professionals,
    }))
}

/// GET /api/v1/schedule
///
/// Empty until onboarding has been saved.
pub async fn get_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let rows = state.store.list_schedule(auth.user_id).await?;
    Ok(Json(DataResponse {
        data: to_weekly_schedule(&rows),
    }))
}
