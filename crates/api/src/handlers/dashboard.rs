//! Handlers for the dashboard shell, the overview figures and the report
//! catalog.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_core::dashboard::{summarize, REPORT_CARDS};
use beautyboss_core::error::CoreError;
use beautyboss_core::navigation::{dashboard_shell, resolve_route, DASHBOARD_ROOT, ROUTES};
use beautyboss_db::store::{AppointmentStore, ClientStore, SetupStore, UserStore};
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PathParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/shell?path=
///
/// Navigation with the active item, page title and avatar initials.
pub async fn shell(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PathParams>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let path = params.path.as_deref().unwrap_or(DASHBOARD_ROOT);

    Ok(Json(DataResponse {
        data: dashboard_shell(path, &user.name),
    }))
}

/// GET /api/v1/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let start_of_today = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or(now);

    let appointments = state
        .store
        .list_appointment_details(auth.user_id, start_of_today, None)
        .await?;
    let facts: Vec<_> = appointments.iter().map(|a| a.to_fact()).collect();
    let total_clients = state.store.count_clients(auth.user_id).await?;
    let services_available = state.store.count_services(auth.user_id).await?;

    Ok(Json(DataResponse {
        data: summarize(now, &facts, total_clients, services_available),
    }))
}

/// GET /api/v1/dashboard/reports
pub async fn reports(_auth: AuthUser) -> impl IntoResponse {
    Json(DataResponse { data: REPORT_CARDS })
}

/// GET /api/v1/dashboard/routes
pub async fn routes() -> impl IntoResponse {
    Json(DataResponse { data: ROUTES })
}

/// GET /api/v1/dashboard/routes/resolve?path=
pub async fn resolve(Query(params): Query<PathParams>) -> impl IntoResponse {
    let path = params.path.unwrap_or_else(|| "/".to_string());
    Json(DataResponse {
        data: resolve_route(&path),
    })
}
