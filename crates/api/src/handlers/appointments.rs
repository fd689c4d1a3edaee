//! Handlers for the owner's agenda.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_core::appointment::AppointmentStatus;
use beautyboss_core::error::CoreError;
use beautyboss_core::types::{DbId, Timestamp};
use beautyboss_db::models::appointment::CreateAppointment;
use beautyboss_db::store::{AppointmentStore, ClientStore, SetupStore};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AgendaParams {
    /// `YYYY-MM-DD` (UTC). Defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: DbId,
    pub professional_id: DbId,
    pub service_id: DbId,
    pub starts_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

/// GET /api/v1/appointments?date=
pub async fn list_appointments(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AgendaParams>,
) -> AppResult<impl IntoResponse> {
    let day = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let from = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date {day}")))?
        .and_utc();

    let appointments = state
        .store
        .list_appointment_details(auth.user_id, from, Some(from + Duration::days(1)))
        .await?;
    Ok(Json(DataResponse { data: appointments }))
}

/// POST /api/v1/appointments
///
/// Client, professional and service must all belong to the caller.
pub async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateAppointmentRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .store
        .find_client(auth.user_id, input.client_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", input.client_id))?;

    let staff = state.store.list_professionals(auth.user_id).await?;
    if !staff.iter().any(|p| p.id == input.professional_id) {
        return Err(CoreError::not_found("Professional", input.professional_id).into());
    }
    let services = state.store.list_services(auth.user_id).await?;
    if !services.iter().any(|s| s.id == input.service_id) {
        return Err(CoreError::not_found("Service", input.service_id).into());
    }

    let appointment = state
        .store
        .create_appointment(
            auth.user_id,
            &CreateAppointment {
                client_id: input.client_id,
                professional_id: input.professional_id,
                service_id: input.service_id,
                starts_at: input.starts_at,
            },
        )
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        appointment_id = appointment.id,
        starts_at = %appointment.starts_at,
        "Appointment created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: appointment })))
}

/// PUT /api/v1/appointments/{id}/status
///
/// Only scheduled appointments can be completed or canceled.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let current = state
        .store
        .find_appointment(auth.user_id, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Appointment", id))?;

    AppointmentStatus::from_str_db(&current.status)?.validate_transition(input.status)?;

    let updated = state
        .store
        .update_appointment_status(auth.user_id, id, input.status)
        .await?
        .ok_or_else(|| CoreError::not_found("Appointment", id))?;

    tracing::info!(
        user_id = auth.user_id,
        appointment_id = id,
        status = input.status.as_str(),
        "Appointment status updated"
    );
    Ok(Json(DataResponse { data: updated }))
}
