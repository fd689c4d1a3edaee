//! Handlers for the owner's client list.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_core::error::CoreError;
use beautyboss_core::pagination::{
    clamp_limit, clamp_offset, normalize_search, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use beautyboss_core::types::DbId;
use beautyboss_db::models::client::{ClientQuery, CreateClient};
use beautyboss_db::store::{ClientStore, SetupStore};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 2, message = "Nome deve ter pelo menos 2 caracteres"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 8, message = "Telefone deve ter pelo menos 8 dígitos"))]
    pub phone: String,
    pub professional_id: Option<DbId>,
}

/// GET /api/v1/clients?search=&limit=&offset=
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = ClientQuery {
        search: normalize_search(params.search.as_deref()),
        limit: clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let clients = state.store.list_clients(auth.user_id, &query).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// POST /api/v1/clients
///
/// A linked professional must belong to the caller.
pub async fn create_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateClientRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if let Some(professional_id) = input.professional_id {
        let staff = state.store.list_professionals(auth.user_id).await?;
        if !staff.iter().any(|p| p.id == professional_id) {
            return Err(CoreError::not_found("Professional", professional_id).into());
        }
    }

    let client = state
        .store
        .create_client(
            auth.user_id,
            &CreateClient {
                name: input.name.trim().to_string(),
                email: input.email.trim().to_string(),
                phone: input.phone.trim().to_string(),
                professional_id: input.professional_id,
            },
        )
        .await?;

    tracing::info!(user_id = auth.user_id, client_id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}
