//! Handlers for the settings page: account profile and business details.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_core::error::CoreError;
use beautyboss_core::notice::Notice;
use beautyboss_db::models::profile::UpdateBusinessDetails;
use beautyboss_db::models::user::{UpdateAccount, UserResponse};
use beautyboss_db::store::{SetupStore, UserStore};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::NoticeResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileSettingsRequest {
    #[validate(length(min = 2, message = "Nome deve ter pelo menos 2 caracteres"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BusinessSettingsRequest {
    #[validate(length(min = 2, message = "Nome do negócio deve ter pelo menos 2 caracteres"))]
    pub business_name: String,
    #[validate(length(min = 5, message = "Endereço deve ter pelo menos 5 caracteres"))]
    pub address: String,
    #[validate(length(min = 8, message = "Telefone deve ter pelo menos 8 dígitos"))]
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileSettings {
    pub user: UserResponse,
    pub bio: Option<String>,
}

/// PUT /api/v1/settings/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProfileSettingsRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let bio = input
        .bio
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());
    let user = state
        .store
        .update_account(
            auth.user_id,
            &UpdateAccount {
                name: input.name.trim().to_string(),
                email: input.email.trim().to_string(),
                bio: bio.clone(),
            },
        )
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth.user_id))?;

    tracing::info!(user_id = auth.user_id, "Profile settings updated");
    Ok(Json(NoticeResponse::new(
        ProfileSettings {
            user: UserResponse::from(&user),
            bio,
        },
        Notice::success("Perfil atualizado com sucesso!"),
    )))
}

/// PUT /api/v1/settings/business
pub async fn update_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BusinessSettingsRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let profile = state
        .store
        .update_business_details(
            auth.user_id,
            &UpdateBusinessDetails {
                business_name: input.business_name.trim().to_string(),
                address: input.address.trim().to_string(),
                phone: input.phone.trim().to_string(),
            },
        )
        .await?;

    tracing::info!(user_id = auth.user_id, "Business settings updated");
    Ok(Json(NoticeResponse::new(
        profile,
        Notice::success("Dados do negócio atualizados!"),
    )))
}
