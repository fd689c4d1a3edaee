//! Handlers for the `/auth` resource (signup, login, refresh, logout,
//! session restore).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use beautyboss_core::error::CoreError;
use beautyboss_core::notice::Notice;
use beautyboss_db::models::session::CreateSession;
use beautyboss_db::models::user::{CreateUser, User, UserResponse};
use beautyboss_db::store::{SessionStore, SetupStore, UserStore};
use beautyboss_events::{event_types, PlatformEvent};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, NoticeResponse};
use crate::state::AppState;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, message = "Nome deve ter pelo menos 2 caracteres"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 8, message = "WhatsApp deve ter pelo menos 8 dígitos"))]
    pub whatsapp: String,
    #[validate(length(min = 8, message = "Senha deve ter pelo menos 8 caracteres"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by signup, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// What the front-end needs on application start.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: UserResponse,
    pub onboarded: bool,
    pub plan_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub revoked_sessions: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(&CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            whatsapp: input.whatsapp.trim().to_string(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User signed up");
    state
        .event_bus
        .publish(PlatformEvent::new(event_types::SIGNED_UP).with_owner(user.id));

    let response = create_auth_response(&state, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(NoticeResponse::new(
            response,
            Notice::success("Conta criada com sucesso!"),
        )),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    let user = state
        .store
        .find_user_by_email(input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        state.store.increment_failed_login(user.id).await?;

        if user.failed_login_count + 1 >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            state.store.lock_account(user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, "Account locked after repeated failed logins");
        }

        return Err(invalid());
    }

    state.store.record_successful_login(user.id).await?;
    tracing::info!(user_id = user.id, "User signed in");
    state
        .event_bus
        .publish(PlatformEvent::new(event_types::SIGNED_IN).with_owner(user.id));

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(NoticeResponse::new(
        response,
        Notice::success("Login realizado com sucesso!"),
    )))
}

/// POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented one is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = state
        .store
        .find_active_session(&token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    state.store.revoke_session(session.id).await?;

    let user = state
        .store
        .find_user_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revokes every session of the caller.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let revoked_sessions = state.store.revoke_all_sessions(auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, revoked_sessions, "User signed out");
    state
        .event_bus
        .publish(PlatformEvent::new(event_types::SIGNED_OUT).with_owner(auth.user_id));

    Ok(Json(NoticeResponse::new(
        LogoutResponse { revoked_sessions },
        Notice::info("Você saiu da sua conta."),
    )))
}

/// GET /api/v1/auth/session
pub async fn session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let profile = state.store.find_profile(auth.user_id).await?;

    Ok(Json(DataResponse {
        data: SessionInfo {
            user: UserResponse::from(&user),
            onboarded: profile.as_ref().is_some_and(|p| p.onboarded_at.is_some()),
            plan_id: profile.and_then(|p| p.plan_id),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue tokens, persist the refresh session and build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    state
        .store
        .create_session(&CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        })
        .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
