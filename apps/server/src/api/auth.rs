use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use spendwise_core::users::UserProfile;
use spendwise_core::Error as CoreError;

use crate::auth::MaybeUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in_hours: i64,
    user: UserProfile,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthStatus {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    if body.password.len() < MIN_PASSWORD_LEN {
        return Err(CoreError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        ))
        .into());
    }

    let password_hash = state.auth.hash_password(&body.password)?;
    let user = state.user_service.register(&body.email, password_hash).await?;
    let access_token = state.auth.issue_token(&user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in_hours: state.auth.token_ttl_hours(),
            user: UserProfile::from(user),
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .user_service
        .get_user_by_email(&body.email)?
        .ok_or(ApiError::InvalidCredentials)?;

    if !state.auth.verify_password(&user.password_hash, &body.password) {
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.auth.issue_token(&user.id)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in_hours: state.auth.token_ttl_hours(),
        user: UserProfile::from(user),
    }))
}

async fn status(MaybeUser(user): MaybeUser) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: user.is_some(),
        user_id: user,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/status", get(status))
}
