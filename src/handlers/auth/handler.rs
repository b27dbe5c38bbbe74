//! Authentication handler implementations

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{AuthService, UserService},
    state::AppState,
};

use super::{
    request::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
    response::{AuthResponse, CurrentUserResponse, TokenResponse},
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let user = AuthService::register(
        state.db(),
        state.notifier(),
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.password,
        payload.referral_code.as_deref(),
    )
    .await?;

    let (token, refresh_token, expires_in) =
        AuthService::issue_tokens(state.redis(), state.config(), &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user,
            token,
            refresh_token,
            expires_in,
        }),
    ))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, token, refresh_token, expires_in) = AuthService::login(
        state.db(),
        state.redis(),
        state.config(),
        state.clock().now(),
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        user,
        token,
        refresh_token,
        expires_in,
    }))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (token, refresh_token, expires_in) = AuthService::refresh_token(
        state.db(),
        state.redis(),
        state.config(),
        &payload.refresh_token,
    )
    .await?;

    Ok(Json(TokenResponse {
        token,
        refresh_token,
        expires_in,
    }))
}

/// Get the current user's profile
pub async fn current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = UserService::get_user_by_id(state.db(), &auth_user.id).await?;

    Ok(Json(CurrentUserResponse { user }))
}

/// Revoke the presented refresh token
pub async fn logout(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Json(payload): Json<LogoutRequest>,
) -> AppResult<StatusCode> {
    AuthService::revoke_token(state.redis(), &payload.refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
