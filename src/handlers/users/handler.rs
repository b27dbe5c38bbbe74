//! User handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, services::UserService, state::AppState,
};

use super::{
    request::{UpdateProfileRequest, UpdateSkillsRequest},
    response::{ProfileResponse, PublicProfileResponse},
};

/// Get a user's public profile
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PublicProfileResponse>> {
    let user = UserService::get_user_by_id(state.db(), &id).await?;

    Ok(Json(user.into()))
}

/// Update own profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    payload.validate()?;

    let user = UserService::update_profile(
        state.db(),
        &auth_user.id,
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        payload.avatar.as_deref(),
        payload.bio.as_deref(),
        payload.location.as_deref(),
    )
    .await?;

    Ok(Json(ProfileResponse { user }))
}

/// Replace own skill collections
pub async fn update_skills(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateSkillsRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserService::update_skills(
        state.db(),
        &auth_user.id,
        payload.skills_to_teach,
        payload.skills_to_learn,
    )
    .await?;

    Ok(Json(ProfileResponse { user }))
}
