//! Referral handler implementations

use axum::{Json, extract::State};

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{ReferralService, UserService, referral_service::ReferralStats},
    state::AppState,
};

use super::response::ReferralCodeResponse;

/// Get the current user's referral code and earnings
pub async fn get_referral_code(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ReferralCodeResponse>> {
    let user = UserService::get_user_by_id(state.db(), &auth_user.id).await?;
    let (referral_code, referral_count, total_earned) = ReferralService::code_summary(&user);

    Ok(Json(ReferralCodeResponse {
        referral_code,
        referral_count,
        total_earned,
    }))
}

/// Get referral statistics
pub async fn get_referral_stats(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ReferralStats>> {
    let user = UserService::get_user_by_id(state.db(), &auth_user.id).await?;
    let stats = ReferralService::stats(state.db(), &user).await?;

    Ok(Json(stats))
}
