//! Gamification handler implementations

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{
        GamificationService,
        gamification_service::{GamificationProfile, LeaderboardEntry, LeaderboardKind},
    },
    state::AppState,
};

use super::request::LeaderboardQuery;

/// Get the current user's progression profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<GamificationProfile>> {
    let profile = GamificationService::profile(state.db(), &auth_user.id).await?;

    Ok(Json(profile))
}

/// Get the leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    let kind = match query.kind.as_deref() {
        None => LeaderboardKind::Level,
        Some(s) => LeaderboardKind::parse(s)
            .ok_or_else(|| AppError::Validation(format!("Unknown leaderboard kind: {}", s)))?,
    };
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let entries =
        GamificationService::leaderboard(state.db(), state.cache(), kind, limit).await?;

    Ok(Json(entries))
}
