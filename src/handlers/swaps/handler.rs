//! Swap handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::SwapStatus,
    services::{SwapService, UserService, swap_service::SwapTransition},
    state::AppState,
};

use super::{
    request::{CreateSwapRequest, UpdateSwapRequest},
    response::{SwapResponse, SwapsListResponse},
};

/// Create a new swap request
pub async fn create_swap(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateSwapRequest>,
) -> AppResult<(StatusCode, Json<SwapResponse>)> {
    payload.validate()?;

    let requester = UserService::get_user_by_id(state.db(), &auth_user.id).await?;

    let swap = SwapService::create_swap(
        state.db(),
        state.notifier(),
        &requester,
        &payload.recipient_id,
        &payload.skill_offered,
        &payload.skill_requested,
        payload.message.as_deref(),
        payload.duration.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(SwapResponse { swap })))
}

/// List the current user's swaps
pub async fn list_swaps(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<SwapsListResponse>> {
    let swaps = SwapService::list_swaps(state.db(), &auth_user.id).await?;
    let total = swaps.len();

    Ok(Json(SwapsListResponse { swaps, total }))
}

/// Get a single swap
pub async fn get_swap(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SwapResponse>> {
    let swap = SwapService::get_swap(state.db(), &auth_user.id, &id).await?;

    Ok(Json(SwapResponse { swap }))
}

/// Update swap status (accept, reject, cancel, complete) and/or schedule
pub async fn update_swap(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSwapRequest>,
) -> AppResult<Json<SwapResponse>> {
    payload.validate()?;

    let status = payload
        .status
        .as_deref()
        .map(|s| {
            SwapStatus::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", s)))
        })
        .transpose()?;

    let swap = SwapService::update_swap(
        state.db(),
        state.notifier(),
        state.clock().now(),
        &auth_user.id,
        &id,
        SwapTransition {
            status,
            scheduled_date: payload.scheduled_date,
            duration: payload.duration,
            notes: payload.notes,
        },
    )
    .await?;

    Ok(Json(SwapResponse { swap }))
}
