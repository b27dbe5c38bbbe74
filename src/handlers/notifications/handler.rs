//! Notification handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::NotificationService,
    state::AppState,
};

use super::{
    request::ListNotificationsQuery,
    response::{MarkAllReadResponse, NotificationResponse, NotificationsListResponse},
};

/// List the current user's notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListNotificationsQuery>,
) -> AppResult<Json<NotificationsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let (notifications, total, unread_count) = NotificationService::list(
        state.db(),
        &auth_user.id,
        query.unread_only.unwrap_or(false),
        page,
        per_page,
    )
    .await?;

    Ok(Json(NotificationsListResponse {
        notifications,
        total,
        unread_count,
        page,
        per_page,
    }))
}

/// Mark one notification as read
pub async fn mark_read(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NotificationResponse>> {
    let notification = NotificationService::mark_read(state.db(), &auth_user.id, &id).await?;

    Ok(Json(NotificationResponse { notification }))
}

/// Mark all notifications as read
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MarkAllReadResponse>> {
    let marked = NotificationService::mark_all_read(state.db(), &auth_user.id).await?;

    Ok(Json(MarkAllReadResponse { marked }))
}
