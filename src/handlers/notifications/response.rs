//! Notification response DTOs

use serde::Serialize;

use crate::models::Notification;

/// Notification list response
#[derive(Debug, Serialize)]
pub struct NotificationsListResponse {
    pub notifications: Vec<Notification>,
    pub total: i64,
    pub unread_count: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Single notification response
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub notification: Notification,
}

/// Mark-all-read response
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked: u64,
}
