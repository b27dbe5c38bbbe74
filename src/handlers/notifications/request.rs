//! Notification request DTOs

use serde::Deserialize;

/// Notification listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub unread_only: Option<bool>,
}
