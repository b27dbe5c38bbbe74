//! Notification model - the user-facing event sink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Notification database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub related_entity_kind: Option<String>,
    pub related_entity_id: Option<Uuid>,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A domain event to be delivered to one user.
///
/// Core services hand these to the notifier; delivery is best-effort and
/// detached from the operation that produced the event.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub related: Option<(&'static str, Uuid)>,
    pub action_url: Option<String>,
}

impl NotificationEvent {
    pub fn new(kind: &'static str, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            data: serde_json::Value::Null,
            related: None,
            action_url: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_related(mut self, kind: &'static str, id: Uuid) -> Self {
        self.related = Some((kind, id));
        self
    }

    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}
