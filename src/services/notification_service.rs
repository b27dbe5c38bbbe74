//! Notification dispatch and the notification sink
//!
//! Core services emit `NotificationEvent`s through the `Notifier` trait.
//! Delivery persists the event and fans it out on the realtime channel;
//! both halves are best-effort and never fail the operation that produced
//! the event. Dispatch runs as a detached task queued after the producing
//! operation has committed.

use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::NotificationRepository,
    error::{AppError, AppResult},
    models::{Notification, NotificationEvent},
};

/// Abstract notification sink the core calls into
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: Uuid, event: NotificationEvent) -> AppResult<()>;
}

/// Opaque publish/subscribe channel for realtime delivery.
/// Best-effort: no delivery guarantee, no cross-room ordering.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RealtimePublisher: Send + Sync {
    async fn publish(
        &self,
        room: &str,
        event_name: &str,
        payload: serde_json::Value,
    ) -> AppResult<()>;
}

/// Realtime channel backed by Redis PUBLISH
pub struct RedisPublisher {
    redis: ConnectionManager,
}

impl RedisPublisher {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RealtimePublisher for RedisPublisher {
    async fn publish(
        &self,
        room: &str,
        event_name: &str,
        payload: serde_json::Value,
    ) -> AppResult<()> {
        let mut conn = self.redis.clone();
        let channel = format!("realtime:{}", room);
        let message = serde_json::json!({ "event": event_name, "payload": payload }).to_string();

        conn.publish::<_, _, ()>(channel, message).await?;
        Ok(())
    }
}

/// Production notifier: persists to the notification store, then pushes
/// to the user's realtime room. A failed push is logged, not propagated.
pub struct PersistentNotifier {
    db: PgPool,
    publisher: Arc<dyn RealtimePublisher>,
}

impl PersistentNotifier {
    pub fn new(db: PgPool, publisher: Arc<dyn RealtimePublisher>) -> Self {
        Self { db, publisher }
    }
}

#[async_trait]
impl Notifier for PersistentNotifier {
    async fn notify(&self, user_id: Uuid, event: NotificationEvent) -> AppResult<()> {
        let notification = NotificationRepository::create(&self.db, &user_id, &event).await?;

        let payload = serde_json::to_value(&notification)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

        if let Err(e) = self
            .publisher
            .publish(&user_id.to_string(), "new_notification", payload)
            .await
        {
            tracing::warn!(%user_id, error = %e, "realtime publish failed");
        }

        Ok(())
    }
}

/// Queue a notification as a detached task. Used on paths where the
/// response must not wait for (or fail on) delivery.
pub fn notify_detached(notifier: Arc<dyn Notifier>, user_id: Uuid, event: NotificationEvent) {
    let kind = event.kind;
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(user_id, event).await {
            tracing::warn!(%user_id, kind, error = %e, "notification dispatch failed");
        }
    });
}

/// Read-side operations over the notification store
pub struct NotificationService;

impl NotificationService {
    /// List a user's notifications with the unread count
    pub async fn list(
        pool: &PgPool,
        user_id: &Uuid,
        unread_only: bool,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<Notification>, i64, i64)> {
        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        let (notifications, total) =
            NotificationRepository::list_for_user(pool, user_id, unread_only, offset, limit)
                .await?;
        let unread = NotificationRepository::unread_count(pool, user_id).await?;

        Ok((notifications, total, unread))
    }

    /// Mark one notification read
    pub async fn mark_read(pool: &PgPool, user_id: &Uuid, id: &Uuid) -> AppResult<Notification> {
        NotificationRepository::mark_read(pool, id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }

    /// Mark all notifications read
    pub async fn mark_all_read(pool: &PgPool, user_id: &Uuid) -> AppResult<u64> {
        NotificationRepository::mark_all_read(pool, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_notifier_receives_event() {
        let mut notifier = MockNotifier::new();
        let user_id = Uuid::new_v4();

        notifier
            .expect_notify()
            .withf(move |uid, event| *uid == user_id && event.kind == "swap_request")
            .times(1)
            .returning(|_, _| Ok(()));

        let event = NotificationEvent::new("swap_request", "New Swap Request", "hello");
        notifier.notify(user_id, event).await.unwrap();
    }
}
