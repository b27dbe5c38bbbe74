//! Notification repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Notification, NotificationEvent},
};

/// Repository for notification database operations
pub struct NotificationRepository;

impl NotificationRepository {
    /// Persist an event for a user
    pub async fn create(
        pool: &PgPool,
        user_id: &Uuid,
        event: &NotificationEvent,
    ) -> AppResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications
                (user_id, kind, title, message, data, related_entity_kind, related_entity_id, action_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(event.kind)
        .bind(&event.title)
        .bind(&event.message)
        .bind(&event.data)
        .bind(event.related.map(|(kind, _)| kind))
        .bind(event.related.map(|(_, id)| id))
        .bind(event.action_url.as_deref())
        .fetch_one(pool)
        .await?;

        Ok(notification)
    }

    /// Notifications for a user, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Uuid,
        unread_only: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Notification>, i64)> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR is_read = FALSE)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR is_read = FALSE)
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_one(pool)
        .await?;

        Ok((notifications, total))
    }

    /// Unread count for a user
    pub async fn unread_count(pool: &PgPool, user_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE"#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Mark one notification read; scoped to the owner
    pub async fn mark_read(
        pool: &PgPool,
        id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(notification)
    }

    /// Mark everything read for a user, returning how many flipped
    pub async fn mark_all_read(pool: &PgPool, user_id: &Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            r#"UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE"#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
