//! Swap repository
//!
//! The completion claim is a single conditional update: whichever caller
//! flips `skillcoins_awarded` first wins, and every other caller sees no
//! row returned. That guard, not the status column, is what makes reward
//! distribution run at most once per swap.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Swap};

/// Fields updatable on an interactive swap transition
#[derive(Debug, Default)]
pub struct SwapUpdate<'a> {
    pub status: Option<&'a str>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub auto_expire_at: Option<DateTime<Utc>>,
    pub duration: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Repository for swap database operations
pub struct SwapRepository;

impl SwapRepository {
    /// Create a new swap request
    pub async fn create(
        pool: &PgPool,
        requester: &Uuid,
        recipient: &Uuid,
        skill_offered: &str,
        skill_requested: &str,
        description: Option<&str>,
        duration: &str,
    ) -> AppResult<Swap> {
        let swap = sqlx::query_as::<_, Swap>(
            r#"
            INSERT INTO swaps (requester, recipient, skill_offered, skill_requested, description, duration)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(requester)
        .bind(recipient)
        .bind(skill_offered)
        .bind(skill_requested)
        .bind(description)
        .bind(duration)
        .fetch_one(pool)
        .await?;

        Ok(swap)
    }

    /// Find swap by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Swap>> {
        let swap = sqlx::query_as::<_, Swap>(r#"SELECT * FROM swaps WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(swap)
    }

    /// All swaps the user participates in, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Swap>> {
        let swaps = sqlx::query_as::<_, Swap>(
            r#"
            SELECT * FROM swaps
            WHERE requester = $1 OR recipient = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(swaps)
    }

    /// Apply an interactive update (status and/or scheduling fields).
    ///
    /// Conditional on the status the caller validated against, so a
    /// concurrent transition surfaces as `None` instead of silently
    /// overwriting it.
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        expected_status: &str,
        update: SwapUpdate<'_>,
    ) -> AppResult<Option<Swap>> {
        let swap = sqlx::query_as::<_, Swap>(
            r#"
            UPDATE swaps
            SET
                status = COALESCE($3, status),
                scheduled_date = COALESCE($4, scheduled_date),
                start_time = COALESCE($5, start_time),
                end_time = COALESCE($6, end_time),
                auto_expire_at = COALESCE($7, auto_expire_at),
                duration = COALESCE($8, duration),
                description = COALESCE($9, description),
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected_status)
        .bind(update.status)
        .bind(update.scheduled_date)
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(update.auto_expire_at)
        .bind(update.duration)
        .bind(update.description)
        .fetch_optional(pool)
        .await?;

        Ok(swap)
    }

    /// Atomically claim completion of a swap.
    ///
    /// Returns the updated row when this caller won the claim, or `None`
    /// when rewards were already awarded (by a concurrent transition or an
    /// earlier completion). Callers must only distribute rewards on `Some`.
    pub async fn claim_completion(
        pool: &PgPool,
        id: &Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Swap>> {
        let swap = sqlx::query_as::<_, Swap>(
            r#"
            UPDATE swaps
            SET
                status = 'completed',
                completed_at = $2,
                skillcoins_awarded = TRUE,
                updated_at = NOW()
            WHERE id = $1
              AND skillcoins_awarded = FALSE
              AND status IN ('scheduled', 'active')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(swap)
    }

    /// Scheduled/active swaps past their expiry that still owe rewards
    pub async fn find_expired(
        pool: &PgPool,
        now: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<Swap>> {
        let swaps = sqlx::query_as::<_, Swap>(
            r#"
            SELECT * FROM swaps
            WHERE status IN ('scheduled', 'active')
              AND auto_expire_at <= $1
              AND skillcoins_awarded = FALSE
            ORDER BY auto_expire_at
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(swaps)
    }
}
