//! Transaction repository
//!
//! The ledger is append-only: entries are inserted and read, never
//! updated or deleted.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Transaction, TransactionKind, TransactionSource},
};

/// Aggregated wallet totals derived from the ledger
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct LedgerTotals {
    pub total_earned: i64,
    pub total_spent: i64,
}

/// Repository for ledger database operations
pub struct TransactionRepository;

impl TransactionRepository {
    /// Append a ledger entry with its post-application balance snapshot
    pub async fn create(
        pool: &PgPool,
        user_id: &Uuid,
        kind: TransactionKind,
        amount: i64,
        description: &str,
        source: Option<TransactionSource>,
        balance: i64,
    ) -> AppResult<Transaction> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (user_id, kind, amount, description, source_kind, source_id, balance)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(amount)
        .bind(description)
        .bind(source.map(|s| s.kind))
        .bind(source.map(|s| s.id))
        .bind(balance)
        .fetch_one(pool)
        .await?;

        Ok(transaction)
    }

    /// Ledger history for a user, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Transaction>, i64)> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM transactions WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok((transactions, total))
    }

    /// Lifetime earned/spent totals for a user
    pub async fn totals_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<LedgerTotals> {
        let totals = sqlx::query_as::<_, LedgerTotals>(
            r#"
            SELECT
                COALESCE(SUM(amount) FILTER (WHERE kind <> 'spend'), 0)::BIGINT as total_earned,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'spend'), 0)::BIGINT as total_spent
            FROM transactions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(totals)
    }

    /// Credits accumulated since the given instant
    pub async fn earned_since(
        pool: &PgPool,
        user_id: &Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<i64> {
        let earned: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount) FILTER (WHERE kind <> 'spend'), 0)::BIGINT
            FROM transactions
            WHERE user_id = $1 AND created_at >= $2
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(pool)
        .await?;

        Ok(earned)
    }
}
