//! Wallet service
//!
//! Skillcoins are earned only through platform activity; there is no
//! purchase path. Spends are premium-feature debits against the ledger.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{TransactionRepository, UserRepository},
    error::{AppError, AppResult},
    models::Transaction,
    services::reward_service::RewardService,
};

/// Aggregated wallet view
#[derive(Debug, serde::Serialize)]
pub struct WalletSummary {
    pub skillcoins: i64,
    pub total_earned: i64,
    pub total_spent: i64,
    pub this_month_earnings: i64,
}

/// Wallet service
pub struct WalletService;

impl WalletService {
    /// Wallet summary: current balance plus ledger aggregates
    pub async fn summary(
        pool: &PgPool,
        user_id: &Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<WalletSummary> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let totals = TransactionRepository::totals_for_user(pool, user_id).await?;

        let start_of_month = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        let this_month = TransactionRepository::earned_since(pool, user_id, start_of_month).await?;

        Ok(WalletSummary {
            skillcoins: user.skillcoins,
            total_earned: totals.total_earned,
            total_spent: totals.total_spent,
            this_month_earnings: this_month,
        })
    }

    /// Spend skillcoins on a premium feature
    pub async fn spend(
        pool: &PgPool,
        user_id: &Uuid,
        amount: i64,
        description: &str,
    ) -> AppResult<Transaction> {
        RewardService::spend_skillcoins(pool, user_id, amount, description).await
    }

    /// Ledger history, newest first
    pub async fn transactions(
        pool: &PgPool,
        user_id: &Uuid,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<Transaction>, i64)> {
        let offset = ((page - 1) * per_page) as i64;
        let limit = per_page as i64;

        TransactionRepository::list_for_user(pool, user_id, offset, limit).await
    }
}
