//! Reward ledger
//!
//! Skillcoin and XP accounting. Every grant or spend is one atomic
//! balance mutation followed by an append-only ledger entry carrying the
//! post-application balance snapshot, so the ledger can be replayed to
//! any point in time without re-aggregating.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{XP_PER_LEVEL_UNIT, rewards},
    db::repositories::{TransactionRepository, UserRepository},
    error::{AppError, AppResult},
    models::{Transaction, TransactionKind, TransactionSource},
};

/// Outcome of an XP grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub leveled_up: bool,
    pub new_level: i32,
}

/// Reward ledger service
pub struct RewardService;

impl RewardService {
    /// Level derived from XP: `max(1, floor(sqrt(xp / 50)) + 1)`.
    /// Monotonically non-decreasing in xp.
    pub fn compute_level(xp: i64) -> i32 {
        let units = xp.max(0) as f64 / XP_PER_LEVEL_UNIT as f64;
        let level = units.sqrt().floor() as i32 + 1;
        level.max(1)
    }

    /// XP at which the given level begins
    pub fn xp_for_level(level: i32) -> i64 {
        let steps = (level.max(1) - 1) as i64;
        XP_PER_LEVEL_UNIT * steps * steps
    }

    /// Total completion reward: `base + floor(base * (multiplier - 1))`
    pub fn swap_reward(base: i64, multiplier: f64) -> i64 {
        let bonus = (base as f64 * (multiplier - 1.0)).floor() as i64;
        base + bonus
    }

    /// One-time milestone bonus due when `completed_swaps` lands exactly
    /// on a threshold
    pub fn milestone_bonus(completed_swaps: i32) -> Option<i64> {
        rewards::SWAP_MILESTONES
            .iter()
            .find(|(threshold, _)| *threshold == completed_swaps)
            .map(|(_, bonus)| *bonus)
    }

    /// Add XP to an account and raise its level if the new total crosses
    /// a threshold. XP never decreases; negative amounts are rejected.
    pub async fn grant_xp(pool: &PgPool, user_id: &Uuid, amount: i64) -> AppResult<LevelChange> {
        if amount < 0 {
            return Err(AppError::Validation(
                "XP amount cannot be negative".to_string(),
            ));
        }

        let (xp, level) = UserRepository::add_xp(pool, user_id, amount)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let new_level = Self::compute_level(xp);
        if new_level > level {
            UserRepository::raise_level(pool, user_id, new_level).await?;
            return Ok(LevelChange {
                leveled_up: true,
                new_level,
            });
        }

        Ok(LevelChange {
            leveled_up: false,
            new_level: level,
        })
    }

    /// Credit skillcoins and append the matching ledger entry.
    /// The entry's `balance` is the balance immediately after the credit.
    pub async fn grant_skillcoins(
        pool: &PgPool,
        user_id: &Uuid,
        amount: i64,
        kind: TransactionKind,
        description: &str,
        source: Option<TransactionSource>,
    ) -> AppResult<Transaction> {
        if amount <= 0 {
            return Err(AppError::Validation(
                "Grant amount must be positive".to_string(),
            ));
        }

        let balance = UserRepository::add_skillcoins(pool, user_id, amount)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        TransactionRepository::create(pool, user_id, kind, amount, description, source, balance)
            .await
    }

    /// Debit skillcoins. The decrement is conditional on the balance
    /// covering the amount; an uncovered spend leaves the balance
    /// untouched and surfaces `InsufficientFunds`.
    pub async fn spend_skillcoins(
        pool: &PgPool,
        user_id: &Uuid,
        amount: i64,
        description: &str,
    ) -> AppResult<Transaction> {
        if amount <= 0 {
            return Err(AppError::Validation(
                "Spend amount must be positive".to_string(),
            ));
        }

        let balance = UserRepository::try_spend_skillcoins(pool, user_id, amount)
            .await?
            .ok_or(AppError::InsufficientFunds)?;

        TransactionRepository::create(
            pool,
            user_id,
            TransactionKind::Spend,
            amount,
            description,
            None,
            balance,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_level_base_cases() {
        assert_eq!(RewardService::compute_level(0), 1);
        assert_eq!(RewardService::compute_level(49), 1);
        assert_eq!(RewardService::compute_level(50), 2);
        assert_eq!(RewardService::compute_level(199), 2);
        assert_eq!(RewardService::compute_level(200), 3);
        assert_eq!(RewardService::compute_level(450), 4);
    }

    #[test]
    fn test_compute_level_monotonic() {
        let mut prev = 0;
        for xp in 0..=10_000 {
            let level = RewardService::compute_level(xp);
            assert!(level >= 1);
            assert!(level >= prev, "level decreased at xp={}", xp);
            prev = level;
        }
    }

    #[test]
    fn test_compute_level_negative_clamped() {
        assert_eq!(RewardService::compute_level(-100), 1);
    }

    #[test]
    fn test_xp_for_level_inverts_compute_level() {
        for level in 1..=20 {
            let xp = RewardService::xp_for_level(level);
            assert_eq!(RewardService::compute_level(xp), level);
            if xp > 0 {
                assert_eq!(RewardService::compute_level(xp - 1), level - 1);
            }
        }
    }

    #[test]
    fn test_swap_reward_default_multiplier() {
        assert_eq!(RewardService::swap_reward(50, 1.0), 50);
    }

    #[test]
    fn test_swap_reward_with_bonus() {
        assert_eq!(RewardService::swap_reward(50, 1.5), 75);
        assert_eq!(RewardService::swap_reward(50, 2.0), 100);
        // floor() on the bonus portion only
        assert_eq!(RewardService::swap_reward(50, 1.33), 66);
    }

    #[test]
    fn test_milestone_bonus_thresholds() {
        assert_eq!(RewardService::milestone_bonus(10), Some(100));
        assert_eq!(RewardService::milestone_bonus(50), Some(500));
        assert_eq!(RewardService::milestone_bonus(100), Some(1000));
    }

    #[test]
    fn test_milestone_bonus_only_exact_counts() {
        assert_eq!(RewardService::milestone_bonus(0), None);
        assert_eq!(RewardService::milestone_bonus(9), None);
        assert_eq!(RewardService::milestone_bonus(11), None);
        assert_eq!(RewardService::milestone_bonus(99), None);
        assert_eq!(RewardService::milestone_bonus(101), None);
    }
}
