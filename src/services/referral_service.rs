//! Referral bonus granter
//!
//! Invoked once at registration when a referral code is supplied. An
//! unknown code is a silent no-op, never an error. The referrer earns a
//! fixed bonus; the referred account starts at the raised balance and the
//! difference is ledgered as a welcome bonus.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{notifications as kinds, rewards},
    db::repositories::{TransactionRepository, UserRepository},
    error::AppResult,
    models::{NotificationEvent, TransactionKind, TransactionSource, User},
    services::notification_service::{Notifier, notify_detached},
    services::reward_service::RewardService,
};

/// Referral statistics for a user
#[derive(Debug, serde::Serialize)]
pub struct ReferralStats {
    pub total_referrals: i32,
    pub total_earned: i64,
    pub referrals: Vec<ReferredUser>,
}

/// One referred signup in the stats listing
#[derive(Debug, serde::Serialize)]
pub struct ReferredUser {
    pub name: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub completed_swaps: i32,
}

/// Referral bonus service
pub struct ReferralService;

impl ReferralService {
    /// Resolve a referral code to its owner. Unknown codes resolve to
    /// `None` so registration proceeds without linkage.
    pub async fn resolve_referrer(pool: &PgPool, code: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_referral_code(pool, &code.trim().to_uppercase()).await
    }

    /// Grant both sides of a referral after the referred user was created.
    ///
    /// The new user's raised starting balance was already applied at
    /// insert; this ledgers the welcome bonus against it and pays the
    /// referrer.
    pub async fn apply_referral(
        pool: &PgPool,
        notifier: Arc<dyn Notifier>,
        referrer: &User,
        new_user: &User,
    ) -> AppResult<()> {
        UserRepository::increment_referral_count(pool, &referrer.id).await?;

        RewardService::grant_skillcoins(
            pool,
            &referrer.id,
            rewards::REFERRAL_BONUS,
            TransactionKind::Referral,
            &format!("Referral bonus: {} joined!", new_user.first_name),
            Some(TransactionSource::referral(new_user.id)),
        )
        .await?;

        // Welcome bonus is already part of the starting balance; record
        // the ledger entry with the post-application snapshot
        TransactionRepository::create(
            pool,
            &new_user.id,
            TransactionKind::Bonus,
            rewards::REFERRAL_WELCOME_BONUS,
            "Welcome bonus (referral signup)",
            Some(TransactionSource::referral(referrer.id)),
            new_user.skillcoins,
        )
        .await?;

        let event = NotificationEvent::new(
            kinds::REFERRAL_JOINED,
            "Referral Joined!",
            format!(
                "{} joined with your referral code. You earned {} skillcoins",
                new_user.first_name,
                rewards::REFERRAL_BONUS
            ),
        )
        .with_data(serde_json::json!({ "referred_user": new_user.id }))
        .with_action_url("/wallet");

        notify_detached(notifier, referrer.id, event);

        Ok(())
    }

    /// Referral code and lifetime totals for the code owner
    pub fn code_summary(user: &User) -> (String, i32, i64) {
        (
            user.referral_code.clone(),
            user.referral_count,
            user.referral_count as i64 * rewards::REFERRAL_BONUS,
        )
    }

    /// Full referral statistics
    pub async fn stats(pool: &PgPool, user: &User) -> AppResult<ReferralStats> {
        let referred = UserRepository::find_referred_users(pool, &user.id).await?;

        Ok(ReferralStats {
            total_referrals: user.referral_count,
            total_earned: user.referral_count as i64 * rewards::REFERRAL_BONUS,
            referrals: referred
                .into_iter()
                .map(|u| ReferredUser {
                    name: u.display_name(),
                    joined_at: u.created_at,
                    completed_swaps: u.completed_swaps,
                })
                .collect(),
        })
    }

    /// Starting balance for a new account, given whether a referrer matched
    pub fn starting_balance(referred: bool) -> i64 {
        if referred {
            rewards::REFERRED_STARTING_BALANCE
        } else {
            rewards::STARTING_BALANCE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_balance() {
        assert_eq!(ReferralService::starting_balance(false), 50);
        assert_eq!(ReferralService::starting_balance(true), 100);
    }

    #[test]
    fn test_referred_balance_is_default_plus_welcome() {
        assert_eq!(
            ReferralService::starting_balance(true),
            ReferralService::starting_balance(false) + rewards::REFERRAL_WELCOME_BONUS
        );
    }

    fn dummy_user(referral_count: i32) -> User {
        use sqlx::types::Json;
        User {
            id: Uuid::new_v4(),
            email: "ref@example.com".to_string(),
            password_hash: String::new(),
            first_name: "Ref".to_string(),
            last_name: "Errer".to_string(),
            avatar: None,
            bio: None,
            location: None,
            role: "user".to_string(),
            skillcoins: 50,
            xp: 0,
            level: 1,
            login_streak: 0,
            last_login_at: None,
            total_swaps: 0,
            completed_swaps: 0,
            referral_code: "REFCODE1".to_string(),
            referred_by: None,
            referral_count,
            skills_to_teach: Json(vec![]),
            skills_to_learn: Json(vec![]),
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_code_summary_totals() {
        let user = dummy_user(3);
        let (code, count, earned) = ReferralService::code_summary(&user);
        assert_eq!(code, "REFCODE1");
        assert_eq!(count, 3);
        assert_eq!(earned, 300);
    }
}
