//! Swap lifecycle service
//!
//! Owns the status state machine, scheduling derivation, and the
//! completion path shared by interactive transitions and the auto-expiry
//! job. Reward distribution is gated on winning the atomic completion
//! claim; the `skillcoins_awarded` flag is the sole permanent guard, so
//! status churn can never re-trigger a grant.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{notifications as kinds, rewards},
    db::repositories::{SwapRepository, UserRepository, swap_repo::SwapUpdate},
    error::{AppError, AppResult},
    models::{NotificationEvent, Swap, SwapStatus, TransactionKind, TransactionSource, User},
    services::notification_service::{Notifier, notify_detached},
    services::reward_service::RewardService,
    utils::time::parse_duration,
};

/// Parsed interactive transition request
#[derive(Debug, Default)]
pub struct SwapTransition {
    pub status: Option<SwapStatus>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

/// Swap lifecycle service
pub struct SwapService;

impl SwapService {
    /// Create a new swap request from `requester` to `recipient_id`
    pub async fn create_swap(
        pool: &PgPool,
        notifier: Arc<dyn Notifier>,
        requester: &User,
        recipient_id: &Uuid,
        skill_offered: &str,
        skill_requested: &str,
        description: Option<&str>,
        duration: Option<&str>,
    ) -> AppResult<Swap> {
        if *recipient_id == requester.id {
            return Err(AppError::SelfSwap);
        }

        let recipient = UserRepository::find_by_id(pool, recipient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        let swap = SwapRepository::create(
            pool,
            &requester.id,
            &recipient.id,
            skill_offered,
            skill_requested,
            description,
            duration.unwrap_or(crate::constants::DEFAULT_SWAP_DURATION),
        )
        .await?;

        let event = NotificationEvent::new(
            kinds::SWAP_REQUEST,
            "New Swap Request",
            format!(
                "{} wants to swap {} for {}",
                requester.first_name, skill_offered, skill_requested
            ),
        )
        .with_data(serde_json::json!({ "swap_id": swap.id }))
        .with_related("swap", swap.id)
        .with_action_url(format!("/swaps/{}", swap.id));

        notify_detached(notifier, recipient.id, event);

        Ok(swap)
    }

    /// Fetch a swap, enforcing participant-only access
    pub async fn get_swap(pool: &PgPool, user_id: &Uuid, id: &Uuid) -> AppResult<Swap> {
        let swap = SwapRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Swap not found".to_string()))?;

        if !swap.is_participant(user_id) {
            return Err(AppError::Unauthorized);
        }

        Ok(swap)
    }

    /// All swaps the user participates in
    pub async fn list_swaps(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Swap>> {
        SwapRepository::list_for_user(pool, user_id).await
    }

    /// Drive an interactive status and/or scheduling transition.
    ///
    /// Only participants may transition a swap. Supplying a scheduled
    /// date derives `start_time`/`end_time`/`auto_expire_at` and, absent
    /// an explicit status (or alongside a plain `accepted`), forces the
    /// status to `scheduled`.
    pub async fn update_swap(
        pool: &PgPool,
        notifier: Arc<dyn Notifier>,
        now: DateTime<Utc>,
        actor_id: &Uuid,
        swap_id: &Uuid,
        transition: SwapTransition,
    ) -> AppResult<Swap> {
        let swap = SwapRepository::find_by_id(pool, swap_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Swap not found".to_string()))?;

        if !swap.is_participant(actor_id) {
            return Err(AppError::Unauthorized);
        }

        let current = swap.status();
        let mut target = transition.status;

        // Derive scheduling fields
        let mut schedule: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        if let Some(date) = transition.scheduled_date {
            if date <= now {
                return Err(AppError::InvalidSchedule(
                    "Scheduled date must be in the future".to_string(),
                ));
            }

            let duration_str = transition.duration.as_deref().unwrap_or(&swap.duration);
            let end = date + parse_duration(duration_str);
            schedule = Some((date, end));

            // A schedule update implies the swap is (now) scheduled
            if target.is_none() || target == Some(SwapStatus::Accepted) {
                target = Some(SwapStatus::Scheduled);
            }
        }

        // Re-asserting the current status is a no-op, not an error
        if target == Some(current) {
            target = None;
        }

        if let Some(next) = target {
            if !current.can_transition_to(next) {
                return Err(AppError::InvalidTransition(format!(
                    "{} -> {}",
                    current, next
                )));
            }
        }

        let updated = if target == Some(SwapStatus::Completed) {
            match Self::complete_swap(pool, notifier.clone(), now, swap_id).await? {
                Some(completed) => return Ok(completed),
                // Lost the claim or rewards already went out; idempotent no-op
                None => SwapRepository::find_by_id(pool, swap_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Swap not found".to_string()))?,
            }
        } else {
            // Conditional on the status we validated against; a racing
            // transition (including an auto-completion) wins over this one
            SwapRepository::update(
                pool,
                swap_id,
                current.as_str(),
                SwapUpdate {
                    status: target.map(|s| s.as_str()),
                    scheduled_date: schedule.map(|(start, _)| start),
                    start_time: schedule.map(|(start, _)| start),
                    end_time: schedule.map(|(_, end)| end),
                    auto_expire_at: schedule.map(|(_, end)| end),
                    duration: transition.duration.as_deref(),
                    description: transition.notes.as_deref(),
                },
            )
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Swap was modified concurrently".to_string())
            })?
        };

        if target.is_some() || schedule.is_some() {
            let actor = UserRepository::find_by_id(pool, actor_id).await?;
            let actor_name = actor
                .map(|u| u.first_name)
                .unwrap_or_else(|| "Your partner".to_string());
            let other = updated.other_participant(actor_id);

            if let Some(event) = Self::status_event(&updated, target, schedule.is_some(), &actor_name)
            {
                notify_detached(notifier, other, event);
            }
        }

        Ok(updated)
    }

    /// Complete a swap and distribute rewards, from either an interactive
    /// transition or the auto-expiry job.
    ///
    /// Claims the completion first with a single conditional update; only
    /// the winning caller distributes. Returns `None` when the claim was
    /// already taken, which callers treat as an idempotent no-op.
    pub async fn complete_swap(
        pool: &PgPool,
        notifier: Arc<dyn Notifier>,
        now: DateTime<Utc>,
        swap_id: &Uuid,
    ) -> AppResult<Option<Swap>> {
        let Some(swap) = SwapRepository::claim_completion(pool, swap_id, now).await? else {
            tracing::debug!(%swap_id, "completion already claimed, skipping rewards");
            return Ok(None);
        };

        let total = RewardService::swap_reward(swap.skillcoins_earned, swap.bonus_multiplier);

        let requester =
            Self::reward_participant(pool, &swap, &swap.requester, &swap.skill_requested, total)
                .await?;
        let recipient =
            Self::reward_participant(pool, &swap, &swap.recipient, &swap.skill_offered, total)
                .await?;

        notify_detached(
            notifier.clone(),
            requester.id,
            Self::completed_event(&swap, total, &recipient.first_name),
        );
        notify_detached(
            notifier,
            recipient.id,
            Self::completed_event(&swap, total, &requester.first_name),
        );

        tracing::info!(%swap_id, total, "swap completed, rewards distributed");

        Ok(Some(swap))
    }

    /// Grant one participant their completion rewards: coins, XP, counter
    /// increments, and a milestone bonus when the counter lands on one.
    async fn reward_participant(
        pool: &PgPool,
        swap: &Swap,
        user_id: &Uuid,
        skill: &str,
        total: i64,
    ) -> AppResult<User> {
        RewardService::grant_skillcoins(
            pool,
            user_id,
            total,
            TransactionKind::Earn,
            &format!("Swap completed: {}", skill),
            Some(TransactionSource::swap(swap.id)),
        )
        .await?;

        RewardService::grant_xp(pool, user_id, rewards::SWAP_COMPLETION_XP).await?;

        let user = UserRepository::increment_swap_counters(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Swap participant not found".to_string()))?;

        if let Some(bonus) = RewardService::milestone_bonus(user.completed_swaps) {
            RewardService::grant_skillcoins(
                pool,
                user_id,
                bonus,
                TransactionKind::Bonus,
                &format!("Milestone: {} completed swaps!", user.completed_swaps),
                Some(TransactionSource::milestone(swap.id)),
            )
            .await?;
        }

        Ok(user)
    }

    fn completed_event(swap: &Swap, total: i64, partner_name: &str) -> NotificationEvent {
        NotificationEvent::new(
            kinds::SWAP_COMPLETED,
            "Swap Completed!",
            format!(
                "You earned {} skillcoins from your swap with {}",
                total, partner_name
            ),
        )
        .with_data(serde_json::json!({ "swap_id": swap.id, "skillcoins": total }))
        .with_related("swap", swap.id)
        .with_action_url("/wallet")
    }

    /// Event for a non-completion status change or a schedule update
    fn status_event(
        swap: &Swap,
        target: Option<SwapStatus>,
        scheduled: bool,
        actor_name: &str,
    ) -> Option<NotificationEvent> {
        let event = match target {
            Some(SwapStatus::Accepted) => NotificationEvent::new(
                kinds::SWAP_ACCEPTED,
                "Swap Accepted!",
                format!("{} accepted your swap request", actor_name),
            )
            .with_action_url(format!("/swaps/{}", swap.id)),
            Some(SwapStatus::Rejected) => NotificationEvent::new(
                kinds::SWAP_REJECTED,
                "Swap Declined",
                format!("{} declined your swap request", actor_name),
            )
            .with_action_url("/swaps"),
            Some(SwapStatus::Cancelled) => NotificationEvent::new(
                kinds::SWAP_CANCELLED,
                "Swap Cancelled",
                format!("{} cancelled the swap", actor_name),
            )
            .with_action_url("/swaps"),
            Some(SwapStatus::Scheduled) => NotificationEvent::new(
                kinds::SWAP_SCHEDULED,
                "Session Scheduled!",
                format!("{} scheduled your swap session", actor_name),
            )
            .with_data(serde_json::json!({
                "swap_id": swap.id,
                "scheduled_date": swap.scheduled_date,
            }))
            .with_action_url("/schedule"),
            Some(SwapStatus::Active) => NotificationEvent::new(
                kinds::SWAP_SCHEDULED,
                "Session Started",
                format!("Your swap session with {} is now active", actor_name),
            )
            .with_action_url(format!("/swaps/{}", swap.id)),
            // Schedule-only update with no status change
            None if scheduled => NotificationEvent::new(
                kinds::SWAP_SCHEDULED,
                "Session Scheduled!",
                format!("{} scheduled your swap session", actor_name),
            )
            .with_data(serde_json::json!({
                "swap_id": swap.id,
                "scheduled_date": swap.scheduled_date,
            }))
            .with_action_url("/schedule"),
            _ => return None,
        };

        Some(event.with_related("swap", swap.id))
    }
}
