//! Gamification read models: progression profile and leaderboards

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    cache::CacheClient,
    constants::cache_ttl,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    services::reward_service::RewardService,
};

/// Progression snapshot for one user
#[derive(Debug, serde::Serialize)]
pub struct GamificationProfile {
    pub level: i32,
    pub xp: i64,
    pub skillcoins: i64,
    pub total_swaps: i32,
    pub completed_swaps: i32,
    pub login_streak: i32,
    pub referral_count: i32,
    pub next_level: NextLevel,
}

/// Progress toward the next level
#[derive(Debug, serde::Serialize)]
pub struct NextLevel {
    pub level: i32,
    pub xp_required: i64,
    pub xp_to_go: i64,
}

/// Leaderboard ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardKind {
    Level,
    Skillcoins,
    Swaps,
}

impl LeaderboardKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "level" => Some(Self::Level),
            "skillcoins" => Some(Self::Skillcoins),
            "swaps" => Some(Self::Swaps),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Skillcoins => "skillcoins",
            Self::Swaps => "swaps",
        }
    }

    fn order_clause(&self) -> &'static str {
        match self {
            Self::Level => "level DESC, xp DESC",
            Self::Skillcoins => "skillcoins DESC",
            Self::Swaps => "completed_swaps DESC",
        }
    }
}

/// One leaderboard row
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub level: i32,
    pub xp: i64,
    pub skillcoins: i64,
    pub completed_swaps: i32,
}

/// Gamification service
pub struct GamificationService;

impl GamificationService {
    /// Progression profile for a user
    pub async fn profile(pool: &PgPool, user_id: &Uuid) -> AppResult<GamificationProfile> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(Self::profile_for(&user))
    }

    /// Build the profile from an already-loaded user row
    pub fn profile_for(user: &User) -> GamificationProfile {
        let next_level = user.level + 1;
        let xp_required = RewardService::xp_for_level(next_level);

        GamificationProfile {
            level: user.level,
            xp: user.xp,
            skillcoins: user.skillcoins,
            total_swaps: user.total_swaps,
            completed_swaps: user.completed_swaps,
            login_streak: user.login_streak,
            referral_count: user.referral_count,
            next_level: NextLevel {
                level: next_level,
                xp_required,
                xp_to_go: (xp_required - user.xp).max(0),
            },
        }
    }

    /// Leaderboard, served through the TTL cache. The cache is
    /// time-bounded only; reward grants surface within the TTL.
    pub async fn leaderboard(
        pool: &PgPool,
        cache: &CacheClient,
        kind: LeaderboardKind,
        limit: i64,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        let key = format!("leaderboard:{}:{}", kind.as_str(), limit);

        if let Some(cached) = cache.get_json::<Vec<LeaderboardEntry>>(&key).await {
            return Ok(cached);
        }

        let users = UserRepository::leaderboard(pool, kind.order_clause(), limit).await?;

        let entries: Vec<LeaderboardEntry> = users
            .iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry {
                rank: i + 1,
                user_id: user.id,
                name: user.display_name(),
                avatar: user.avatar.clone(),
                level: user.level,
                xp: user.xp,
                skillcoins: user.skillcoins,
                completed_swaps: user.completed_swaps,
            })
            .collect();

        cache
            .set_json(&key, &entries, cache_ttl::LEADERBOARD_SECS)
            .await;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    #[test]
    fn test_leaderboard_kind_parse() {
        assert_eq!(LeaderboardKind::parse("level"), Some(LeaderboardKind::Level));
        assert_eq!(
            LeaderboardKind::parse("skillcoins"),
            Some(LeaderboardKind::Skillcoins)
        );
        assert_eq!(LeaderboardKind::parse("swaps"), Some(LeaderboardKind::Swaps));
        assert_eq!(LeaderboardKind::parse("xp"), None);
    }

    #[test]
    fn test_profile_next_level_progress() {
        let user = User {
            id: Uuid::new_v4(),
            email: "p@example.com".to_string(),
            password_hash: String::new(),
            first_name: "P".to_string(),
            last_name: "Q".to_string(),
            avatar: None,
            bio: None,
            location: None,
            role: "user".to_string(),
            skillcoins: 150,
            xp: 120,
            level: 2,
            login_streak: 3,
            last_login_at: None,
            total_swaps: 4,
            completed_swaps: 4,
            referral_code: "AAAA1111".to_string(),
            referred_by: None,
            referral_count: 0,
            skills_to_teach: Json(vec![]),
            skills_to_learn: Json(vec![]),
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let profile = GamificationService::profile_for(&user);
        assert_eq!(profile.next_level.level, 3);
        // Level 3 starts at 50 * 2^2 = 200 XP
        assert_eq!(profile.next_level.xp_required, 200);
        assert_eq!(profile.next_level.xp_to_go, 80);
    }
}
