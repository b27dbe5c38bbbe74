//! User repository
//!
//! All balance and counter mutations are single conditional UPDATE
//! statements so concurrent writers can never interleave a read-then-write
//! on the same row.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Skill, User},
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        referral_code: &str,
        referred_by: Option<&Uuid>,
        starting_skillcoins: i64,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, referral_code, referred_by, skillcoins)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(referral_code)
        .bind(referred_by)
        .bind(starting_skillcoins)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by referral code
    pub async fn find_by_referral_code(pool: &PgPool, code: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE referral_code = $1"#)
            .bind(code)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Update profile fields
    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        pool: &PgPool,
        id: &Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        avatar: Option<&str>,
        bio: Option<&str>,
        location: Option<&str>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                avatar = COALESCE($4, avatar),
                bio = COALESCE($5, bio),
                location = COALESCE($6, location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(avatar)
        .bind(bio)
        .bind(location)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Replace the skill collections
    pub async fn update_skills(
        pool: &PgPool,
        id: &Uuid,
        skills_to_teach: Option<&[Skill]>,
        skills_to_learn: Option<&[Skill]>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                skills_to_teach = COALESCE($2, skills_to_teach),
                skills_to_learn = COALESCE($3, skills_to_learn),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(skills_to_teach.map(|s| Json(s.to_vec())))
        .bind(skills_to_learn.map(|s| Json(s.to_vec())))
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Atomically credit skillcoins, returning the new balance
    pub async fn add_skillcoins(pool: &PgPool, id: &Uuid, amount: i64) -> AppResult<Option<i64>> {
        let balance: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET skillcoins = skillcoins + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING skillcoins
            "#,
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(pool)
        .await?;

        Ok(balance)
    }

    /// Atomically debit skillcoins. Returns the new balance, or `None` when
    /// the balance cannot cover the amount (no mutation happens in that case).
    pub async fn try_spend_skillcoins(
        pool: &PgPool,
        id: &Uuid,
        amount: i64,
    ) -> AppResult<Option<i64>> {
        let balance: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET skillcoins = skillcoins - $2, updated_at = NOW()
            WHERE id = $1 AND skillcoins >= $2
            RETURNING skillcoins
            "#,
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(pool)
        .await?;

        Ok(balance)
    }

    /// Atomically add XP, returning the new totals
    pub async fn add_xp(pool: &PgPool, id: &Uuid, amount: i64) -> AppResult<Option<(i64, i32)>> {
        let row: Option<(i64, i32)> = sqlx::query_as(
            r#"
            UPDATE users
            SET xp = xp + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING xp, level
            "#,
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Raise the stored level. Levels are derived from XP and only move up.
    pub async fn raise_level(pool: &PgPool, id: &Uuid, level: i32) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET level = GREATEST(level, $2), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(level)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Increment both swap counters, returning the updated row
    pub async fn increment_swap_counters(pool: &PgPool, id: &Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                completed_swaps = completed_swaps + 1,
                total_swaps = total_swaps + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Increment the referral counter
    pub async fn increment_referral_count(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET referral_count = referral_count + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Record a login, updating streak and timestamp together
    pub async fn record_login(
        pool: &PgPool,
        id: &Uuid,
        streak: i32,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET login_streak = $2, last_login_at = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(streak)
        .bind(at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Zero out streaks for users who last logged in before `cutoff`.
    /// Returns the number of streaks broken.
    pub async fn reset_broken_streaks(pool: &PgPool, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET login_streak = 0, updated_at = NOW()
            WHERE is_active AND login_streak > 0 AND last_login_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Leaderboard listing ordered by the given column set
    pub async fn leaderboard(pool: &PgPool, order_by: &str, limit: i64) -> AppResult<Vec<User>> {
        // order_by is one of a fixed set chosen by the service, never user input
        let query = format!(
            r#"SELECT * FROM users WHERE is_active ORDER BY {} LIMIT $1"#,
            order_by
        );

        let users = sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(users)
    }

    /// Users referred by the given user, most recent first
    pub async fn find_referred_users(pool: &PgPool, referrer: &Uuid) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE referred_by = $1 ORDER BY created_at DESC"#,
        )
        .bind(referrer)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}
