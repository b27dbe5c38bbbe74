//! Authentication service
//!
//! Registration (with referral application), login (with login-streak
//! maintenance), and JWT access / Redis-backed refresh tokens.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::rewards,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{TransactionKind, User},
    services::notification_service::Notifier,
    services::referral_service::ReferralService,
    services::reward_service::RewardService,
    utils::crypto::{generate_referral_code, generate_secure_token},
    utils::time::days_between,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Outcome of applying a login to the streak counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: i32,
    /// True when the streak advanced to a new consecutive day
    pub advanced: bool,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user, applying a referral code when one resolves
    pub async fn register(
        pool: &PgPool,
        notifier: Arc<dyn Notifier>,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        referral_code: Option<&str>,
    ) -> AppResult<User> {
        let email = email.trim().to_lowercase();

        if UserRepository::find_by_email(pool, &email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(password)?;

        // An unknown referral code is a no-op, not an error
        let referrer = match referral_code {
            Some(code) if !code.trim().is_empty() => {
                ReferralService::resolve_referrer(pool, code).await?
            }
            _ => None,
        };

        let user = UserRepository::create(
            pool,
            &email,
            &password_hash,
            first_name,
            last_name,
            &generate_referral_code(),
            referrer.as_ref().map(|r| &r.id),
            ReferralService::starting_balance(referrer.is_some()),
        )
        .await?;

        if let Some(referrer) = referrer {
            ReferralService::apply_referral(pool, notifier, &referrer, &user).await?;
        }

        Ok(user)
    }

    /// Login with email and password, maintaining the login streak
    pub async fn login(
        pool: &PgPool,
        redis: ConnectionManager,
        config: &Config,
        now: DateTime<Utc>,
        email: &str,
        password: &str,
    ) -> AppResult<(User, String, String, i64)> {
        let email = email.trim().to_lowercase();

        let user = UserRepository::find_by_email(pool, &email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        // Login streak: same-day logins don't move it, a consecutive day
        // advances it, a gap resets it to 1
        let update = Self::advance_streak(user.last_login_at, now, user.login_streak);
        UserRepository::record_login(pool, &user.id, update.streak, now).await?;

        if update.advanced && update.streak % rewards::LOGIN_STREAK_INTERVAL == 0 {
            RewardService::grant_skillcoins(
                pool,
                &user.id,
                rewards::LOGIN_STREAK_BONUS,
                TransactionKind::Bonus,
                &format!("{} day login streak!", update.streak),
                None,
            )
            .await?;
        }

        let (access_token, refresh_token, expires_in) =
            Self::issue_tokens(redis, config, &user).await?;

        // Re-read so streak/balance changes are reflected in the response
        let user = UserRepository::find_by_id(pool, &user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok((user, access_token, refresh_token, expires_in))
    }

    /// Mint an access token and a Redis-backed refresh token for a user
    pub async fn issue_tokens(
        mut redis: ConnectionManager,
        config: &Config,
        user: &User,
    ) -> AppResult<(String, String, i64)> {
        let (access_token, expires_in) = Self::generate_access_token(user, config)?;
        let refresh_token = generate_secure_token(64);

        let key = format!("refresh_token:{}", refresh_token);
        let expiry = config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
        redis
            .set_ex::<_, _, ()>(&key, user.id.to_string(), expiry as u64)
            .await?;

        Ok((access_token, refresh_token, expires_in))
    }

    /// Exchange a refresh token for a new access token, rotating it
    pub async fn refresh_token(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        refresh_token: &str,
    ) -> AppResult<(String, String, i64)> {
        let key = format!("refresh_token:{}", refresh_token);

        let user_id: Option<String> = redis.get(&key).await?;
        let user_id = user_id.ok_or(AppError::InvalidToken)?;
        let user_id = Uuid::parse_str(&user_id).map_err(|_| AppError::InvalidToken)?;

        let user = UserRepository::find_by_id(pool, &user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        // Rotate: revoke the old token, mint a new one
        redis.del::<_, ()>(&key).await?;

        let new_refresh = generate_secure_token(64);
        let new_key = format!("refresh_token:{}", new_refresh);
        let expiry = config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
        redis
            .set_ex::<_, _, ()>(&new_key, user.id.to_string(), expiry as u64)
            .await?;

        let (access_token, expires_in) = Self::generate_access_token(&user, config)?;

        Ok((access_token, new_refresh, expires_in))
    }

    /// Revoke a refresh token (logout)
    pub async fn revoke_token(mut redis: ConnectionManager, refresh_token: &str) -> AppResult<()> {
        let key = format!("refresh_token:{}", refresh_token);
        redis.del::<_, ()>(&key).await?;
        Ok(())
    }

    /// Verify and decode an access token
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }

    /// Apply one login to the streak counter
    pub fn advance_streak(
        last_login: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        current: i32,
    ) -> StreakUpdate {
        match last_login {
            None => StreakUpdate {
                streak: 1,
                advanced: true,
            },
            Some(last) => match days_between(last, now) {
                0 => StreakUpdate {
                    streak: current.max(1),
                    advanced: false,
                },
                1 => StreakUpdate {
                    streak: current + 1,
                    advanced: true,
                },
                _ => StreakUpdate {
                    streak: 1,
                    advanced: true,
                },
            },
        }
    }

    /// Generate an access token for a user
    fn generate_access_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_in = config.jwt.expiry_hours * 3600;
        let exp = now + Duration::hours(config.jwt.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )?;

        Ok((token, expires_in))
    }

    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_first_login_starts_streak() {
        let update = AuthService::advance_streak(None, at(2024, 6, 1, 9), 0);
        assert_eq!(
            update,
            StreakUpdate {
                streak: 1,
                advanced: true
            }
        );
    }

    #[test]
    fn test_same_day_login_keeps_streak() {
        let update = AuthService::advance_streak(Some(at(2024, 6, 1, 8)), at(2024, 6, 1, 22), 4);
        assert_eq!(
            update,
            StreakUpdate {
                streak: 4,
                advanced: false
            }
        );
    }

    #[test]
    fn test_consecutive_day_advances_streak() {
        // Late night to early morning still counts as consecutive days
        let update = AuthService::advance_streak(Some(at(2024, 6, 1, 23)), at(2024, 6, 2, 1), 6);
        assert_eq!(
            update,
            StreakUpdate {
                streak: 7,
                advanced: true
            }
        );
    }

    #[test]
    fn test_gap_resets_streak() {
        let update = AuthService::advance_streak(Some(at(2024, 6, 1, 9)), at(2024, 6, 4, 9), 15);
        assert_eq!(
            update,
            StreakUpdate {
                streak: 1,
                advanced: true
            }
        );
    }

    #[test]
    fn test_streak_bonus_fires_on_interval() {
        // The bonus condition the login path checks
        for streak in 1..30 {
            let fires = streak % rewards::LOGIN_STREAK_INTERVAL == 0;
            assert_eq!(fires, streak == 7 || streak == 14 || streak == 21 || streak == 28);
        }
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = AuthService::hash_password("correct horse battery").unwrap();
        assert!(AuthService::verify_password("correct horse battery", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong password", &hash).unwrap());
    }
}
