//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::skill::Skill;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub role: String,

    // Skillcoin wallet
    pub skillcoins: i64,

    // Gamification
    pub xp: i64,
    pub level: i32,

    // Activity tracking
    pub login_streak: i32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub total_swaps: i32,
    pub completed_swaps: i32,

    // Referral system
    pub referral_code: String,
    pub referred_by: Option<Uuid>,
    pub referral_count: i32,

    // Skill collections
    pub skills_to_teach: Json<Vec<Skill>>,
    pub skills_to_learn: Json<Vec<Skill>>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role == crate::constants::roles::ADMIN
    }

    /// Check whether the account can cover a spend of `amount`
    pub fn can_afford(&self, amount: i64) -> bool {
        amount >= 0 && self.skillcoins >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
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
            referral_code: "ABCD1234".to_string(),
            referred_by: None,
            referral_count: 0,
            skills_to_teach: Json(vec![]),
            skills_to_learn: Json(vec![]),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_afford() {
        let user = sample_user();
        assert!(user.can_afford(50));
        assert!(user.can_afford(0));
        assert!(!user.can_afford(51));
        assert!(!user.can_afford(-1));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("hash\""));
    }
}
