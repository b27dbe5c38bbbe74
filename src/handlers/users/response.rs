//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Skill, User};

/// Public user profile (what other users may see)
#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub level: i32,
    pub completed_swaps: i32,
    pub skills_to_teach: Vec<Skill>,
    pub skills_to_learn: Vec<Skill>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
            bio: user.bio,
            location: user.location,
            level: user.level,
            completed_swaps: user.completed_swaps,
            skills_to_teach: user.skills_to_teach.0,
            skills_to_learn: user.skills_to_learn.0,
            created_at: user.created_at,
        }
    }
}

/// Own profile response after an update
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
}
