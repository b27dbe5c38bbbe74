//! User service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{Skill, User},
    utils::validation::validate_skills,
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Update own profile fields
    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        pool: &PgPool,
        user_id: &Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        avatar: Option<&str>,
        bio: Option<&str>,
        location: Option<&str>,
    ) -> AppResult<User> {
        UserRepository::update_profile(pool, user_id, first_name, last_name, avatar, bio, location)
            .await
    }

    /// Replace skill collections after validating their shape
    pub async fn update_skills(
        pool: &PgPool,
        user_id: &Uuid,
        skills_to_teach: Option<Vec<Skill>>,
        skills_to_learn: Option<Vec<Skill>>,
    ) -> AppResult<User> {
        if let Some(skills) = &skills_to_teach {
            validate_skills(skills)?;
        }
        if let Some(skills) = &skills_to_learn {
            validate_skills(skills)?;
        }

        UserRepository::update_skills(
            pool,
            user_id,
            skills_to_teach.as_deref(),
            skills_to_learn.as_deref(),
        )
        .await
    }
}
