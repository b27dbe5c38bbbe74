//! User request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::models::Skill;

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub last_name: Option<String>,

    #[validate(length(max = 512))]
    pub avatar: Option<String>,

    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[validate(length(max = 128))]
    pub location: Option<String>,
}

/// Skill collections update request
#[derive(Debug, Deserialize)]
pub struct UpdateSkillsRequest {
    pub skills_to_teach: Option<Vec<Skill>>,
    pub skills_to_learn: Option<Vec<Skill>>,
}
