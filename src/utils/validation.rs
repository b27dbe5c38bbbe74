//! Input validation helpers

use crate::constants::MAX_SKILL_TITLE_LENGTH;
use crate::error::{AppError, AppResult};
use crate::models::Skill;

/// Validate a skill collection submitted on a profile update
pub fn validate_skills(skills: &[Skill]) -> AppResult<()> {
    for skill in skills {
        if skill.title.trim().is_empty() {
            return Err(AppError::Validation("Skill title cannot be empty".to_string()));
        }
        if skill.title.len() as u64 > MAX_SKILL_TITLE_LENGTH {
            return Err(AppError::Validation(format!(
                "Skill title too long (max {} characters)",
                MAX_SKILL_TITLE_LENGTH
            )));
        }
        if skill.category.trim().is_empty() {
            return Err(AppError::Validation(
                "Skill category cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceLevel;
    use chrono::Utc;

    fn skill(title: &str, category: &str) -> Skill {
        Skill {
            title: title.to_string(),
            description: "desc".to_string(),
            category: category.to_string(),
            experience_level: ExperienceLevel::Beginner,
            tags: vec![],
            availability: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_skills() {
        assert!(validate_skills(&[skill("Rust", "programming")]).is_ok());
        assert!(validate_skills(&[]).is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(validate_skills(&[skill("  ", "programming")]).is_err());
    }

    #[test]
    fn test_empty_category_rejected() {
        assert!(validate_skills(&[skill("Rust", "")]).is_err());
    }
}
