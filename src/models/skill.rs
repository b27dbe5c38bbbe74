//! Skill entries carried on user profiles
//!
//! Stored as ordered JSONB collections on the user row. Consumed by the
//! matching/recommendation layer; the core only validates shape on profile
//! edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single skill a user teaches or wants to learn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub title: String,
    pub description: String,
    pub category: String,
    pub experience_level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Experience level attached to a skill entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_round_trip() {
        let json = serde_json::to_string(&ExperienceLevel::Advanced).unwrap();
        assert_eq!(json, "\"advanced\"");

        let parsed: ExperienceLevel = serde_json::from_str("\"beginner\"").unwrap();
        assert_eq!(parsed, ExperienceLevel::Beginner);
    }

    #[test]
    fn test_skill_deserializes_without_optional_fields() {
        let skill: Skill = serde_json::from_str(
            r#"{
                "title": "Rust",
                "description": "Systems programming",
                "category": "programming",
                "experience_level": "expert"
            }"#,
        )
        .unwrap();

        assert_eq!(skill.title, "Rust");
        assert!(skill.tags.is_empty());
        assert!(skill.availability.is_none());
    }
}
