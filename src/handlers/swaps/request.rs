//! Swap request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create swap request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSwapRequest {
    pub recipient_id: Uuid,

    #[validate(length(min = 1, max = 128))]
    pub skill_offered: String,

    #[validate(length(min = 1, max = 128))]
    pub skill_requested: String,

    #[validate(length(max = 2000))]
    pub message: Option<String>,

    /// e.g. "1 hour", "45 minutes"; defaults to 1 hour
    #[validate(length(max = 64))]
    pub duration: Option<String>,
}

/// Update swap status and/or schedule request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSwapRequest {
    /// Target status: accepted, rejected, scheduled, active, completed, cancelled
    pub status: Option<String>,

    /// Must be strictly in the future
    pub scheduled_date: Option<DateTime<Utc>>,

    #[validate(length(max = 64))]
    pub duration: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
