//! Referral response DTOs

use serde::Serialize;

/// Referral code summary response
#[derive(Debug, Serialize)]
pub struct ReferralCodeResponse {
    pub referral_code: String,
    pub referral_count: i32,
    pub total_earned: i64,
}
