//! Gamification request DTOs

use serde::Deserialize;

/// Leaderboard query parameters
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// level | skillcoins | swaps
    pub kind: Option<String>,
    pub limit: Option<i64>,
}
