//! Swap model and status lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Swap database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Swap {
    pub id: Uuid,
    pub requester: Uuid,
    pub recipient: Uuid,
    pub skill_offered: String,
    pub skill_requested: String,
    pub description: Option<String>,
    pub status: String,

    // Scheduling with auto-expiry
    pub scheduled_date: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub auto_expire_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration: String,

    // Skillcoin rewards
    pub skillcoins_earned: i64,
    pub bonus_multiplier: f64,
    pub skillcoins_awarded: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Swap {
    /// Check whether `user_id` is one of the two participants
    pub fn is_participant(&self, user_id: &Uuid) -> bool {
        self.requester == *user_id || self.recipient == *user_id
    }

    /// The participant on the other side of `user_id`
    pub fn other_participant(&self, user_id: &Uuid) -> Uuid {
        if self.requester == *user_id {
            self.recipient
        } else {
            self.requester
        }
    }

    /// Parsed status; rows only ever hold valid status strings
    pub fn status(&self) -> SwapStatus {
        SwapStatus::parse(&self.status).unwrap_or(SwapStatus::Pending)
    }
}

/// Swap lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

impl SwapStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "scheduled" => Some(Self::Scheduled),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Check if this is a terminal status (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Cancelled)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// The direct `pending -> scheduled` edge is an accept-and-schedule
    /// combined action and implies acceptance.
    pub fn can_transition_to(&self, next: SwapStatus) -> bool {
        use SwapStatus::*;
        match self {
            Pending => matches!(next, Accepted | Rejected | Cancelled | Scheduled),
            Accepted => matches!(next, Scheduled | Cancelled),
            Scheduled => matches!(next, Active | Cancelled),
            Active => matches!(next, Completed | Cancelled),
            Completed | Rejected | Cancelled => false,
        }
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for status in [
            SwapStatus::Pending,
            SwapStatus::Accepted,
            SwapStatus::Rejected,
            SwapStatus::Scheduled,
            SwapStatus::Active,
            SwapStatus::Completed,
            SwapStatus::Cancelled,
        ] {
            assert_eq!(SwapStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SwapStatus::parse("bogus"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(SwapStatus::Completed.is_terminal());
        assert!(SwapStatus::Rejected.is_terminal());
        assert!(SwapStatus::Cancelled.is_terminal());
        assert!(!SwapStatus::Pending.is_terminal());
        assert!(!SwapStatus::Active.is_terminal());
    }

    #[test]
    fn test_transition_matrix() {
        use SwapStatus::*;

        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Cancelled));
        // Accept-and-schedule combined action
        assert!(Pending.can_transition_to(Scheduled));
        assert!(!Pending.can_transition_to(Active));
        assert!(!Pending.can_transition_to(Completed));

        assert!(Accepted.can_transition_to(Scheduled));
        assert!(Accepted.can_transition_to(Cancelled));
        assert!(!Accepted.can_transition_to(Completed));

        assert!(Scheduled.can_transition_to(Active));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(Completed));

        assert!(Active.can_transition_to(Completed));
        assert!(Active.can_transition_to(Cancelled));
        assert!(!Active.can_transition_to(Scheduled));

        // Terminal states admit nothing
        for terminal in [Completed, Rejected, Cancelled] {
            for next in [
                Pending, Accepted, Rejected, Scheduled, Active, Completed, Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_participant_helpers() {
        let requester = Uuid::new_v4();
        let recipient = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let swap = Swap {
            id: Uuid::new_v4(),
            requester,
            recipient,
            skill_offered: "Guitar".to_string(),
            skill_requested: "Spanish".to_string(),
            description: None,
            status: "pending".to_string(),
            scheduled_date: None,
            start_time: None,
            end_time: None,
            auto_expire_at: None,
            completed_at: None,
            duration: "1 hour".to_string(),
            skillcoins_earned: 50,
            bonus_multiplier: 1.0,
            skillcoins_awarded: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(swap.is_participant(&requester));
        assert!(swap.is_participant(&recipient));
        assert!(!swap.is_participant(&stranger));
        assert_eq!(swap.other_participant(&requester), recipient);
        assert_eq!(swap.other_participant(&recipient), requester);
    }
}
