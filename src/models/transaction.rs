//! Transaction model - append-only skillcoin ledger entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ledger entry database model. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub amount: i64,
    pub description: String,
    pub source_kind: Option<String>,
    pub source_id: Option<Uuid>,
    /// Account balance immediately after applying this entry
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Ledger entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earn,
    Spend,
    Bonus,
    Referral,
}

impl TransactionKind {
    /// Get kind as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Earn => "earn",
            Self::Spend => "spend",
            Self::Bonus => "bonus",
            Self::Referral => "referral",
        }
    }

    /// Parse kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "earn" => Some(Self::Earn),
            "spend" => Some(Self::Spend),
            "bonus" => Some(Self::Bonus),
            "referral" => Some(Self::Referral),
            _ => None,
        }
    }

    /// Whether this kind increases the balance
    pub fn is_credit(&self) -> bool {
        !matches!(self, Self::Spend)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference to the domain object that produced a ledger entry
#[derive(Debug, Clone, Copy)]
pub struct TransactionSource {
    pub kind: &'static str,
    pub id: Uuid,
}

impl TransactionSource {
    pub fn swap(id: Uuid) -> Self {
        Self {
            kind: crate::constants::sources::SWAP,
            id,
        }
    }

    pub fn referral(id: Uuid) -> Self {
        Self {
            kind: crate::constants::sources::REFERRAL,
            id,
        }
    }

    pub fn milestone(id: Uuid) -> Self {
        Self {
            kind: crate::constants::sources::MILESTONE,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            TransactionKind::Earn,
            TransactionKind::Spend,
            TransactionKind::Bonus,
            TransactionKind::Referral,
        ] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TransactionKind::parse("credit"), None);
    }

    #[test]
    fn test_credit_classification() {
        assert!(TransactionKind::Earn.is_credit());
        assert!(TransactionKind::Bonus.is_credit());
        assert!(TransactionKind::Referral.is_credit());
        assert!(!TransactionKind::Spend.is_credit());
    }
}
