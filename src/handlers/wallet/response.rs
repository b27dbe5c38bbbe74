//! Wallet response DTOs

use serde::Serialize;

use crate::models::Transaction;
use crate::services::wallet_service::WalletSummary;

/// Wallet overview response
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    #[serde(flatten)]
    pub summary: WalletSummary,
}

/// Spend response
#[derive(Debug, Serialize)]
pub struct SpendResponse {
    pub new_balance: i64,
    pub transaction: Transaction,
}

/// Transaction list response
#[derive(Debug, Serialize)]
pub struct TransactionsListResponse {
    pub transactions: Vec<Transaction>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
