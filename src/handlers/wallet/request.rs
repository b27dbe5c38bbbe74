//! Wallet request DTOs

use serde::Deserialize;
use validator::Validate;

/// Spend skillcoins request
#[derive(Debug, Deserialize, Validate)]
pub struct SpendRequest {
    #[validate(range(min = 1))]
    pub amount: i64,

    #[validate(length(min = 1, max = 256))]
    pub description: String,
}

/// Transaction listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
