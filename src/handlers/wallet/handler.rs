//! Wallet handler implementations

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::WalletService,
    state::AppState,
};

use super::{
    request::{ListTransactionsQuery, SpendRequest},
    response::{SpendResponse, TransactionsListResponse, WalletResponse},
};

/// Get wallet overview
pub async fn get_wallet(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<WalletResponse>> {
    let summary =
        WalletService::summary(state.db(), &auth_user.id, state.clock().now()).await?;

    Ok(Json(WalletResponse { summary }))
}

/// Spend skillcoins on a premium feature
pub async fn spend(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<SpendRequest>,
) -> AppResult<Json<SpendResponse>> {
    payload.validate()?;

    let transaction = WalletService::spend(
        state.db(),
        &auth_user.id,
        payload.amount,
        &payload.description,
    )
    .await?;

    Ok(Json(SpendResponse {
        new_balance: transaction.balance,
        transaction,
    }))
}

/// List the current user's ledger history
pub async fn list_transactions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListTransactionsQuery>,
) -> AppResult<Json<TransactionsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let (transactions, total) =
        WalletService::transactions(state.db(), &auth_user.id, page, per_page).await?;

    Ok(Json(TransactionsListResponse {
        transactions,
        total,
        page,
        per_page,
    }))
}
