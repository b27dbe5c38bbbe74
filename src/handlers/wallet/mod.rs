//! Wallet handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Wallet routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::get_wallet))
        .route("/spend", post(handler::spend))
        .route("/transactions", get(handler::list_transactions))
}
