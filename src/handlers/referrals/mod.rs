//! Referral handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Referral routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/code", get(handler::get_referral_code))
        .route("/stats", get(handler::get_referral_stats))
}
