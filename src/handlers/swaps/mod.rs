//! Swap handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Swap routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_swap))
        .route("/", get(handler::list_swaps))
        .route("/{id}", get(handler::get_swap))
        .route("/{id}", put(handler::update_swap))
}
