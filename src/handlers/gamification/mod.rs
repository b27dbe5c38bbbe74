//! Gamification handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{Router, middleware, routing::get};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Gamification routes; the leaderboard is public
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handler::get_profile)
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
        .route("/leaderboard", get(handler::get_leaderboard))
}
