//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod gamification;
pub mod health;
pub mod notifications;
pub mod referrals;
pub mod swaps;
pub mod users;
pub mod wallet;

use axum::{Router, middleware};

use crate::{
    middleware::{auth::auth_middleware, rate_limit::rate_limit_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/users", users::routes())
        .nest("/swaps", swaps::routes())
        .nest("/wallet", wallet::routes())
        .nest("/referrals", referrals::routes())
        .nest("/notifications", notifications::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/gamification", gamification::routes(state.clone()))
        .merge(protected)
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}
