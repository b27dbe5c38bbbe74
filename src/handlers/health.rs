//! Health check handlers

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{db, state::AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub redis: &'static str,
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness plus dependency readiness
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::test_connection(state.db()).await {
        Ok(()) => "up",
        Err(_) => "down",
    };

    let redis = {
        let mut conn = state.redis();
        match redis::cmd("PING").query_async::<String>(&mut conn).await {
            Ok(_) => "up",
            Err(_) => "down",
        }
    };

    let status = if database == "up" && redis == "up" {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        database,
        redis,
    })
}
