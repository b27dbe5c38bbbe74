//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client and path bucket.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use redis::AsyncCommands;
use std::net::SocketAddr;

use crate::{constants::rate_limits, state::AppState};

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let client = client_key(&request);
    let path = request.uri().path().to_string();

    let (limit, window) = get_rate_limit(&path);
    let key = format!("rate_limit:{}:{}", client, path_bucket(&path));
    let mut redis = state.redis();

    // A Redis outage degrades to letting traffic through
    let count: i64 = redis.incr(&key, 1).await.unwrap_or(0);

    if count == 1 {
        let _: () = redis.expire(&key, window).await.unwrap_or(());
    }

    if count > limit {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            format!("Rate limit exceeded. Try again in {} seconds.", window),
        ));
    }

    Ok(next.run(request).await)
}

/// Best identifier available for the calling client
fn client_key(request: &Request<Body>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        return forwarded.trim().to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Get rate limit for a path
fn get_rate_limit(path: &str) -> (i64, i64) {
    if path.starts_with("/api/v1/auth") {
        (
            rate_limits::AUTH_MAX_REQUESTS,
            rate_limits::AUTH_WINDOW_SECS,
        )
    } else if path.starts_with("/api/v1/swaps") {
        (
            rate_limits::SWAP_MAX_REQUESTS,
            rate_limits::SWAP_WINDOW_SECS,
        )
    } else {
        (
            rate_limits::GENERAL_MAX_REQUESTS,
            rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}

/// Bucket paths so each limiter class shares one counter
fn path_bucket(path: &str) -> &'static str {
    if path.starts_with("/api/v1/auth") {
        "auth"
    } else if path.starts_with("/api/v1/swaps") {
        "swaps"
    } else {
        "general"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_buckets() {
        assert_eq!(path_bucket("/api/v1/auth/login"), "auth");
        assert_eq!(path_bucket("/api/v1/swaps/123"), "swaps");
        assert_eq!(path_bucket("/api/v1/wallet"), "general");
    }

    #[test]
    fn test_auth_limit_is_strictest() {
        let (auth_limit, _) = get_rate_limit("/api/v1/auth/login");
        let (general_limit, _) = get_rate_limit("/api/v1/wallet");
        assert!(auth_limit < general_limit);
    }
}
