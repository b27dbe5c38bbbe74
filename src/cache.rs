//! Read-through TTL cache over Redis
//!
//! Used only for hot listings (leaderboards). Reads that gate a mutation
//! must never come through here; the core always checks current state in
//! Postgres before a guarded write. Cache failures degrade to misses.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Thin cache client; cheap to clone
#[derive(Clone)]
pub struct CacheClient {
    redis: ConnectionManager,
}

impl CacheClient {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    /// Fetch and deserialize a cached value. Errors are logged and
    /// reported as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.redis.clone();

        let raw: Option<String> = match conn.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed");
                return None;
            }
        };

        raw.and_then(|s| match serde_json::from_str(&s) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "cache entry failed to deserialize");
                None
            }
        })
    }

    /// Store a value with a TTL. Failures are logged and swallowed.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let mut conn = self.redis.clone();

        let raw = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache entry failed to serialize");
                return;
            }
        };

        if let Err(e) = conn.set_ex::<_, _, ()>(key, raw, ttl_secs).await {
            tracing::warn!(key, error = %e, "cache write failed");
        }
    }

    /// Drop a cached entry. Failures are logged and swallowed.
    pub async fn invalidate(&self, key: &str) {
        let mut conn = self.redis.clone();

        if let Err(e) = conn.del::<_, ()>(key).await {
            tracing::warn!(key, error = %e, "cache invalidation failed");
        }
    }
}
