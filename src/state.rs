//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor. All collaborators
//! (store, cache, notifier, clock) are injected here at boot rather than
//! reached through ambient globals.

use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::cache::CacheClient;
use crate::config::Config;
use crate::services::notification_service::Notifier;
use crate::utils::time::Clock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Redis connection manager
    pub redis: ConnectionManager,

    /// Read-through TTL cache for hot listings
    pub cache: CacheClient,

    /// Notification sink (persisted + realtime fan-out)
    pub notifier: Arc<dyn Notifier>,

    /// Wall clock source; injectable for tests
    pub clock: Arc<dyn Clock>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        redis: ConnectionManager,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        let cache = CacheClient::new(redis.clone());
        Self {
            inner: Arc::new(AppStateInner {
                db,
                redis,
                cache,
                notifier,
                clock,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager
    pub fn redis(&self) -> ConnectionManager {
        self.inner.redis.clone()
    }

    /// Get a reference to the cache client
    pub fn cache(&self) -> &CacheClient {
        &self.inner.cache
    }

    /// Get a clone of the notification sink handle
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.inner.notifier.clone()
    }

    /// Get a reference to the clock
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
