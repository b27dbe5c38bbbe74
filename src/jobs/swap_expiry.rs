//! Swap auto-expiry runner
//!
//! Scans for scheduled/active swaps past their expiry that still owe
//! rewards and drives each through the shared completion path as the
//! system actor. Swaps are processed independently: one failure is
//! logged and retried a bounded number of times, never aborting the
//! batch. Double-award safety comes from the completion claim itself,
//! so racing an interactive completion on the same swap is harmless.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{EXPIRY_MAX_RETRIES, EXPIRY_SCAN_BATCH_SIZE},
    db::repositories::SwapRepository,
    error::AppResult,
    services::notification_service::Notifier,
    services::swap_service::SwapService,
    utils::time::Clock,
};

/// Counters for one expiry scan
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpiryStats {
    pub scanned: usize,
    pub completed: usize,
    /// Swaps that lost the completion claim to a concurrent transition
    pub skipped: usize,
    pub errors: usize,
}

/// Runner for the swap auto-expiry job
pub struct ExpiryRunner {
    db: PgPool,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl ExpiryRunner {
    pub fn new(db: PgPool, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            notifier,
            clock,
        }
    }

    /// Run one scan over expired swaps
    pub async fn run(&self) -> AppResult<ExpiryStats> {
        let now = self.clock.now();
        let expired = SwapRepository::find_expired(&self.db, now, EXPIRY_SCAN_BATCH_SIZE).await?;

        let mut stats = ExpiryStats {
            scanned: expired.len(),
            ..Default::default()
        };

        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "processing expired swaps");
        }

        for swap in expired {
            match self.process_with_retry(&swap.id).await {
                Ok(true) => stats.completed += 1,
                Ok(false) => stats.skipped += 1,
                Err(e) => {
                    stats.errors += 1;
                    tracing::error!(swap_id = %swap.id, error = %e, "failed to auto-complete swap");
                }
            }
        }

        Ok(stats)
    }

    /// Complete one swap, retrying transient store errors a bounded
    /// number of times. The claim makes retries reward-safe.
    async fn process_with_retry(&self, swap_id: &Uuid) -> AppResult<bool> {
        let mut attempt = 0;
        loop {
            let now = self.clock.now();
            match SwapService::complete_swap(&self.db, self.notifier.clone(), now, swap_id).await {
                Ok(outcome) => return Ok(outcome.is_some()),
                Err(e) if e.is_transient() && attempt < EXPIRY_MAX_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        %swap_id,
                        attempt,
                        error = %e,
                        "transient error auto-completing swap, retrying"
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(100 * attempt as u64))
                        .await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
