//! Cron scheduler for background jobs

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::Config;
use crate::jobs::streaks::StreakRunner;
use crate::jobs::swap_expiry::ExpiryRunner;
use crate::services::notification_service::Notifier;
use crate::utils::time::Clock;

/// Scheduler that runs recurring jobs on cron schedules.
/// Owned by `main`: started after boot, shut down on graceful exit.
pub struct BackgroundScheduler {
    config: Arc<Config>,
    db_pool: PgPool,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    scheduler: JobScheduler,
}

impl BackgroundScheduler {
    /// Create a new background scheduler
    pub async fn new(
        config: Arc<Config>,
        db_pool: PgPool,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            config,
            db_pool,
            notifier,
            clock,
            scheduler,
        })
    }

    /// Add all jobs to the scheduler
    pub async fn setup_jobs(&mut self) -> Result<()> {
        self.add_swap_expiry_job().await?;
        self.add_streak_decay_job().await?;
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<()> {
        self.scheduler.start().await?;
        Ok(())
    }

    /// Shutdown the scheduler gracefully
    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Add the swap auto-expiry job
    async fn add_swap_expiry_job(&self) -> Result<()> {
        let db_pool = self.db_pool.clone();
        let notifier = self.notifier.clone();
        let clock = self.clock.clone();
        let cron_expr = self.config.jobs.swap_expiry_cron.clone();

        tracing::info!("Adding swap expiry job: {}", cron_expr);

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _lock| {
            let db_pool = db_pool.clone();
            let notifier = notifier.clone();
            let clock = clock.clone();

            Box::pin(async move {
                let runner = ExpiryRunner::new(db_pool, notifier, clock);

                match runner.run().await {
                    Ok(stats) => {
                        if stats.scanned > 0 {
                            tracing::info!(
                                "Swap expiry: scanned={}, completed={}, skipped={}, errors={}",
                                stats.scanned,
                                stats.completed,
                                stats.skipped,
                                stats.errors
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!("Swap expiry scan failed: {}", e);
                    }
                }
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }

    /// Add the daily streak decay job
    async fn add_streak_decay_job(&self) -> Result<()> {
        let db_pool = self.db_pool.clone();
        let clock = self.clock.clone();
        let cron_expr = self.config.jobs.streak_decay_cron.clone();

        tracing::info!("Adding streak decay job: {}", cron_expr);

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _lock| {
            let db_pool = db_pool.clone();
            let clock = clock.clone();

            Box::pin(async move {
                let runner = StreakRunner::new(db_pool, clock);

                match runner.run().await {
                    Ok(reset) => {
                        tracing::info!("Streak decay: reset={}", reset);
                    }
                    Err(e) => {
                        tracing::error!("Streak decay failed: {}", e);
                    }
                }
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }
}
