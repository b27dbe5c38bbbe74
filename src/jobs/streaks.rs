//! Login-streak decay runner
//!
//! A streak survives as long as the user logged in yesterday or today.
//! The daily pass zeroes out every streak whose last login predates
//! yesterday's midnight.

use std::sync::Arc;

use chrono::{Days, NaiveTime};
use sqlx::PgPool;

use crate::{db::repositories::UserRepository, error::AppResult, utils::time::Clock};

/// Runner for the daily streak decay job
pub struct StreakRunner {
    db: PgPool,
    clock: Arc<dyn Clock>,
}

impl StreakRunner {
    pub fn new(db: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Reset streaks broken by a missed day. Returns how many were reset.
    pub async fn run(&self) -> AppResult<u64> {
        let now = self.clock.now();

        // Anyone whose last login is before yesterday's midnight missed
        // at least one full day
        let cutoff = now
            .date_naive()
            .checked_sub_days(Days::new(1))
            .unwrap_or(now.date_naive())
            .and_time(NaiveTime::MIN)
            .and_utc();

        let reset = UserRepository::reset_broken_streaks(&self.db, cutoff).await?;

        if reset > 0 {
            tracing::info!(reset, "login streaks reset");
        }

        Ok(reset)
    }
}
