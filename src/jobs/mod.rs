//! Background jobs
//!
//! A cron-driven scheduler owns two recurring tasks: the swap auto-expiry
//! scan and the daily login-streak decay. The scheduler is constructed,
//! started, and shut down explicitly from `main`; nothing here is reached
//! through import side effects.

pub mod scheduler;
pub mod streaks;
pub mod swap_expiry;

pub use scheduler::BackgroundScheduler;
pub use streaks::StreakRunner;
pub use swap_expiry::{ExpiryRunner, ExpiryStats};
