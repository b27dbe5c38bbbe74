//! SkillSwap - Skill-Exchange Platform Backend
//!
//! This library provides the core functionality for the SkillSwap platform:
//! peer-to-peer skill swaps with a full lifecycle state machine, a
//! skillcoin/XP reward engine backed by an append-only ledger, referral
//! bonuses, and a background job that auto-completes expired sessions.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//! - **Jobs**: Cron-driven background tasks

pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
