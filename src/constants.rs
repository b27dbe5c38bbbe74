//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

// =============================================================================
// SKILLCOIN ECONOMY
// =============================================================================

/// Rewards and starting balances, in skillcoins
pub mod rewards {
    /// Starting balance for a new account
    pub const STARTING_BALANCE: i64 = 50;

    /// Starting balance for an account registered with a valid referral code
    pub const REFERRED_STARTING_BALANCE: i64 = 100;

    /// Welcome bonus ledgered for referred signups
    /// (the difference between the referred and default starting balances)
    pub const REFERRAL_WELCOME_BONUS: i64 = 50;

    /// Bonus granted to the referrer when a referred user registers
    pub const REFERRAL_BONUS: i64 = 100;

    /// Base reward for completing a swap (per participant)
    pub const SWAP_COMPLETION_REWARD: i64 = 50;

    /// XP granted to each participant on swap completion
    pub const SWAP_COMPLETION_XP: i64 = 20;

    /// Bonus granted every 7th consecutive login day
    pub const LOGIN_STREAK_BONUS: i64 = 50;

    /// Consecutive-day interval at which the streak bonus fires
    pub const LOGIN_STREAK_INTERVAL: i32 = 7;

    /// Completed-swap counts that trigger a one-time milestone bonus,
    /// paired with the bonus amount
    pub const SWAP_MILESTONES: &[(i32, i64)] = &[(10, 100), (50, 500), (100, 1000)];
}

/// XP divisor in the level formula: level = max(1, floor(sqrt(xp / 50)) + 1)
pub const XP_PER_LEVEL_UNIT: i64 = 50;

// =============================================================================
// SWAP DEFAULTS
// =============================================================================

/// Default swap session duration when none is supplied
pub const DEFAULT_SWAP_DURATION: &str = "1 hour";

/// Maximum swaps returned by a single expiry scan
pub const EXPIRY_SCAN_BATCH_SIZE: i64 = 100;

/// Retries per swap for transient store errors in the expiry job
pub const EXPIRY_MAX_RETRIES: u32 = 3;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, USER];
}

// =============================================================================
// TRANSACTION SOURCES
// =============================================================================

/// Ledger entry source identifiers
pub mod sources {
    pub const SWAP: &str = "swap";
    pub const REFERRAL: &str = "referral";
    pub const MILESTONE: &str = "milestone";
    pub const STREAK: &str = "streak";
    pub const SPEND: &str = "spend";
}

// =============================================================================
// NOTIFICATION KINDS
// =============================================================================

/// Notification kind identifiers
pub mod notifications {
    pub const SWAP_REQUEST: &str = "swap_request";
    pub const SWAP_ACCEPTED: &str = "swap_accepted";
    pub const SWAP_REJECTED: &str = "swap_rejected";
    pub const SWAP_SCHEDULED: &str = "swap_scheduled";
    pub const SWAP_CANCELLED: &str = "swap_cancelled";
    pub const SWAP_COMPLETED: &str = "swap_completed";
    pub const REFERRAL_JOINED: &str = "referral_joined";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 5;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Swap endpoint - max requests
    pub const SWAP_MAX_REQUESTS: i64 = 30;
    /// Swap endpoint - window in seconds
    pub const SWAP_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// CACHING
// =============================================================================

/// Cache TTLs in seconds
pub mod cache_ttl {
    /// Leaderboard listings; short enough that reward grants surface quickly
    pub const LEADERBOARD_SECS: u64 = 30;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Referral code length in characters
pub const REFERRAL_CODE_LENGTH: usize = 8;

/// Maximum skill title length
pub const MAX_SKILL_TITLE_LENGTH: u64 = 128;

/// Maximum free-text skill name length on a swap
pub const MAX_SWAP_SKILL_LENGTH: u64 = 128;

/// Maximum swap description length
pub const MAX_SWAP_DESCRIPTION_LENGTH: u64 = 2000;
