//! Business logic services

pub mod auth_service;
pub mod gamification_service;
pub mod notification_service;
pub mod referral_service;
pub mod reward_service;
pub mod swap_service;
pub mod user_service;
pub mod wallet_service;

pub use auth_service::AuthService;
pub use gamification_service::GamificationService;
pub use notification_service::NotificationService;
pub use referral_service::ReferralService;
pub use reward_service::RewardService;
pub use swap_service::SwapService;
pub use user_service::UserService;
pub use wallet_service::WalletService;
