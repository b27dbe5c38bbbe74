//! Database repositories

pub mod notification_repo;
pub mod swap_repo;
pub mod transaction_repo;
pub mod user_repo;

pub use notification_repo::NotificationRepository;
pub use swap_repo::SwapRepository;
pub use transaction_repo::TransactionRepository;
pub use user_repo::UserRepository;
