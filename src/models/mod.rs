//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod notification;
pub mod skill;
pub mod swap;
pub mod transaction;
pub mod user;

pub use notification::*;
pub use skill::*;
pub use swap::*;
pub use transaction::*;
pub use user::*;
