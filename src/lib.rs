//! AstroLine Telegram Bot
//!
//! A Telegram bot front-end for a horoscope subscription flow: menu-driven
//! dialog UI, user presence and subscription tracking, and purchase
//! recording for third-party payment providers. Every inbound update runs
//! through a middleware pipeline (logging, database handle injection,
//! subscription tracking, presence synchronization) before it reaches the
//! command and callback handlers.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AstrolineError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
