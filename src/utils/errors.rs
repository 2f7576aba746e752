//! Error handling for AstroLine
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the AstroLine application
#[derive(Error, Debug)]
pub enum AstrolineError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {telegram_id}")]
    UserNotFound { telegram_id: i64 },

    #[error("Product not found: {code}")]
    ProductNotFound { code: String },

    #[error("Purchase not found: {purchase_id}")]
    PurchaseNotFound { purchase_id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AstroLine operations
pub type Result<T> = std::result::Result<T, AstrolineError>;

impl AstrolineError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            AstrolineError::Database(_) => false,
            AstrolineError::Migration(_) => false,
            AstrolineError::Telegram(_) => true,
            AstrolineError::Config(_) => false,
            AstrolineError::ConfigLoad(_) => false,
            AstrolineError::PermissionDenied(_) => false,
            AstrolineError::UserNotFound { .. } => false,
            AstrolineError::ProductNotFound { .. } => false,
            AstrolineError::PurchaseNotFound { .. } => false,
            AstrolineError::InvalidInput(_) => false,
            AstrolineError::Serialization(_) => false,
            AstrolineError::Io(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AstrolineError::UserNotFound { telegram_id: 42 };
        assert_eq!(err.to_string(), "User not found: 42");

        let err = AstrolineError::PermissionDenied("admin only".to_string());
        assert_eq!(err.to_string(), "Permission denied: admin only");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(!AstrolineError::Config("missing token".to_string()).is_recoverable());
        assert!(AstrolineError::Io(std::io::Error::other("disk")).is_recoverable());
    }
}
