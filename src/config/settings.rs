//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    pub payments: PaymentsConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub admin_ids: Vec<i64>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Presence synchronization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Minimum interval between two presence writes for the same user
    pub ttl: SyncTtl,
    /// Context key under which the database handle is published per event
    pub db_ctx_key: String,
}

/// Recognized presence sync TTL windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SyncTtl {
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "12h")]
    Hours12,
    #[serde(rename = "24h")]
    Hours24,
}

impl SyncTtl {
    pub fn as_duration(self) -> Duration {
        match self {
            SyncTtl::Hour => Duration::from_secs(60 * 60),
            SyncTtl::Hours12 => Duration::from_secs(12 * 60 * 60),
            SyncTtl::Hours24 => Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Payment provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentsConfig {
    /// Provider used for orders started from the bot UI
    pub default_provider: crate::models::purchase::PaymentProvider,
    /// Base URL of the provider payment page; the order id is appended
    pub payment_url_base: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("ASTROLINE"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AstrolineError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/astroline".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            sync: SyncConfig {
                ttl: SyncTtl::Hours12,
                db_ctx_key: "db".to_string(),
            },
            payments: PaymentsConfig {
                default_provider: crate::models::purchase::PaymentProvider::Prodamus,
                payment_url_base: "https://astroline.payform.ru/pay".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/astroline".to_string(),
            },
        }
    }
}
