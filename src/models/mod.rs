//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod product;
pub mod purchase;

// Re-export commonly used models
pub use user::{User, Gender, SyncUserRequest, normalize_lang};
pub use product::Product;
pub use purchase::{Purchase, CreatePurchaseRequest, PaymentProvider, OrderStatus};
