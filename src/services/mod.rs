//! Services module
//!
//! This module contains business logic services

pub mod payment;
pub mod user;

// Re-export commonly used services
pub use payment::PaymentService;
pub use user::UserService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub payment_service: PaymentService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: &DatabaseService) -> Self {
        let user_service = UserService::new(database.users.clone());
        let payment_service = PaymentService::new(
            database.users.clone(),
            database.products.clone(),
            database.purchases.clone(),
            settings.payments.clone(),
        );

        Self {
            user_service,
            payment_service,
        }
    }
}
