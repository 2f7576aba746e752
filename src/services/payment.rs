//! Payment service implementation
//!
//! Opens pending orders from the bot UI and confirms payments. Provider
//! webhooks are delivered out-of-band; the manual confirmation path is the
//! admin /paid command. Confirmation is idempotent so replayed provider
//! notifications and repeated commands cannot double-record a payment.

use tracing::{debug, info};

use crate::config::PaymentsConfig;
use crate::database::repositories::{ProductRepository, PurchaseRepository, UserRepository};
use crate::models::product::Product;
use crate::models::purchase::{CreatePurchaseRequest, OrderStatus, Purchase};
use crate::utils::errors::{AstrolineError, Result};

#[derive(Debug, Clone)]
pub struct PaymentService {
    users: UserRepository,
    products: ProductRepository,
    purchases: PurchaseRepository,
    config: PaymentsConfig,
}

impl PaymentService {
    pub fn new(
        users: UserRepository,
        products: ProductRepository,
        purchases: PurchaseRepository,
        config: PaymentsConfig,
    ) -> Self {
        Self {
            users,
            products,
            purchases,
            config,
        }
    }

    /// List products currently offered in the premium menu
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.products.list_active().await
    }

    /// Open a pending order for a product, capturing its current price.
    ///
    /// The user row must already exist; only the presence synchronizer
    /// creates users, and it has run for any event that could lead here.
    pub async fn start_order(&self, telegram_id: i64, product_code: &str) -> Result<Purchase> {
        debug!(telegram_id = telegram_id, product_code = product_code, "Starting order");

        let user = self
            .users
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(AstrolineError::UserNotFound { telegram_id })?;

        let product = self
            .products
            .find_by_code(product_code)
            .await?
            .filter(|product| product.is_active)
            .ok_or_else(|| AstrolineError::ProductNotFound {
                code: product_code.to_string(),
            })?;

        let request = CreatePurchaseRequest {
            user_id: user.id,
            product_id: product.id,
            price_minor: product.price_minor,
            currency: product.currency.clone(),
            provider: self.config.default_provider,
            external_order_id: None,
        };

        let purchase = self.purchases.create(&request).await?;
        info!(
            telegram_id = telegram_id,
            purchase_id = purchase.id,
            product_code = product_code,
            "Pending order created"
        );

        Ok(purchase)
    }

    /// Payment page URL for a pending order
    pub fn payment_url(&self, purchase: &Purchase) -> String {
        format!("{}?order={}", self.config.payment_url_base, purchase.id)
    }

    /// Confirm a payment, idempotently.
    ///
    /// An order already in the paid state is returned unchanged, so a
    /// replayed confirmation is safe.
    pub async fn confirm_payment(&self, purchase_id: i64) -> Result<Purchase> {
        let existing = self
            .purchases
            .find_by_id(purchase_id)
            .await?
            .ok_or(AstrolineError::PurchaseNotFound { purchase_id })?;

        if existing.status == OrderStatus::Paid {
            debug!(purchase_id = purchase_id, "Payment already confirmed, nothing to do");
            return Ok(existing);
        }

        let paid = self
            .purchases
            .mark_paid(purchase_id)
            .await?
            .ok_or(AstrolineError::PurchaseNotFound { purchase_id })?;

        info!(purchase_id = purchase_id, "Payment confirmed");
        Ok(paid)
    }

    /// Count of confirmed purchases, for the admin stats view
    pub async fn count_paid(&self) -> Result<i64> {
        self.purchases.count_by_status(OrderStatus::Paid).await
    }
}
