//! Purchase model and payment lifecycle enums

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Payment provider identifier, needed for idempotency and reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_provider", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Prodamus,
    Robokassa,
    /// Manual payments and corrections confirmed by an admin
    Manual,
}

/// Order lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, awaiting payment or a provider webhook
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Purchase {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    /// What was actually paid at purchase time, not the catalog price
    pub price_minor: i64,
    pub currency: String,
    pub provider: PaymentProvider,
    /// Provider-side order/invoice id, used for reconciliation, refunds
    /// and webhook replay deduplication
    pub external_order_id: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Purchase {
    /// Human-readable deal price in major units, e.g. "299.00 RUB"
    pub fn display_price(&self) -> String {
        format!("{}.{:02} {}", self.price_minor / 100, self.price_minor % 100, self.currency)
    }
}

/// Fields required to open a new pending purchase
#[derive(Debug, Clone)]
pub struct CreatePurchaseRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub price_minor: i64,
    pub currency: String,
    pub provider: PaymentProvider,
    pub external_order_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serde_names() {
        assert_eq!(serde_json::to_string(&PaymentProvider::Prodamus).unwrap(), "\"prodamus\"");
        assert_eq!(serde_json::to_string(&PaymentProvider::Manual).unwrap(), "\"manual\"");
        let provider: PaymentProvider = serde_json::from_str("\"robokassa\"").unwrap();
        assert_eq!(provider, PaymentProvider::Robokassa);
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"pending\"");
        let status: OrderStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, OrderStatus::Refunded);
    }
}
