//! Product catalog model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    /// Stable slug used in callback buttons and configuration
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    /// Current list price in minor currency units (kopecks for RUB).
    /// The price actually charged is captured into the purchase row.
    pub price_minor: i64,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Human-readable price in major units, e.g. "299.00 RUB"
    pub fn display_price(&self) -> String {
        format!("{}.{:02} {}", self.price_minor / 100, self.price_minor % 100, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_minor: i64) -> Product {
        Product {
            id: 1,
            code: "premium_month".to_string(),
            title: "Премиум на месяц".to_string(),
            description: None,
            price_minor,
            currency: "RUB".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_price() {
        assert_eq!(product(29900).display_price(), "299.00 RUB");
        assert_eq!(product(105).display_price(), "1.05 RUB");
    }
}
