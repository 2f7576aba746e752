//! Purchase repository implementation
//!
//! The (provider, external_order_id) unique key carries the idempotency
//! contract: a replayed provider notification conflicts instead of
//! inserting a second paid row.

use sqlx::PgPool;
use crate::models::purchase::{Purchase, CreatePurchaseRequest, OrderStatus};
use crate::utils::errors::AstrolineError;

const PURCHASE_COLUMNS: &str = "id, user_id, product_id, price_minor, currency, provider, \
     external_order_id, status, created_at, paid_at";

#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new pending purchase, capturing the deal price
    pub async fn create(&self, request: &CreatePurchaseRequest) -> Result<Purchase, AstrolineError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            &format!(
                r#"
                INSERT INTO purchases (user_id, product_id, price_minor, currency, provider, external_order_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {PURCHASE_COLUMNS}
                "#
            )
        )
        .bind(request.user_id)
        .bind(request.product_id)
        .bind(request.price_minor)
        .bind(&request.currency)
        .bind(request.provider)
        .bind(&request.external_order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(purchase)
    }

    /// Find purchase by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Purchase>, AstrolineError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            &format!("SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(purchase)
    }

    /// Mark a pending purchase as paid, stamping paid_at.
    ///
    /// The status guard keeps the transition one-way; an already paid row
    /// is left untouched and None is returned.
    pub async fn mark_paid(&self, id: i64) -> Result<Option<Purchase>, AstrolineError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            &format!(
                r#"
                UPDATE purchases
                SET status = $2, paid_at = NOW()
                WHERE id = $1 AND status <> $2
                RETURNING {PURCHASE_COLUMNS}
                "#
            )
        )
        .bind(id)
        .bind(OrderStatus::Paid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(purchase)
    }

    /// Count purchases in a given status
    pub async fn count_by_status(&self, status: OrderStatus) -> Result<i64, AstrolineError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM purchases WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
