//! Product repository implementation

use sqlx::PgPool;
use crate::models::product::Product;
use crate::utils::errors::AstrolineError;

const PRODUCT_COLUMNS: &str =
    "id, code, title, description, price_minor, currency, is_active, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products currently offered, stable order for menu rendering
    pub async fn list_active(&self) -> Result<Vec<Product>, AstrolineError> {
        let products = sqlx::query_as::<_, Product>(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = TRUE ORDER BY id")
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Find a product by its stable code
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Product>, AstrolineError> {
        let product = sqlx::query_as::<_, Product>(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE code = $1")
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}
