//! Database handle injection middleware
//!
//! Publishes the connection pool into the per-event context under the
//! configured key. Stages further down look the handle up by that key and
//! skip their work when it is absent, so leaving this stage out of the
//! chain degrades the pipeline to a pass-through instead of breaking it.

use async_trait::async_trait;
use sqlx::PgPool;
use teloxide::types::Update;

use crate::middleware::pipeline::{Context, Next, UpdateMiddleware};
use crate::utils::errors::Result;

pub struct DatabaseMiddleware {
    pool: PgPool,
    db_ctx_key: String,
}

impl DatabaseMiddleware {
    pub fn new(pool: PgPool, db_ctx_key: impl Into<String>) -> Self {
        Self {
            pool,
            db_ctx_key: db_ctx_key.into(),
        }
    }
}

#[async_trait]
impl UpdateMiddleware for DatabaseMiddleware {
    async fn handle(&self, update: &Update, ctx: &mut Context, next: Next<'_>) -> Result<()> {
        ctx.insert(self.db_ctx_key.clone(), self.pool.clone());
        next.run(update, ctx).await
    }
}
