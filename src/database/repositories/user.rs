//! User repository implementation
//!
//! Presence writes go through a single atomic upsert keyed on telegram_id:
//! conflict on an existing row resolves to an update, so concurrent writers
//! can never produce duplicates. Subscription transitions are plain updates
//! that may legitimately match zero rows.

use sqlx::PgPool;
use crate::models::user::{User, SyncUserRequest};
use crate::utils::errors::AstrolineError;

const USER_COLUMNS: &str = "id, telegram_id, username, email, full_name, lang, is_premium, \
     birth_date, gender, created_at, last_seen_at, is_subscribed, unsubscribed_at";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert-or-update the presence fields of a user row.
    ///
    /// Every field is set from the event, not merged: a user who dropped
    /// their username gets the stored one cleared. last_seen_at advances
    /// to the server clock on every successful call.
    pub async fn upsert_presence(&self, request: &SyncUserRequest) -> Result<(), AstrolineError> {
        sqlx::query(
            r#"
            INSERT INTO users (telegram_id, username, lang, is_premium, last_seen_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (telegram_id) DO UPDATE
            SET username = EXCLUDED.username,
                lang = EXCLUDED.lang,
                is_premium = EXCLUDED.is_premium,
                last_seen_at = EXCLUDED.last_seen_at
            "#
        )
        .bind(request.telegram_id)
        .bind(&request.username)
        .bind(&request.lang)
        .bind(request.is_premium)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Flip the subscription flag, stamping the transition time.
    ///
    /// Returns the number of affected rows; zero means the user has never
    /// been seen by the presence synchronizer and is not an error.
    pub async fn set_subscription(&self, telegram_id: i64, is_subscribed: bool) -> Result<u64, AstrolineError> {
        let result = sqlx::query(
            "UPDATE users SET is_subscribed = $2, unsubscribed_at = NOW() WHERE telegram_id = $1"
        )
        .bind(telegram_id)
        .bind(is_subscribed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Find user by Telegram ID
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, AstrolineError> {
        let user = sqlx::query_as::<_, User>(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE telegram_id = $1")
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, AstrolineError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count users currently subscribed
    pub async fn count_subscribed(&self) -> Result<i64, AstrolineError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_subscribed = TRUE")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
