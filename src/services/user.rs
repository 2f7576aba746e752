//! User service implementation
//!
//! Read-side operations over user profiles. Writes to presence and
//! subscription fields belong to the pipeline middlewares, not here.

use std::collections::HashMap;
use tracing::debug;
use crate::database::repositories::UserRepository;
use crate::models::user::User;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Get user by Telegram ID
    pub async fn get_user_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>> {
        debug!(telegram_id = telegram_id, "Getting user by Telegram ID");
        self.user_repository.find_by_telegram_id(telegram_id).await
    }

    /// Get user statistics
    pub async fn get_user_statistics(&self) -> Result<HashMap<String, i64>> {
        debug!("Getting user statistics");

        let total_users = self.user_repository.count().await?;
        let subscribed_users = self.user_repository.count_subscribed().await?;

        let mut stats = HashMap::new();
        stats.insert("total_users".to_string(), total_users);
        stats.insert("subscribed_users".to_string(), subscribed_users);
        stats.insert("unsubscribed_users".to_string(), total_users - subscribed_users);

        Ok(stats)
    }
}
