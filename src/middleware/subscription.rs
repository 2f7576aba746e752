//! Subscription tracking middleware
//!
//! Maintains the two-state subscription flag from chat membership updates.
//! Only private chats count: a user re-opening the bot reports "member",
//! a user blocking or removing it reports "kicked"; group membership is
//! not a subscription signal. The tracker never creates rows, so an event
//! for an unseen user updates nothing and that is not an error.

use async_trait::async_trait;
use sqlx::PgPool;
use teloxide::types::{ChatMemberStatus, ChatMemberUpdated, Update, UpdateKind};
use tracing::{debug, info};

use crate::database::UserRepository;
use crate::middleware::pipeline::{Context, Next, UpdateMiddleware};
use crate::utils::errors::Result;

pub struct SubscriptionTracker {
    db_ctx_key: String,
}

impl SubscriptionTracker {
    pub fn new(db_ctx_key: impl Into<String>) -> Self {
        Self {
            db_ctx_key: db_ctx_key.into(),
        }
    }
}

#[async_trait]
impl UpdateMiddleware for SubscriptionTracker {
    async fn handle(&self, update: &Update, ctx: &mut Context, next: Next<'_>) -> Result<()> {
        if let UpdateKind::MyChatMember(event) = &update.kind {
            match ctx.get::<PgPool>(&self.db_ctx_key) {
                Some(pool) => {
                    if let Some((telegram_id, subscribed)) = membership_transition(event) {
                        let rows = UserRepository::new(pool.as_ref().clone())
                            .set_subscription(telegram_id, subscribed)
                            .await?;
                        if rows == 0 {
                            debug!(telegram_id = telegram_id, "membership change for unknown user, nothing updated");
                        } else {
                            info!(telegram_id = telegram_id, subscribed = subscribed, "subscription state updated");
                        }
                    }
                }
                None => {
                    debug!("subscription tracking skipped: no database handle in context");
                }
            }
        }

        next.run(update, ctx).await
    }
}

/// Decide the subscription transition for a membership update: the target
/// telegram id (chat id equals user id in a private chat) and the new flag.
/// None when the chat is not private or the status is not a signal.
pub fn membership_transition(event: &ChatMemberUpdated) -> Option<(i64, bool)> {
    if !event.chat.is_private() {
        return None;
    }

    subscription_flag(event.new_chat_member.status()).map(|subscribed| (event.chat.id.0, subscribed))
}

/// Map a membership status onto the subscription flag; statuses other than
/// "member" and "kicked" are self-loops.
pub fn subscription_flag(status: ChatMemberStatus) -> Option<bool> {
    match status {
        ChatMemberStatus::Member => Some(true),
        // "kicked" in Bot API terms: the user blocked or removed the bot
        ChatMemberStatus::Banned => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_status_subscribes() {
        assert_eq!(subscription_flag(ChatMemberStatus::Member), Some(true));
    }

    #[test]
    fn test_kicked_status_unsubscribes() {
        assert_eq!(subscription_flag(ChatMemberStatus::Banned), Some(false));
    }

    #[test]
    fn test_other_statuses_are_self_loops() {
        assert_eq!(subscription_flag(ChatMemberStatus::Left), None);
        assert_eq!(subscription_flag(ChatMemberStatus::Restricted), None);
        assert_eq!(subscription_flag(ChatMemberStatus::Administrator), None);
        assert_eq!(subscription_flag(ChatMemberStatus::Owner), None);
    }
}
