//! Presence synchronization middleware
//!
//! Keeps the user row fresh on every inbound event without paying a write
//! per event: identity, locale, premium flag and last_seen_at are upserted
//! at most once per TTL window per user. Events without an originating
//! user, and events processed while no database handle is in the context,
//! pass through untouched.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use teloxide::types::{MaybeAnonymousUser, Update, UpdateKind, User};
use tracing::debug;

use crate::config::SyncConfig;
use crate::database::UserRepository;
use crate::middleware::pipeline::{Context, Next, UpdateMiddleware};
use crate::middleware::throttle::SyncThrottle;
use crate::models::user::SyncUserRequest;
use crate::utils::errors::Result;

pub struct PresenceSynchronizer {
    db_ctx_key: String,
    throttle: SyncThrottle,
}

impl PresenceSynchronizer {
    /// The throttle is owned by this instance; a second synchronizer (or a
    /// second process) keeps its own windows.
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            db_ctx_key: config.db_ctx_key.clone(),
            throttle: SyncThrottle::new(config.ttl.as_duration()),
        }
    }
}

#[async_trait]
impl UpdateMiddleware for PresenceSynchronizer {
    async fn handle(&self, update: &Update, ctx: &mut Context, next: Next<'_>) -> Result<()> {
        let pool = match ctx.get::<PgPool>(&self.db_ctx_key) {
            Some(pool) => pool,
            None => {
                debug!("presence sync skipped: no database handle in context");
                return next.run(update, ctx).await;
            }
        };

        if let Some(user) = extract_event_user(&update.kind) {
            let telegram_id = user.id.0 as i64;
            if self.throttle.try_acquire(telegram_id, Instant::now()) {
                let request = SyncUserRequest::new(
                    telegram_id,
                    user.username.clone(),
                    user.language_code.as_deref(),
                    user.is_premium,
                );
                UserRepository::new(pool.as_ref().clone())
                    .upsert_presence(&request)
                    .await?;
                debug!(telegram_id = telegram_id, lang = %request.lang, "user presence synced");
            }
        }

        next.run(update, ctx).await
    }
}

/// Return the originating user of an update, inspecting the event variants
/// in fixed priority order. Variants that cannot carry a user, and poll
/// answers cast by anonymous channel voters, yield None.
pub fn extract_event_user(kind: &UpdateKind) -> Option<&User> {
    match kind {
        UpdateKind::Message(message) => message.from.as_ref(),
        UpdateKind::EditedMessage(message) => message.from.as_ref(),
        UpdateKind::CallbackQuery(query) => Some(&query.from),
        UpdateKind::InlineQuery(query) => Some(&query.from),
        UpdateKind::ChosenInlineResult(result) => Some(&result.from),
        UpdateKind::ShippingQuery(query) => Some(&query.from),
        UpdateKind::PreCheckoutQuery(query) => Some(&query.from),
        UpdateKind::PollAnswer(answer) => match &answer.voter {
            MaybeAnonymousUser::User(user) => Some(user),
            MaybeAnonymousUser::Chat(_) => None,
        },
        UpdateKind::MyChatMember(event) => Some(&event.from),
        UpdateKind::ChatMember(event) => Some(&event.from),
        _ => None,
    }
}
