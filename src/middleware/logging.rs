//! Request logging middleware
//!
//! First stage of the pipeline: logs every inbound update with its
//! originating user and the total processing duration, including the time
//! spent in all downstream stages and the router.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;
use teloxide::types::{Update, UpdateKind};
use tracing::{debug, warn};

use crate::middleware::pipeline::{Context, Next, UpdateMiddleware};
use crate::middleware::presence::extract_event_user;
use crate::utils::errors::Result;

#[derive(Default)]
pub struct RequestLoggingMiddleware;

impl RequestLoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UpdateMiddleware for RequestLoggingMiddleware {
    async fn handle(&self, update: &Update, ctx: &mut Context, next: Next<'_>) -> Result<()> {
        let started = Instant::now();
        let kind = update_kind_name(&update.kind);

        let user_info = extract_event_user(&update.kind).map(|user| {
            json!({
                "id": user.id.0,
                "username": user.username,
            })
        });
        debug!(update_id = update.id.0, kind = kind, user = ?user_info, "update received");

        let result = next.run(update, ctx).await;

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => {
                debug!(update_id = update.id.0, kind = kind, duration_ms = duration_ms, "update processed");
            }
            Err(error) => {
                warn!(update_id = update.id.0, kind = kind, duration_ms = duration_ms, error = %error, "update processing failed");
            }
        }

        result
    }
}

fn update_kind_name(kind: &UpdateKind) -> &'static str {
    match kind {
        UpdateKind::Message(_) => "message",
        UpdateKind::EditedMessage(_) => "edited_message",
        UpdateKind::CallbackQuery(_) => "callback_query",
        UpdateKind::InlineQuery(_) => "inline_query",
        UpdateKind::ChosenInlineResult(_) => "chosen_inline_result",
        UpdateKind::ShippingQuery(_) => "shipping_query",
        UpdateKind::PreCheckoutQuery(_) => "pre_checkout_query",
        UpdateKind::PollAnswer(_) => "poll_answer",
        UpdateKind::MyChatMember(_) => "my_chat_member",
        UpdateKind::ChatMember(_) => "chat_member",
        _ => "other",
    }
}
