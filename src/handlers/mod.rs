//! Handlers module
//!
//! Routes updates that passed the middleware pipeline to command and
//! callback handlers.

pub mod callbacks;
pub mod commands;

use std::sync::Arc;
use teloxide::Bot;
use teloxide::types::{Me, Update, UpdateKind};
use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use commands::Command;

/// Terminal stage of the update pipeline: dispatch to handlers by kind.
///
/// Membership changes need no handling here; the subscription tracker has
/// already recorded them upstream.
pub async fn route_update(
    bot: Bot,
    update: &Update,
    me: &Me,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> Result<()> {
    match &update.kind {
        UpdateKind::Message(message) => {
            if let Some(text) = message.text() {
                match Command::parse(text, me.username()) {
                    Ok(command) => {
                        return commands::dispatch_command(bot, message.clone(), command, services, settings).await;
                    }
                    Err(_) => {
                        debug!(chat_id = message.chat.id.0, "Non-command message ignored");
                    }
                }
            }
            Ok(())
        }
        UpdateKind::CallbackQuery(query) => {
            callbacks::handle_callback_query(bot, query.clone(), services).await
        }
        _ => {
            debug!("Update kind not routed to any handler");
            Ok(())
        }
    }
}
