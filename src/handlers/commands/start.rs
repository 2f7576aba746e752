//! Start command handler
//!
//! Handles the /start command: greets the user and shows the main menu.

use std::sync::Arc;
use teloxide::{Bot, types::{InlineKeyboardButton, InlineKeyboardMarkup, Message}, prelude::*};
use tracing::{debug, info};

use crate::services::ServiceFactory;
use crate::utils::errors::{AstrolineError, Result};

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, services: Arc<ServiceFactory>) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        AstrolineError::InvalidInput("No user in message".to_string())
    })?;

    let telegram_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(telegram_id = telegram_id, chat_id = ?chat_id, "Processing /start command");

    // The presence middleware has already upserted the profile for this
    // event; a missing row here means the database was unavailable.
    let greeting = match services.user_service.get_user_by_telegram_id(telegram_id).await? {
        Some(_) => {
            info!(telegram_id = telegram_id, "Known user started the bot");
            format!("С возвращением, {}! ✨", user.first_name)
        }
        None => {
            info!(telegram_id = telegram_id, "New user started the bot");
            format!("Добро пожаловать, {}! ✨", user.first_name)
        }
    };

    bot.send_message(chat_id, format!("{greeting}\n\nВыберите опцию:"))
        .reply_markup(main_menu_keyboard())
        .await?;

    Ok(())
}

/// Main menu keyboard
pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🔮 Гороскоп", "menu:horoscope")],
        vec![InlineKeyboardButton::callback("💞 Совместимость", "menu:compatibility")],
        vec![InlineKeyboardButton::callback("🌙 Сонник", "menu:dreambook")],
        vec![InlineKeyboardButton::callback("⭐ Премиум функции", "menu:premium")],
    ])
}
