//! Help command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let help_text = "🌟 AstroLine\n\n\
        /start - Открыть главное меню\n\
        /help - Показать это сообщение\n\n\
        Гороскопы, совместимость и сонник — в меню.\n\
        По вопросам оплаты напишите администратору.";

    bot.send_message(msg.chat.id, help_text).await?;
    Ok(())
}
