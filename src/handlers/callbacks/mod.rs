//! Callback query handlers
//!
//! Routes the main menu buttons and the premium purchase flow.

use std::sync::Arc;
use teloxide::{Bot, types::{CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MaybeInaccessibleMessage}, prelude::*};
use tracing::{debug, warn};

use crate::services::ServiceFactory;
use crate::utils::errors::{AstrolineError, Result};

/// Handle a callback query from an inline keyboard
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: Arc<ServiceFactory>,
) -> Result<()> {
    let telegram_id = query.from.id.0 as i64;

    let Some(data) = query.data.clone() else {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    debug!(telegram_id = telegram_id, data = %data, "Callback query received");

    let chat_id = callback_chat_id(&query);

    match data.as_str() {
        "menu:horoscope" => {
            answer_with_text(&bot, &query, "Вы выбрали «Гороскоп»").await?;
        }
        "menu:compatibility" => {
            answer_with_text(&bot, &query, "Вы выбрали «Совместимость»").await?;
        }
        "menu:dreambook" => {
            answer_with_text(&bot, &query, "Вы выбрали «Сонник»").await?;
        }
        "menu:premium" => {
            bot.answer_callback_query(query.id.clone()).await?;
            if let Some(chat_id) = chat_id {
                show_premium_products(&bot, chat_id, &services).await?;
            }
        }
        _ if data.starts_with("buy:") => {
            bot.answer_callback_query(query.id.clone()).await?;
            if let Some(chat_id) = chat_id {
                let code = &data["buy:".len()..];
                start_purchase(&bot, chat_id, telegram_id, code, &services).await?;
            }
        }
        _ => {
            warn!(telegram_id = telegram_id, data = %data, "Unknown callback data");
            bot.answer_callback_query(query.id.clone()).await?;
        }
    }

    Ok(())
}

/// Answer a callback query with a short notification
async fn answer_with_text(bot: &Bot, query: &CallbackQuery, text: &str) -> Result<()> {
    bot.answer_callback_query(query.id.clone()).text(text).await?;
    Ok(())
}

/// List active premium products with buy buttons
async fn show_premium_products(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    let products = services.payment_service.list_products().await?;

    if products.is_empty() {
        bot.send_message(chat_id, "Премиум-каталог пока пуст, загляните позже.").await?;
        return Ok(());
    }

    let keyboard = InlineKeyboardMarkup::new(
        products
            .iter()
            .map(|product| {
                vec![InlineKeyboardButton::callback(
                    format!("{} — {}", product.title, product.display_price()),
                    format!("buy:{}", product.code),
                )]
            })
            .collect::<Vec<_>>(),
    );

    bot.send_message(chat_id, "⭐ Премиум функции\n\nВыберите продукт:")
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Open a pending order and send the payment link
async fn start_purchase(
    bot: &Bot,
    chat_id: ChatId,
    telegram_id: i64,
    code: &str,
    services: &ServiceFactory,
) -> Result<()> {
    match services.payment_service.start_order(telegram_id, code).await {
        Ok(purchase) => {
            let url = services.payment_service.payment_url(&purchase);
            bot.send_message(
                chat_id,
                format!(
                    "Счёт №{} создан.\nК оплате: {}\n\nОплатить: {}",
                    purchase.id,
                    purchase.display_price(),
                    url
                ),
            )
            .await?;
        }
        Err(AstrolineError::ProductNotFound { .. }) => {
            bot.send_message(chat_id, "Этот продукт сейчас недоступен.").await?;
        }
        Err(AstrolineError::UserNotFound { .. }) => {
            bot.send_message(chat_id, "Профиль не найден — отправьте /start и попробуйте снова.").await?;
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Chat the callback originated from, when the message is still accessible
fn callback_chat_id(query: &CallbackQuery) -> Option<ChatId> {
    match &query.message {
        Some(MaybeInaccessibleMessage::Regular(message)) => Some(message.chat.id),
        Some(MaybeInaccessibleMessage::Inaccessible(message)) => Some(message.chat.id),
        None => None,
    }
}
