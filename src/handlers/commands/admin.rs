//! Admin command handlers
//!
//! Statistics and manual payment confirmation, both gated on the
//! configured admin list.

use std::sync::Arc;
use teloxide::{Bot, types::Message, prelude::*};
use tracing::{info, warn};

use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::utils::errors::{AstrolineError, Result};

/// Handle /stats command (admin only)
pub async fn handle_stats(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> Result<()> {
    let Some(admin_id) = authorized_admin(&msg, &settings) else {
        bot.send_message(msg.chat.id, "Эта команда доступна только администраторам.").await?;
        return Ok(());
    };

    let stats = services.user_service.get_user_statistics().await?;
    let paid_orders = services.payment_service.count_paid().await?;

    let text = format!(
        "📊 Статистика\n\n\
         👥 Пользователей: {}\n\
         ✅ Подписаны: {}\n\
         🚫 Отписались: {}\n\
         💳 Оплаченных заказов: {}",
        stats.get("total_users").copied().unwrap_or(0),
        stats.get("subscribed_users").copied().unwrap_or(0),
        stats.get("unsubscribed_users").copied().unwrap_or(0),
        paid_orders,
    );

    bot.send_message(msg.chat.id, text).await?;
    info!(admin_id = admin_id, "Stats requested");
    Ok(())
}

/// Handle /paid command (admin only): confirm a manual payment
pub async fn handle_mark_paid(
    bot: Bot,
    msg: Message,
    purchase_id: i64,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> Result<()> {
    let Some(admin_id) = authorized_admin(&msg, &settings) else {
        bot.send_message(msg.chat.id, "Эта команда доступна только администраторам.").await?;
        return Ok(());
    };

    match services.payment_service.confirm_payment(purchase_id).await {
        Ok(purchase) => {
            info!(admin_id = admin_id, purchase_id = purchase.id, "Payment confirmed manually");
            bot.send_message(
                msg.chat.id,
                format!("Заказ №{} отмечен оплаченным ({}).", purchase.id, purchase.display_price()),
            )
            .await?;
        }
        Err(AstrolineError::PurchaseNotFound { .. }) => {
            bot.send_message(msg.chat.id, format!("Заказ №{purchase_id} не найден.")).await?;
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Return the admin id when the message author is a configured admin
fn authorized_admin(msg: &Message, settings: &Settings) -> Option<i64> {
    let telegram_id = msg.from.as_ref().map(|user| user.id.0 as i64)?;
    if settings.bot.admin_ids.contains(&telegram_id) {
        Some(telegram_id)
    } else {
        warn!(telegram_id = telegram_id, "Unauthorized admin command attempt");
        None
    }
}
