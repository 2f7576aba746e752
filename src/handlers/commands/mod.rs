//! Command handlers module

pub mod admin;
pub mod help;
pub mod start;

use std::sync::Arc;
use teloxide::{Bot, types::Message};
use teloxide::utils::command::BotCommands;

use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "AstroLine Bot Commands")]
pub enum Command {
    #[command(description = "Start the bot and show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Show bot statistics (admin only)")]
    Stats,
    #[command(description = "Mark an order as paid (admin only)")]
    Paid(i64),
}

/// Dispatch a parsed command to its handler
pub async fn dispatch_command(
    bot: Bot,
    msg: Message,
    command: Command,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
) -> Result<()> {
    match command {
        Command::Start => start::handle_start(bot, msg, services).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Stats => admin::handle_stats(bot, msg, services, settings).await,
        Command::Paid(purchase_id) => {
            admin::handle_mark_paid(bot, msg, purchase_id, services, settings).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "astroline_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/paid 17", "astroline_bot").unwrap(), Command::Paid(17));
        assert!(Command::parse("hello", "astroline_bot").is_err());
        assert!(Command::parse("/paid seventeen", "astroline_bot").is_err());
    }
}
