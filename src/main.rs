//! AstroLine Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{Me, Update};
use tracing::{error, info};

use astroline::{
    config::Settings,
    database::{connection, DatabaseService},
    handlers,
    middleware::{
        Context, DatabaseMiddleware, Endpoint, MiddlewareStack, PresenceSynchronizer,
        RequestLoggingMiddleware, SubscriptionTracker,
    },
    services::ServiceFactory,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting AstroLine Telegram bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        ..Default::default()
    };
    let db_pool = connection::create_pool(&db_config).await?;
    connection::run_migrations(&db_pool).await?;

    // Initialize services
    let database_service = DatabaseService::new(db_pool.clone());
    let services = Arc::new(ServiceFactory::new(&settings, &database_service));

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let me = Arc::new(bot.get_me().await?);
    info!(username = me.username(), "Bot identity resolved");

    // Assemble the update pipeline. Stage order matches the event flow:
    // log, publish the db handle, track membership transitions, sync
    // presence, then route to handlers.
    let pipeline = Arc::new(
        MiddlewareStack::new()
            .with(RequestLoggingMiddleware::new())
            .with(DatabaseMiddleware::new(db_pool, settings.sync.db_ctx_key.clone()))
            .with(SubscriptionTracker::new(settings.sync.db_ctx_key.clone()))
            .with(PresenceSynchronizer::new(&settings.sync)),
    );

    let settings = Arc::new(settings);

    let handler = dptree::entry().endpoint(dispatch_update);

    info!("AstroLine bot is ready, starting polling...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![pipeline, services, settings, me])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("AstroLine bot has been shut down.");

    Ok(())
}

/// Run one update through the middleware pipeline; the router is mounted
/// as the pipeline's terminal endpoint.
async fn dispatch_update(
    bot: Bot,
    update: Update,
    pipeline: Arc<MiddlewareStack>,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
    me: Arc<Me>,
) -> HandlerResult {
    let mut ctx = Context::new();

    let endpoint: Endpoint = Box::new(move |update, _ctx| {
        let bot = bot.clone();
        let services = services.clone();
        let settings = settings.clone();
        let me = me.clone();
        Box::pin(async move { handlers::route_update(bot, update, &me, services, settings).await })
    });

    if let Err(e) = pipeline.run(&update, &mut ctx, &endpoint).await {
        error!(update_id = update.id.0, error = %e, "Error processing update");
        return Err(e.into());
    }

    Ok(())
}
