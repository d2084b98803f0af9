//! PixelPals Leaderboard Bot - Main entry point.

use anyhow::Context;
use leaderboard_bot::commands::{CommandHandler, CommandRegistry, LeaderboardHandler, StartHandler};
use leaderboard_bot::error::AppResult;
use leaderboard_bot::{keep_alive, telegram, Config, InstanceLock};
use pixelpals_client::LeaderboardClient;
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::Bot;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    info!("Starting PixelPals leaderboard bot...");

    // Dropping the guard removes the lock file.
    let instance = match InstanceLock::acquire(&config.lock.path) {
        Ok(lock) => lock,
        Err(e) => {
            error!("Not starting: {}", e);
            return Err(e.into());
        }
    };
    info!("Instance lock held at {}", instance.path().display());

    if config.keep_alive.enabled {
        match config.keep_alive_addr().parse::<SocketAddr>() {
            Ok(addr) => {
                keep_alive::spawn(addr);
            }
            Err(e) => warn!(
                "Invalid keep-alive address {}: {}",
                config.keep_alive_addr(),
                e
            ),
        }
    }

    // Initialize clients
    let leaderboard = Arc::new(LeaderboardClient::new(
        &config.leaderboard.base_url,
        config.leaderboard.timeout,
    )?);

    // Create command handlers
    let handlers: Vec<Box<dyn CommandHandler>> = vec![
        Box::new(StartHandler::new()),
        Box::new(LeaderboardHandler::new(
            leaderboard.clone(),
            config.leaderboard.reference_date.clone(),
        )),
    ];
    let registry = Arc::new(CommandRegistry::new(handlers));

    info!("Registered {} command handlers", registry.len());
    info!("Leaderboard endpoint: {}", leaderboard.base_url());
    info!("Reference date: {}", config.leaderboard.reference_date);

    let bot = Bot::new(config.telegram_bot_token.expose_secret());
    telegram::run(bot, registry).await;

    info!("Shutting down...");
    drop(instance);
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
