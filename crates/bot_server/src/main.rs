//! Telegram bot that watches the citizen-service booking page and
//! notifies subscribers when the earliest available appointment slot
//! changes.

use std::sync::Arc;
use std::time::Duration;

use booking_scan::{BookingPageClient, PollResult, poll};
use telegram_api::BotClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod notify;
mod store;

use config::Config;
use store::Store;

/// Fixed delay between poll cycles.
const POLL_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

/// Wire everything up and run the poll loop until the process dies.
///
/// A failed poll cycle propagates out of here: the process exits and
/// the supervisor restarts it.
async fn run(config: Config) -> anyhow::Result<()> {
    let bot = Arc::new(BotClient::new(&config.telegram_token)?);
    commands::register_commands(bot.as_ref()).await?;

    let store = Store::default();
    tokio::spawn(commands::run_listener(bot.clone(), store.clone()));

    let page = BookingPageClient::new(config.booking_url, config.booking_cookie)?;

    info!("Borgerservice Telegram bot is running");

    loop {
        let known = store.earliest_date().await;
        let result = poll(&page, known).await?;

        if result != PollResult::Unchanged {
            store.set_earliest_date(result.observed_earliest()).await;
            notify::notify_subscribers(bot.as_ref(), &store, &result).await;
            info!("Poll result: {result:?}");
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
