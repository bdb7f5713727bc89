//! Inbound command handling: `/latest`, `/subscribe`, `/unsubscribe`
//! and the getUpdates listener loop that feeds them.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use telegram_api::{BotClient, BotCommand, ChatId, TelegramError};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::notify::{ChatSink, display_date};
use crate::store::Store;

/// Server-side long-poll timeout for getUpdates.
const UPDATE_POLL_TIMEOUT_SECS: u64 = 50;

/// Delay before retrying after a failed getUpdates call.
const UPDATE_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Register the bot's command menu with Telegram.
pub async fn register_commands(bot: &BotClient) -> Result<(), TelegramError> {
    bot.set_my_commands(&[
        BotCommand {
            command: "/latest".to_string(),
            description: "see the earliest available time slot".to_string(),
        },
        BotCommand {
            command: "/subscribe".to_string(),
            description: "receive a notification when a new time slot becomes available"
                .to_string(),
        },
        BotCommand {
            command: "/unsubscribe".to_string(),
            description: "stop receiving time slot notifications".to_string(),
        },
    ])
    .await
}

/// Listen for inbound messages and react to each one.
///
/// Runs until process termination. Transient getUpdates failures are
/// retried after a short delay; reactions to individual messages run
/// in their own tasks and may overlap.
pub async fn run_listener(bot: Arc<BotClient>, store: Store) {
    let mut offset: Option<i64> = None;

    loop {
        let updates = match bot.get_updates(offset, UPDATE_POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("Failed to fetch updates: {e}");
                sleep(UPDATE_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let chat_id = message.chat.id;
            let text = message.text.unwrap_or_else(|| "n/a".to_string());

            let bot = bot.clone();
            let store = store.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_message(bot.as_ref(), &store, chat_id, &text).await {
                    error!("Failed to reply to {chat_id}: {e}");
                }
            });
        }
    }
}

/// React to one inbound message. Commands are matched verbatim; every
/// reply goes only to the originating chat.
pub async fn handle_message(
    sink: &dyn ChatSink,
    store: &Store,
    chat_id: ChatId,
    text: &str,
) -> Result<(), TelegramError> {
    info!("Message from {chat_id}: {text}");

    match text {
        "/latest" => send_earliest_date(sink, chat_id, store.earliest_date().await).await,
        "/start" | "/subscribe" => {
            if store.subscribe(chat_id).await {
                sink.send_text(chat_id, "You are already subscribed.").await
            } else {
                info!("New subscriber: {chat_id}");
                sink.send_text(chat_id, "You are now subscribed to the notifications.")
                    .await?;
                send_earliest_date(sink, chat_id, store.earliest_date().await).await
            }
        }
        "/unsubscribe" => {
            if store.unsubscribe(chat_id).await {
                info!("{chat_id} just unsubscribed");
                sink.send_text(chat_id, "You are now unsubscribed.").await
            } else {
                sink.send_text(chat_id, "You are not subscribed.").await
            }
        }
        _ => {
            sink.send_text(chat_id, "I do not understand the command")
                .await
        }
    }
}

/// Reply with the currently known earliest date.
pub async fn send_earliest_date(
    sink: &dyn ChatSink,
    chat_id: ChatId,
    earliest_date: Option<NaiveDate>,
) -> Result<(), TelegramError> {
    let reply = match earliest_date {
        Some(date) => format!(
            "The earliest available time slot is on {}.",
            display_date(date)
        ),
        None => "There are no available time slot at the moment.".to_string(),
    };
    sink.send_text(chat_id, &reply).await
}
