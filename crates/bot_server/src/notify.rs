//! Turns poll results into human-readable messages and fans them out
//! to every subscriber.

use booking_scan::PollResult;
use chrono::NaiveDate;
use futures_util::future::join_all;
use telegram_api::{BotClient, ChatId, TelegramError};
use tracing::error;

use crate::store::Store;

/// Outbound chat sink. The Telegram client implements it; tests swap
/// in a mock.
#[async_trait::async_trait]
pub trait ChatSink: Send + Sync {
    /// Send a plain-text message to a chat.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError>;

    /// Send a Markdown-formatted message to a chat.
    async fn send_markdown(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError>;
}

#[async_trait::async_trait]
impl ChatSink for BotClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        self.send_message(chat_id, text).await.map(|_| ())
    }

    async fn send_markdown(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        self.send_markdown_message(chat_id, text).await.map(|_| ())
    }
}

/// A rendered broadcast message
#[derive(Debug, PartialEq, Eq)]
pub struct Notification {
    /// Message body
    pub text: String,
    /// Whether the body uses Markdown emphasis
    pub markdown: bool,
}

/// Render a date the way the bot displays it, e.g.
/// "Saturday, April 20, 2024".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Render a poll result as a broadcast message. `Unchanged` renders to
/// nothing.
pub fn render(result: &PollResult) -> Option<Notification> {
    match *result {
        PollResult::Unchanged => None,
        PollResult::NewEarliest { date } => Some(Notification {
            text: format!(
                "🚨🚨🚨 *NEW DATE ALERT* 🚨🚨🚨\n\nFound free time slot on {}.",
                display_date(date)
            ),
            markdown: true,
        }),
        PollResult::Booked { old_date, new_date } => {
            let mut text = format!(
                "The last timeslot on {} has now been booked.",
                display_date(old_date)
            );
            if let Some(next) = new_date {
                text.push_str(&format!(" Next best date: {}", display_date(next)));
            }
            Some(Notification {
                text,
                markdown: false,
            })
        }
    }
}

/// Broadcast a poll result to every current subscriber.
///
/// Sends run concurrently; a failed send is logged and does not stop
/// delivery to the remaining subscribers.
pub async fn notify_subscribers(sink: &dyn ChatSink, store: &Store, result: &PollResult) {
    let Some(notification) = render(result) else {
        return;
    };

    let subscribers = store.subscribers().await;
    let text = notification.text.as_str();
    let markdown = notification.markdown;

    let sends = subscribers.iter().map(|&chat_id| async move {
        let outcome = if markdown {
            sink.send_markdown(chat_id, text).await
        } else {
            sink.send_text(chat_id, text).await
        };
        (chat_id, outcome)
    });

    for (chat_id, outcome) in join_all(sends).await {
        if let Err(e) = outcome {
            error!("Failed to notify subscriber {chat_id}: {e}");
        }
    }
}
