use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::*;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Error type for Bot API calls
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// Network or HTTP-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `ok: false`
    #[error("Telegram API error: {0}")]
    Api(String),
}

/// Client for the Telegram Bot API
pub struct BotClient {
    client: Client,
    base_url: String,
}

impl BotClient {
    /// Create a new Bot API client for the given bot token.
    pub fn new(token: &str) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{TELEGRAM_API_BASE}/bot{token}"),
        })
    }

    /// Send a plain-text message to a chat.
    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &SendMessageRequest {
                chat_id,
                text,
                parse_mode: None,
            },
            None,
        )
        .await
    }

    /// Send a Markdown-formatted message to a chat.
    pub async fn send_markdown_message(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &SendMessageRequest {
                chat_id,
                text,
                parse_mode: Some("Markdown"),
            },
            None,
        )
        .await
    }

    /// Register the bot's command list, shown in the client's menu.
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError> {
        let _: bool = self
            .call("setMyCommands", &SetMyCommandsRequest { commands }, None)
            .await?;
        Ok(())
    }

    /// Long-poll for inbound updates.
    ///
    /// `offset` should be one past the last update id already handled.
    /// The request timeout is stretched beyond `timeout_secs` so the
    /// server-side long poll can complete.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &GetUpdatesRequest {
                offset,
                timeout: timeout_secs,
            },
            Some(Duration::from_secs(timeout_secs + 10)),
        )
        .await
    }

    async fn call<T, B>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        debug!("Calling Telegram method {method}");

        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response: ApiResponse<T> = request.send().await?.json().await?;

        if response.ok {
            response
                .result
                .ok_or_else(|| TelegramError::Api(format!("{method}: missing result")))
        } else {
            Err(TelegramError::Api(
                response
                    .description
                    .unwrap_or_else(|| format!("{method}: unknown error")),
            ))
        }
    }
}
