use serde::{Deserialize, Serialize};

/// Numeric identifier of a Telegram chat. Doubles as the subscriber
/// identity throughout the bot.
pub type ChatId = i64;

/// Envelope every Bot API method responds with
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub ok: bool,

    /// Method result, present when `ok` is true
    pub result: Option<T>,

    /// Human-readable error, present when `ok` is false
    pub description: Option<String>,
}

/// One inbound update from `getUpdates`
#[derive(Debug, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier
    pub update_id: i64,

    /// The message carried by this update, if it is a message update
    pub message: Option<Message>,
}

/// A Telegram message
#[derive(Debug, Deserialize)]
pub struct Message {
    /// Message identifier, unique within the chat
    pub message_id: i64,

    /// The chat the message was sent in
    pub chat: Chat,

    /// Text of the message, absent for stickers, photos and the like
    pub text: Option<String>,
}

/// A Telegram chat
#[derive(Debug, Deserialize)]
pub struct Chat {
    /// Chat identifier
    pub id: ChatId,
}

/// A bot command description, for `setMyCommands`
#[derive(Debug, Serialize)]
pub struct BotCommand {
    /// The command itself, e.g. `/latest`
    pub command: String,

    /// Short description shown in the client's command menu
    pub description: String,
}

/// Request body for `sendMessage`
#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: ChatId,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'a str>,
}

/// Request body for `getUpdates`
#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
}

/// Request body for `setMyCommands`
#[derive(Debug, Serialize)]
pub(crate) struct SetMyCommandsRequest<'a> {
    pub commands: &'a [BotCommand],
}
