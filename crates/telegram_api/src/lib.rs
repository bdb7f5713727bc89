//! # Telegram API
//!
//! Minimal client for the Telegram Bot API: sending messages,
//! registering bot commands, and long-polling for inbound updates.
//! Only the handful of methods the bot needs are covered.

/// Bot API client.
mod client;
pub use client::*;

/// Wire types for the Bot API.
mod types;
pub use types::*;
