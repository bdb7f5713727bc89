//! Shared bot state: the subscriber set and the last known earliest
//! date. Both the poll loop and the command handler touch it, so it
//! lives behind an `RwLock`.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use telegram_api::ChatId;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    subscribers: HashSet<ChatId>,
    earliest_date: Option<NaiveDate>,
}

/// Handle to the shared bot state. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

impl Store {
    /// Add a subscriber. Returns `true` if the chat was already
    /// subscribed.
    pub async fn subscribe(&self, chat_id: ChatId) -> bool {
        !self.inner.write().await.subscribers.insert(chat_id)
    }

    /// Remove a subscriber. Returns `true` if the chat was subscribed.
    pub async fn unsubscribe(&self, chat_id: ChatId) -> bool {
        self.inner.write().await.subscribers.remove(&chat_id)
    }

    /// Whether the chat is currently subscribed.
    pub async fn is_subscribed(&self, chat_id: ChatId) -> bool {
        self.inner.read().await.subscribers.contains(&chat_id)
    }

    /// Snapshot of all current subscribers. Safe to iterate while the
    /// store is mutated concurrently.
    pub async fn subscribers(&self) -> Vec<ChatId> {
        self.inner.read().await.subscribers.iter().copied().collect()
    }

    /// The last observed earliest date, if any.
    pub async fn earliest_date(&self) -> Option<NaiveDate> {
        self.inner.read().await.earliest_date
    }

    /// Record the earliest date observed by the latest poll cycle.
    pub async fn set_earliest_date(&self, date: Option<NaiveDate>) {
        self.inner.write().await.earliest_date = date;
    }
}
