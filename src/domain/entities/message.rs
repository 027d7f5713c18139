use super::User;
use chrono::{DateTime, Utc};

/// A message observed in a channel
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: String,
    pub channel_id: String,
    pub author: User,
    pub content: String,
    /// Ids of users mentioned directly in the message
    pub mentions: Vec<String>,
    /// `@everyone` / `@here`
    pub mentions_everyone: bool,
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(id: impl Into<String>, channel_id: impl Into<String>, author: User, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            author,
            content: content.into(),
            mentions: Vec::new(),
            mentions_everyone: false,
            received_at: Utc::now(),
        }
    }

    pub fn with_mention(mut self, user_id: impl Into<String>) -> Self {
        self.mentions.push(user_id.into());
        self
    }

    pub fn with_mentions_everyone(mut self, everyone: bool) -> Self {
        self.mentions_everyone = everyone;
        self
    }

    /// Whether the message mentions `user_id` directly, broadcasts excluded
    pub fn mentions_user(&self, user_id: &str) -> bool {
        !self.mentions_everyone && self.mentions.iter().any(|id| id == user_id)
    }
}
