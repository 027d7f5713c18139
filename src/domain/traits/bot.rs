use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::entities::Reply;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a plain text message to a channel
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Show the "composing" indicator in a channel until the guard is dropped
    fn start_typing(&self, channel_id: &str) -> Result<TypingGuard, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Responds to a single slash-command interaction
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Acknowledge the interaction without content
    async fn defer(&self) -> Result<(), BotError>;

    /// Send the final response after a deferral
    async fn followup(&self, reply: Reply) -> Result<(), BotError>;
}

/// Keeps a typing indicator alive while held
pub struct TypingGuard {
    _inner: Option<Box<dyn Send>>,
}

impl TypingGuard {
    pub fn new(inner: impl Send + 'static) -> Self {
        Self {
            _inner: Some(Box::new(inner)),
        }
    }

    /// Guard for platforms without a typing indicator
    pub fn none() -> Self {
        Self { _inner: None }
    }
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
}
