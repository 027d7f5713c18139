//! Replies to messages that mention the bot

use async_trait::async_trait;
use chrono::Utc;
use crate::application::errors::BotError;
use crate::application::messaging::{strip_mention, BotEvent, BotEventHandler};
use crate::application::prompts::Persona;
use crate::domain::entities::{truncate_reply, IncomingMessage};
use crate::domain::traits::{Bot, TypingGuard};
use super::generation_service::{GenerationService, NOT_CONFIGURED_MESSAGE};

/// Prefix of mention failure replies
pub const MENTION_ERROR_PREFIX: &str = "❌ Dimag kharab ho gaya mera (Error):";

/// Answers direct mentions with the savage persona
pub struct MessageService {
    generation: GenerationService,
    persona: Persona,
    filler: String,
    max_reply_chars: usize,
}

impl MessageService {
    pub fn new(generation: GenerationService, persona: Persona, filler: impl Into<String>, max_reply_chars: usize) -> Self {
        Self {
            generation,
            persona,
            filler: filler.into(),
            max_reply_chars,
        }
    }

    /// Text the model should answer, or `None` when the message is not for us
    pub fn extract_prompt_text(&self, message: &IncomingMessage, bot_id: &str) -> Option<String> {
        // Never answer ourselves
        if message.author.id == bot_id {
            return None;
        }
        if !message.mentions_user(bot_id) {
            return None;
        }

        let text = strip_mention(&message.content, bot_id);
        if text.is_empty() {
            Some(self.filler.clone())
        } else {
            Some(text)
        }
    }

    /// Process an incoming message, sending at most one reply.
    /// Returns `false` when the message was not meant for the bot.
    pub async fn process(&self, message: &IncomingMessage, bot: &dyn Bot) -> Result<bool, BotError> {
        let info = bot.bot_info();
        let Some(text) = self.extract_prompt_text(message, &info.id) else {
            return Ok(false);
        };

        tracing::info!("Mentioned by {} in {}", message.author, message.channel_id);

        let reply = {
            let _typing = bot.start_typing(&message.channel_id).unwrap_or_else(|e| {
                tracing::warn!("Typing indicator failed: {}", e);
                TypingGuard::none()
            });

            match self.respond(&text).await {
                Ok(reply) => reply,
                Err(BotError::NotConfigured) => NOT_CONFIGURED_MESSAGE.to_string(),
                Err(e) => {
                    tracing::warn!("Mention reply for {} failed: {}", message.author, e);
                    format!("{} {}", MENTION_ERROR_PREFIX, e)
                }
            }
        };

        bot.send_message(&message.channel_id, &reply).await?;

        let elapsed = Utc::now() - message.received_at;
        tracing::debug!("Replied in {}ms", elapsed.num_milliseconds());
        Ok(true)
    }

    async fn respond(&self, text: &str) -> Result<String, BotError> {
        let prompt = self.persona.build_prompt(text);
        let generated = self.generation.generate(&prompt).await?;
        Ok(truncate_reply(&generated, self.max_reply_chars))
    }
}

#[async_trait]
impl BotEventHandler for MessageService {
    fn name(&self) -> &str {
        "mention"
    }

    async fn handle(&self, event: &BotEvent, bot: &dyn Bot) -> Result<bool, BotError> {
        let BotEvent::Message(message) = event else {
            return Ok(false);
        };
        self.process(message, bot).await
    }
}
