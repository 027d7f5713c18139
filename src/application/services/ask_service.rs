//! `/ask` slash command

use async_trait::async_trait;
use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::{BotEvent, BotEventHandler};
use crate::application::prompts::Persona;
use crate::domain::entities::{truncate_reply, Embed, Reply, SlashCommandSpec, SlashInvocation, User};
use crate::domain::traits::{Bot, InteractionResponder};
use super::generation_service::{GenerationService, NOT_CONFIGURED_MESSAGE};

pub const ASK_COMMAND: &str = "ask";
pub const QUESTION_OPTION: &str = "question";

/// Prefix of `/ask` failure replies
pub const ASK_ERROR_PREFIX: &str = "❌ Error:";

const EMBED_AUTHOR: &str = "Gemini AI 🤖";
const EMBED_ICON_URL: &str = "https://www.gstatic.com/lamda/images/gemini_sparkle_v002_d473d88634747ae4.svg";
const EMBED_COLOUR: u32 = 0x3498db;

/// Answers `/ask question:<text>` with the flirty persona
pub struct AskService {
    generation: GenerationService,
    persona: Persona,
    max_reply_chars: usize,
}

impl AskService {
    pub fn new(generation: GenerationService, persona: Persona, max_reply_chars: usize) -> Self {
        Self {
            generation,
            persona,
            max_reply_chars,
        }
    }

    /// Registration payload for the platform
    pub fn spec() -> SlashCommandSpec {
        SlashCommandSpec::new(ASK_COMMAND, "Ask anything to the AI Bot")
            .with_required_option(QUESTION_OPTION, "What do you want to ask?")
    }

    /// Defer, generate, then send exactly one follow-up
    pub async fn ask(&self, invocation: &SlashInvocation, responder: &dyn InteractionResponder) -> Result<(), BotError> {
        responder.defer().await?;

        let reply = match self.answer(invocation).await {
            Ok(text) => Reply::Embed(self.embed(text, &invocation.user)),
            Err(BotError::NotConfigured) => Reply::text(NOT_CONFIGURED_MESSAGE),
            Err(e) => {
                tracing::warn!("/ask from {} failed: {}", invocation.user, e);
                Reply::text(format!("{} {}", ASK_ERROR_PREFIX, e))
            }
        };

        responder.followup(reply).await
    }

    async fn answer(&self, invocation: &SlashInvocation) -> Result<String, BotError> {
        if !self.generation.is_configured() {
            return Err(BotError::NotConfigured);
        }

        let question = invocation
            .option(QUESTION_OPTION)
            .ok_or_else(|| CommandError::InvalidArgs(format!("missing `{}`", QUESTION_OPTION)))?;

        let prompt = self.persona.build_prompt(question);
        let text = self.generation.generate(&prompt).await?;

        Ok(truncate_reply(&text, self.max_reply_chars))
    }

    fn embed(&self, text: String, asker: &User) -> Embed {
        Embed {
            author: EMBED_AUTHOR.to_string(),
            icon_url: Some(EMBED_ICON_URL.to_string()),
            description: text,
            colour: EMBED_COLOUR,
            footer: Some(format!("Asked by {}", asker.display_name())),
        }
    }
}

#[async_trait]
impl BotEventHandler for AskService {
    fn name(&self) -> &str {
        ASK_COMMAND
    }

    async fn handle(&self, event: &BotEvent, _bot: &dyn Bot) -> Result<bool, BotError> {
        let BotEvent::SlashCommand { invocation, responder } = event else {
            return Ok(false);
        };
        self.ask(invocation, responder.as_ref()).await?;
        Ok(true)
    }
}
