//! Wiring shared by the Discord and console front-ends

use std::sync::Arc;
use crate::application::errors::BotError;
use crate::application::messaging::{EventDispatcher, EventKind};
use crate::application::prompts::Persona;
use crate::application::services::{AskService, CommandService, GenerationService, MessageService};
use crate::application::services::ask_service::ASK_COMMAND;
use crate::domain::entities::SlashCommandSpec;
use crate::infrastructure::adapters::discord::{self, DiscordHandler};
use crate::infrastructure::config::{Config, Startup};
use crate::infrastructure::http::run_liveness_server;
use crate::infrastructure::llm::{GeminiProvider, LLMConfig};

/// Build the generation service, disabled when no API key is configured
pub fn build_generation(config: &LLMConfig) -> GenerationService {
    match GeminiProvider::from_config(config) {
        Ok(provider) => {
            tracing::info!("Using Gemini {} for AI responses", provider.model());
            GenerationService::new(Arc::new(provider))
        }
        Err(_) => {
            tracing::warn!("⚠️ GEMINI_API_KEY not set, AI features disabled");
            GenerationService::unconfigured()
        }
    }
}

/// Registration table: mention handler for messages, `/ask` for its slash command
pub fn build_dispatcher(config: &Config, generation: GenerationService) -> EventDispatcher {
    let mut commands = CommandService::new(&config.bot.prefix);
    commands.register_defaults();

    let mention = MessageService::new(
        generation.clone(),
        Persona::mention(config.personas.mention.clone()),
        config.personas.mention_filler.clone(),
        config.bot.max_reply_chars,
    );
    let ask = AskService::new(
        generation,
        Persona::ask(config.personas.ask.clone()),
        config.bot.max_reply_chars,
    );

    EventDispatcher::new(commands)
        .register(EventKind::Message, Arc::new(mention))
        .register(EventKind::SlashCommand(ASK_COMMAND.to_string()), Arc::new(ask))
}

/// Slash commands to sync with the platform
pub fn slash_commands() -> Vec<SlashCommandSpec> {
    vec![AskService::spec()]
}

/// Start the liveness server and the Discord client.
/// Fails before anything is started when no bot token is configured.
pub async fn run_bot(config: Config, token_override: Option<String>) -> Result<(), BotError> {
    // Nothing, not even the liveness server, starts without a token
    let token = Startup::from_config(&config, token_override).token()?;

    tracing::info!("Starting {}", config.bot.name);

    let addr = config.http.socket_addr()?;
    tokio::spawn(run_liveness_server(addr));

    let generation = build_generation(&config.llm);
    let dispatcher = Arc::new(build_dispatcher(&config, generation));
    let handler = DiscordHandler::new(dispatcher, slash_commands());

    discord::run(&token, &config.discord, handler).await
}
