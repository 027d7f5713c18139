//! Discord adapter

use std::sync::Arc;
use async_trait::async_trait;
use serenity::all::{
    ChannelId, Client, Command as DiscordCommand, CommandInteraction, CommandOptionType, Context,
    CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateInteractionResponseFollowup, EventHandler, GatewayIntents, Http, Interaction, Message, Ready,
};

use crate::application::errors::BotError;
use crate::application::messaging::{BotEvent, EventDispatcher};
use crate::domain::entities::{Embed, IncomingMessage, Reply, SlashCommandSpec, SlashInvocation, User};
use crate::domain::traits::{Bot, BotInfo, InteractionResponder, TypingGuard};
use crate::infrastructure::config::DiscordConfig;

fn discord_error(e: serenity::Error) -> BotError {
    BotError::Discord(e.to_string())
}

fn parse_channel_id(id: &str) -> Result<ChannelId, BotError> {
    id.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(ChannelId::new)
        .ok_or_else(|| BotError::Parse(format!("Invalid channel id: {}", id)))
}

/// Channel operations over the Discord REST API
pub struct DiscordBot {
    http: Arc<Http>,
    info: BotInfo,
}

impl DiscordBot {
    pub fn from_context(ctx: &Context) -> Self {
        let info = BotInfo {
            id: ctx.cache.current_user().id.to_string(),
        };

        Self {
            http: ctx.http.clone(),
            info,
        }
    }
}

#[async_trait]
impl Bot for DiscordBot {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", channel_id, text);

        let message = parse_channel_id(channel_id)?
            .say(&self.http, text)
            .await
            .map_err(discord_error)?;

        Ok(message.id.to_string())
    }

    fn start_typing(&self, channel_id: &str) -> Result<TypingGuard, BotError> {
        // Serenity re-sends the indicator until the handle is dropped
        let typing = parse_channel_id(channel_id)?.start_typing(&self.http);
        Ok(TypingGuard::new(typing))
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Responder bound to one command interaction
pub struct DiscordInteraction {
    http: Arc<Http>,
    command: CommandInteraction,
}

#[async_trait]
impl InteractionResponder for DiscordInteraction {
    async fn defer(&self) -> Result<(), BotError> {
        self.command.defer(&self.http).await.map_err(discord_error)
    }

    async fn followup(&self, reply: Reply) -> Result<(), BotError> {
        let builder = match reply {
            Reply::Text(text) => CreateInteractionResponseFollowup::new().content(text),
            Reply::Embed(embed) => CreateInteractionResponseFollowup::new().embed(create_embed(embed)),
        };

        self.command
            .create_followup(&self.http, builder)
            .await
            .map(|_| ())
            .map_err(discord_error)
    }
}

fn create_embed(embed: Embed) -> CreateEmbed {
    let mut author = CreateEmbedAuthor::new(embed.author);
    if let Some(url) = embed.icon_url {
        author = author.icon_url(url);
    }

    let mut out = CreateEmbed::new()
        .description(embed.description)
        .colour(embed.colour)
        .author(author);
    if let Some(footer) = embed.footer {
        out = out.footer(CreateEmbedFooter::new(footer));
    }
    out
}

fn create_command(spec: &SlashCommandSpec) -> CreateCommand {
    spec.options.iter().fold(
        CreateCommand::new(spec.name.clone()).description(spec.description.clone()),
        |cmd, opt| {
            cmd.add_option(
                CreateCommandOption::new(CommandOptionType::String, opt.name.clone(), opt.description.clone())
                    .required(opt.required),
            )
        },
    )
}

fn to_user(user: &serenity::all::User) -> User {
    let converted = User::new(user.id.to_string(), user.name.clone());
    if user.bot {
        converted.as_bot()
    } else {
        converted
    }
}

fn incoming_message(msg: &Message) -> IncomingMessage {
    msg.mentions.iter().fold(
        IncomingMessage::new(msg.id.to_string(), msg.channel_id.to_string(), to_user(&msg.author), msg.content.clone())
            .with_mentions_everyone(msg.mention_everyone),
        |incoming, user| incoming.with_mention(user.id.to_string()),
    )
}

fn slash_invocation(command: &CommandInteraction) -> SlashInvocation {
    command.data.options.iter().fold(
        SlashInvocation::new(command.data.name.clone(), to_user(&command.user), command.channel_id.to_string()),
        |invocation, option| match option.value.as_str() {
            Some(value) => invocation.with_option(option.name.clone(), value),
            None => invocation,
        },
    )
}

/// Gateway event handler feeding the dispatcher
pub struct DiscordHandler {
    dispatcher: Arc<EventDispatcher>,
    slash_commands: Vec<SlashCommandSpec>,
}

impl DiscordHandler {
    pub fn new(dispatcher: Arc<EventDispatcher>, slash_commands: Vec<SlashCommandSpec>) -> Self {
        Self {
            dispatcher,
            slash_commands,
        }
    }

    /// Replace the global command set, returning how many the platform accepted
    async fn sync_commands(&self, http: &Http) -> Result<usize, BotError> {
        let commands = self.slash_commands.iter().map(create_command).collect();

        DiscordCommand::set_global_commands(http, commands)
            .await
            .map(|synced| synced.len())
            .map_err(|e| BotError::CommandSync(e.to_string()))
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("✅ Logged in as {} (ID: {})", ready.user.name, ready.user.id);

        match self.sync_commands(&ctx.http).await {
            Ok(count) => tracing::info!("🔄 Synced {} commands globally.", count),
            Err(e) => tracing::error!("❌ Sync Error: {}", e),
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let bot = DiscordBot::from_context(&ctx);
        self.dispatcher
            .dispatch(BotEvent::Message(incoming_message(&msg)), &bot)
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let invocation = slash_invocation(&command);
        tracing::info!("/{} from {}", invocation.name, invocation.user);

        let responder = Arc::new(DiscordInteraction {
            http: ctx.http.clone(),
            command,
        });
        let bot = DiscordBot::from_context(&ctx);
        self.dispatcher
            .dispatch(BotEvent::SlashCommand { invocation, responder }, &bot)
            .await;
    }
}

/// Gateway intents for slash commands and mentions
pub fn intents(config: &DiscordConfig) -> GatewayIntents {
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES;
    if config.message_content_intent {
        intents | GatewayIntents::MESSAGE_CONTENT
    } else {
        intents
    }
}

/// Connect and run until the gateway shuts down; errors here are fatal
pub async fn run(token: &str, config: &DiscordConfig, handler: DiscordHandler) -> Result<(), BotError> {
    let mut client = Client::builder(token, intents(config))
        .event_handler(handler)
        .await
        .map_err(discord_error)?;

    tracing::info!("Connecting to Discord gateway...");
    client.start().await.map_err(discord_error)
}
