//! Event dispatcher - Routes platform events to registered handlers

use std::sync::Arc;
use async_trait::async_trait;
use crate::application::errors::{BotError, CommandError};
use crate::application::services::CommandService;
use crate::domain::entities::{IncomingMessage, SlashInvocation};
use crate::domain::traits::{Bot, InteractionResponder};

/// Platform-neutral event
#[derive(Clone)]
pub enum BotEvent {
    Message(IncomingMessage),
    SlashCommand {
        invocation: SlashInvocation,
        responder: Arc<dyn InteractionResponder>,
    },
}

impl BotEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BotEvent::Message(_) => EventKind::Message,
            BotEvent::SlashCommand { invocation, .. } => EventKind::SlashCommand(invocation.name.clone()),
        }
    }
}

/// Key of the registration table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Message,
    SlashCommand(String),
}

/// Handler bound to an event kind
#[async_trait]
pub trait BotEventHandler: Send + Sync {
    fn name(&self) -> &str;

    /// Returns whether a reply was attempted for the event
    async fn handle(&self, event: &BotEvent, bot: &dyn Bot) -> Result<bool, BotError>;
}

struct Registration {
    kind: EventKind,
    handler: Arc<dyn BotEventHandler>,
}

/// Runs matching handlers in registration order, then prefix commands for messages.
/// An event gets at most one reply attempt.
pub struct EventDispatcher {
    registrations: Vec<Registration>,
    commands: CommandService,
}

impl EventDispatcher {
    pub fn new(commands: CommandService) -> Self {
        Self {
            registrations: Vec::new(),
            commands,
        }
    }

    /// Bind a handler to an event kind
    pub fn register(mut self, kind: EventKind, handler: Arc<dyn BotEventHandler>) -> Self {
        tracing::debug!("Registered {} for {:?}", handler.name(), kind);
        self.registrations.push(Registration { kind, handler });
        self
    }

    /// Names of the slash commands that have a handler
    pub fn slash_commands(&self) -> Vec<&str> {
        self.registrations
            .iter()
            .filter_map(|r| match &r.kind {
                EventKind::SlashCommand(name) => Some(name.as_str()),
                EventKind::Message => None,
            })
            .collect()
    }

    pub async fn dispatch(&self, event: BotEvent, bot: &dyn Bot) {
        let kind = event.kind();
        let mut handled = false;
        let mut replied = false;

        for registration in self.registrations.iter().filter(|r| r.kind == kind) {
            handled = true;
            if replied {
                tracing::debug!("Event already answered, skipping {}", registration.handler.name());
                continue;
            }
            match registration.handler.handle(&event, bot).await {
                Ok(sent) => replied = sent,
                Err(e) => {
                    // A failed send may still have reached the channel
                    replied = true;
                    tracing::error!("Handler {} failed: {}", registration.handler.name(), e);
                }
            }
        }

        match &event {
            // Prefix commands must keep working after custom message handling
            BotEvent::Message(message) => self.dispatch_commands(message, bot, replied).await,
            BotEvent::SlashCommand { invocation, .. } if !handled => {
                tracing::warn!("No handler for /{}", invocation.name);
            }
            BotEvent::SlashCommand { .. } => {}
        }
    }

    async fn dispatch_commands(&self, message: &IncomingMessage, bot: &dyn Bot, replied: bool) {
        if message.author.is_bot {
            return;
        }

        match self.commands.handle(message) {
            Ok(Some(_)) if replied => {
                tracing::debug!("Message {} already answered, dropping command reply", message.id);
            }
            Ok(Some(response)) => {
                if let Err(e) = bot.send_message(&message.channel_id, &response).await {
                    tracing::error!("Failed to send command response: {}", e);
                }
            }
            Ok(None) => {}
            Err(CommandError::NotFound(name)) => {
                tracing::debug!("Ignoring unknown command {}{}", self.commands.prefix(), name);
            }
            Err(e) => {
                tracing::warn!("Command failed: {}", e);
            }
        }
    }
}
