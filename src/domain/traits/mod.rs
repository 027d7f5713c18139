//! Domain traits - Abstractions for chat platform implementations

pub mod bot;

pub use bot::{Bot, BotInfo, InteractionResponder, TypingGuard};
