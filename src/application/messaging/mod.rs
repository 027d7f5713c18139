//! Message handling - Event-driven message processing

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{BotEvent, BotEventHandler, EventDispatcher, EventKind};
pub use parser::{strip_mention, MessageParser, ParsedCommand};
