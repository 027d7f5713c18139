//! Domain entities - Core bot objects with no platform dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod slash;
pub mod reply;

pub use user::User;
pub use message::IncomingMessage;
pub use command::{Command, CommandRegistry};
pub use slash::{CommandOption, SlashCommandSpec, SlashInvocation};
pub use reply::{truncate_reply, Embed, Reply, TRUNCATION_SUFFIX};
