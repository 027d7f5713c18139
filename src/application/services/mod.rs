//! Application services - Bot behaviour orchestration

pub mod ask_service;
pub mod command_service;
pub mod generation_service;
pub mod message_service;

pub use ask_service::AskService;
pub use command_service::CommandService;
pub use generation_service::{GenerationService, NOT_CONFIGURED_MESSAGE};
pub use message_service::MessageService;
