//! Domain layer - Core bot concepts with no platform dependencies
//! 
//! This layer contains:
//! - Entities: Core objects (User, IncomingMessage, Reply, Command)
//! - Traits: Abstractions over the chat platform (Bot, InteractionResponder)

pub mod entities;
pub mod traits;
