//! Application layer - Use cases and bot behaviour
//! 
//! This layer contains:
//! - Services: generation, `/ask`, mention replies, prefix commands
//! - Prompts: persona prompt construction
//! - Errors: Domain-specific errors
//! - Messaging: Mention parsing and event dispatching

pub mod errors;
pub mod prompts;
pub mod services;
pub mod messaging;
