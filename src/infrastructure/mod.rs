//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - LLM: Gemini text generation
//! - HTTP: Liveness endpoint
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod llm;
pub mod http;
pub mod adapters;
