//! LLM integration - Generative text provider

pub mod traits;
pub mod config;
pub mod providers;


pub use traits::{LLM, LLMResponse, GenerationError, LLMResult, LLMUsage};
pub use config::LLMConfig;
pub use providers::GeminiProvider;
