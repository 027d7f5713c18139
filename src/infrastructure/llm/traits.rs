//! LLM traits - Generative text interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// LLM response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Response content
    pub content: String,
    /// Model used
    pub model: String,
    /// Number of tokens used (if available)
    pub usage: Option<LLMUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Generation errors
#[derive(Debug)]
pub enum GenerationError {
    /// API key missing
    MissingApiKey,
    /// API error from provider
    ApiError { status: u16, message: String },
    /// Network error
    NetworkError(String),
    /// Rate limited
    RateLimited,
    /// Parse error
    ParseError(String),
    /// Prompt rejected by the provider's safety filters
    Blocked(String),
    /// No text came back
    EmptyResponse,
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::MissingApiKey => write!(f, "Missing API key"),
            GenerationError::ApiError { status, message } => write!(f, "API error ({}): {}", status, message),
            GenerationError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            GenerationError::RateLimited => write!(f, "Rate limited"),
            GenerationError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            GenerationError::Blocked(reason) => write!(f, "Prompt blocked: {}", reason),
            GenerationError::EmptyResponse => write!(f, "Empty response from model"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, GenerationError>;

/// LLM Provider trait
#[async_trait]
pub trait LLM: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Generate text for a single prompt
    async fn generate(&self, prompt: &str) -> LLMResult<LLMResponse>;
}
