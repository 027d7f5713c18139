use std::sync::Arc;
use crate::application::errors::BotError;
use crate::infrastructure::llm::LLM;

/// Process-wide handle to the generative model, absent when no API key was given
#[derive(Clone, Default)]
pub struct GenerationService {
    llm: Option<Arc<dyn LLM>>,
}

impl GenerationService {
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self { llm: Some(llm) }
    }

    pub fn unconfigured() -> Self {
        Self { llm: None }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Generate a reply for a fully built prompt
    pub async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        let llm = self.llm.as_ref().ok_or(BotError::NotConfigured)?;

        tracing::debug!("Generating with {} ({} chars)", llm.name(), prompt.chars().count());
        let response = llm.generate(prompt).await?;
        if let Some(usage) = &response.usage {
            tracing::debug!("Tokens used: {:?}", usage.total_tokens);
        }

        Ok(response.content)
    }
}

/// Reply sent by every entry point when no API key was configured
pub const NOT_CONFIGURED_MESSAGE: &str = "❌ Admin ne API Key set nahi ki hai.";
