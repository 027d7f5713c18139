//! Test doubles for the platform and model traits

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use gemini_discord_bot::application::errors::BotError;
use gemini_discord_bot::application::services::GenerationService;
use gemini_discord_bot::domain::entities::{IncomingMessage, Reply, User};
use gemini_discord_bot::domain::traits::{Bot, BotInfo, InteractionResponder, TypingGuard};
use gemini_discord_bot::infrastructure::llm::{GenerationError, LLMResponse, LLMResult, LLM};

pub const BOT_ID: &str = "42";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Records everything the handlers send
pub struct RecordingBot {
    info: BotInfo,
    fail_sends: bool,
    pub sent: Mutex<Vec<String>>,
    pub send_attempts: AtomicUsize,
    pub typing: AtomicUsize,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            info: BotInfo { id: BOT_ID.to_string() },
            fail_sends: false,
            sent: Mutex::new(Vec::new()),
            send_attempts: AtomicUsize::new(0),
            typing: AtomicUsize::new(0),
        }
    }

    /// Every send is rejected by the platform
    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Self::new()
        }
    }

    pub fn attempts(&self) -> usize {
        self.send_attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn typing_count(&self) -> usize {
        self.typing.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
        self.send_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_sends {
            return Err(BotError::Discord("Missing Permissions".to_string()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(text.to_string());
        Ok(sent.len().to_string())
    }

    fn start_typing(&self, _channel_id: &str) -> Result<TypingGuard, BotError> {
        self.typing.fetch_add(1, Ordering::SeqCst);
        Ok(TypingGuard::none())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Interaction step as seen by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Deferred,
    FollowUp(Reply),
}

#[derive(Default)]
pub struct RecordingInteraction {
    pub steps: Mutex<Vec<Step>>,
}

impl RecordingInteraction {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn steps(&self) -> Vec<Step> {
        self.steps.lock().unwrap().clone()
    }

    /// The single follow-up, asserting it came after a deferral
    pub fn only_reply(&self) -> Reply {
        let steps = self.steps();
        assert_eq!(steps.len(), 2, "expected defer + one follow-up, got {:?}", steps);
        assert_eq!(steps[0], Step::Deferred);
        match &steps[1] {
            Step::FollowUp(reply) => reply.clone(),
            other => panic!("expected follow-up, got {:?}", other),
        }
    }
}

#[async_trait]
impl InteractionResponder for RecordingInteraction {
    async fn defer(&self) -> Result<(), BotError> {
        self.steps.lock().unwrap().push(Step::Deferred);
        Ok(())
    }

    async fn followup(&self, reply: Reply) -> Result<(), BotError> {
        self.steps.lock().unwrap().push(Step::FollowUp(reply));
        Ok(())
    }
}

/// Model returning a fixed answer or failure
pub struct ScriptedLLM {
    answer: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl ScriptedLLM {
    pub fn answering(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LLM for ScriptedLLM {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> LLMResult<LLMResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.answer {
            Ok(text) => Ok(LLMResponse {
                content: text.clone(),
                model: "scripted".to_string(),
                usage: None,
                finish_reason: Some("STOP".to_string()),
            }),
            Err(message) => Err(GenerationError::ApiError {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

pub fn generation(llm: &Arc<ScriptedLLM>) -> GenerationService {
    GenerationService::new(llm.clone())
}

pub fn user() -> User {
    User::new("7", "ana")
}

pub fn mention(text: &str) -> IncomingMessage {
    IncomingMessage::new("100", "200", user(), text).with_mention(BOT_ID)
}
