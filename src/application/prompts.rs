//! Persona prompts

/// Flirty persona used by `/ask`
pub const ASK_PERSONA: &str = "You are a very flirty, romantic, and playful girlfriend/boyfriend AI. \
You love the user and always try to impress them with cheesy pickup lines and romantic Hinglish compliments. \
Be dramatic and funny.";

/// Savage persona used when the bot is mentioned
pub const MENTION_PERSONA: &str = "You are a savage and funny AI friend who roasts people in Hinglish. \
Reply with witty, sarcastic humour but never be hateful. Keep it short.";

/// Sent to the model when a mention carries no text
pub const MENTION_FILLER: &str = "Hello!";

/// Fixed instructions plus the label the user text is introduced with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub instructions: String,
    pub input_label: &'static str,
}

impl Persona {
    pub fn new(instructions: impl Into<String>, input_label: &'static str) -> Self {
        Self {
            instructions: instructions.into(),
            input_label,
        }
    }

    pub fn ask(instructions: impl Into<String>) -> Self {
        Self::new(instructions, "Question")
    }

    pub fn mention(instructions: impl Into<String>) -> Self {
        Self::new(instructions, "Message")
    }

    pub fn build_prompt(&self, user_text: &str) -> String {
        format!("{} {}: {}", self.instructions, self.input_label, user_text)
    }
}
