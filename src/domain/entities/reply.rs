//! Outgoing replies and length limits

/// Appended when a reply is cut to fit the platform's message ceiling
pub const TRUNCATION_SUFFIX: &str = "... (Answer too long)";

/// Rich reply body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub author: String,
    pub icon_url: Option<String>,
    pub description: String,
    pub colour: u32,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// The main text of the reply
    pub fn body(&self) -> &str {
        match self {
            Reply::Text(text) => text,
            Reply::Embed(embed) => &embed.description,
        }
    }
}

/// Cut `text` to `max_chars` characters and mark it, leaving shorter text untouched.
pub fn truncate_reply(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &text[..idx], TRUNCATION_SUFFIX),
        None => text.to_string(),
    }
}
