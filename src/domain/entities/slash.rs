use std::collections::HashMap;
use super::User;

/// Definition of a slash command as registered with the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommandSpec {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

/// A string option of a slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl SlashCommandSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn with_required_option(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.options.push(CommandOption {
            name: name.into(),
            description: description.into(),
            required: true,
        });
        self
    }
}

/// One invocation of a slash command
#[derive(Debug, Clone)]
pub struct SlashInvocation {
    pub name: String,
    pub options: HashMap<String, String>,
    pub user: User,
    pub channel_id: String,
}

impl SlashInvocation {
    pub fn new(name: impl Into<String>, user: User, channel_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: HashMap::new(),
            user,
            channel_id: channel_id.into(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }
}
