//! Configuration management

use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::prompts::{ASK_PERSONA, MENTION_FILLER, MENTION_PERSONA};
use crate::infrastructure::llm::LLMConfig;

/// Discord caps messages at 2000 characters; leave room for the marker
pub const DEFAULT_MAX_REPLY_CHARS: usize = 1900;
pub const DEFAULT_PORT: u16 = 8080;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub discord: DiscordConfig,
    pub llm: LLMConfig,
    pub http: HttpConfig,
    pub personas: PersonaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub max_reply_chars: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    pub token: Option<String>,
    /// Privileged intent; mention content is delivered without it
    pub message_content_intent: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    /// IP address or host name to bind
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PersonaConfig {
    pub ask: String,
    pub mention: String,
    pub mention_filler: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "gemini-discord-bot".to_string(),
            prefix: "!".to_string(),
            max_reply_chars: DEFAULT_MAX_REPLY_CHARS,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            ask: ASK_PERSONA.to_string(),
            mention: MENTION_PERSONA.to_string(),
            mention_filler: MENTION_FILLER.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            discord: DiscordConfig::default(),
            llm: LLMConfig::default(),
            http: HttpConfig::default(),
            personas: PersonaConfig::default(),
        }
    }
}

impl HttpConfig {
    /// Resolve the bind address, taking the first result for a host name
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue(format!("http address {}:{}: {}", self.host, self.port, reason));

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no address found".to_string()))
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Let process environment variables override the loaded values
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Override from `DISCORD_TOKEN`, `PORT`, `BOT_PREFIX` and `GEMINI_*`; empty values are ignored
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup("DISCORD_TOKEN") {
            self.discord.token = Some(token);
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(p) => self.http.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT {:?}, using {}", port, self.http.port),
            }
        }

        if let Some(prefix) = lookup("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        self.llm.apply_env_from(lookup);
    }

    /// Bot token if present and non-empty
    pub fn discord_token(&self) -> Option<&str> {
        self.discord.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }
}

/// Whether the process may start the bot at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// No bot token; nothing is started
    Unconfigured,
    Configured { token: String },
}

impl Startup {
    pub fn from_config(config: &Config, token_override: Option<String>) -> Self {
        let token = token_override
            .filter(|t| !t.trim().is_empty())
            .or_else(|| config.discord_token().map(str::to_string));

        match token {
            Some(token) => Startup::Configured { token },
            None => Startup::Unconfigured,
        }
    }

    pub fn token(self) -> Result<String, ConfigError> {
        match self {
            Startup::Configured { token } => Ok(token),
            Startup::Unconfigured => Err(ConfigError::MissingField("DISCORD_TOKEN".to_string())),
        }
    }
}
