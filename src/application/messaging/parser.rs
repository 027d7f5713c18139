//! Message parser - Extracts prefix commands and mention-free text

use regex_lite::Regex;

/// A prefix command split into name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Parses raw message text
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse `<prefix>name args...`, `None` for ordinary text
    pub fn parse_command(&self, text: &str) -> Option<ParsedCommand> {
        if self.command_prefix.is_empty() {
            return None;
        }
        let cmd_text = text.trim_start().strip_prefix(&self.command_prefix)?;

        // Split command and arguments
        let mut parts = cmd_text.split_whitespace();
        let name = parts.next()?.to_string();
        let args = parts.map(|s| s.to_string()).collect();

        Some(ParsedCommand { name, args })
    }
}

/// Remove every `<@id>` / `<@!id>` token for `bot_id` and trim the rest
pub fn strip_mention(text: &str, bot_id: &str) -> String {
    let pattern = format!("<@!?{}>", regex_lite::escape(bot_id));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, "").trim().to_string(),
        Err(e) => {
            tracing::warn!("Invalid mention pattern for {}: {}", bot_id, e);
            text.trim().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        let parser = MessageParser::new("!");
        let cmd = parser.parse_command("!help ping").unwrap();
        assert_eq!(cmd.name, "help");
        assert_eq!(cmd.args, vec!["ping".to_string()]);
    }

    #[test]
    fn test_plain_text_is_not_command() {
        let parser = MessageParser::new("!");
        assert_eq!(parser.parse_command("hello there"), None);
        assert_eq!(parser.parse_command("!"), None);
        assert_eq!(MessageParser::new("").parse_command("!ping"), None);
    }

    #[test]
    fn test_strip_both_mention_forms() {
        assert_eq!(strip_mention("<@42> tell me a joke", "42"), "tell me a joke");
        assert_eq!(strip_mention("hey <@!42>  you there? <@42>", "42"), "hey   you there?");
    }

    #[test]
    fn test_strip_keeps_other_mentions() {
        assert_eq!(strip_mention("<@42> roast <@7>", "42"), "roast <@7>");
    }

    #[test]
    fn test_mention_only_is_empty() {
        assert_eq!(strip_mention("  <@42>  ", "42"), "");
    }
}
