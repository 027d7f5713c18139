use crate::application::errors::CommandError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{Command, CommandRegistry, IncomingMessage};

/// Generic prefix-command dispatch (`!help`, `!ping`, ...)
pub struct CommandService {
    registry: CommandRegistry,
    parser: MessageParser,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            parser: MessageParser::new(prefix),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        // Help is answered from the registry itself
        let help_usage = format!("{}help [command]", self.prefix());
        self.register(Command::new("help")
            .with_description("Show help message")
            .with_usage(help_usage));

        // Version command
        self.register(Command::new("version")
            .with_description("Show bot version")
            .with_handler(|_, _| {
                Ok(format!("gemini-discord-bot v{}", env!("CARGO_PKG_VERSION")))
            }));

        self.register(Command::new("ping")
            .with_description("Check the bot is alive")
            .with_handler(|_, _| Ok("🏓 Pong!".to_string())));
    }

    /// Run the prefix command in `message`, `Ok(None)` when there is none
    pub fn handle(&self, message: &IncomingMessage) -> Result<Option<String>, CommandError> {
        let Some(parsed) = self.parser.parse_command(&message.content) else {
            return Ok(None);
        };

        let cmd = self.registry.find(&parsed.name)
            .ok_or_else(|| CommandError::NotFound(parsed.name.clone()))?;

        if cmd.name == "help" {
            return Ok(Some(self.get_help(parsed.args.first().map(String::as_str))));
        }

        // Execute handler
        if let Some(handler) = &cmd.handler {
            Ok(Some(handler(message, &parsed.args)?))
        } else {
            Ok(Some(format!("Command {} not implemented", cmd.name)))
        }
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(cmd) = self.registry.get(name) {
                let mut help = format!("{}{} - {}", self.prefix(), cmd.name, cmd.description.as_deref().unwrap_or("No description"));
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}", usage));
                }
                return help;
            }
            return format!("Command {}{} not found", self.prefix(), name);
        }

        // List all commands
        let mut help = "Available commands:\n  /ask - Ask anything to the AI Bot\n".to_string();
        for cmd in self.registry.all() {
            help.push_str(&format!("  {}{} - {}\n", self.prefix(), cmd.name, cmd.description.as_deref().unwrap_or("")));
        }
        help
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;

    fn message(text: &str) -> IncomingMessage {
        IncomingMessage::new("1", "c", User::new("7", "ana"), text)
    }

    fn service() -> CommandService {
        let mut commands = CommandService::new("!");
        commands.register_defaults();
        commands
    }

    #[test]
    fn test_ping() {
        assert_eq!(service().handle(&message("!ping")).unwrap().as_deref(), Some("🏓 Pong!"));
    }

    #[test]
    fn test_plain_text_not_handled() {
        assert_eq!(service().handle(&message("hello")).unwrap(), None);
    }

    #[test]
    fn test_unknown_command() {
        let err = service().handle(&message("!dance")).unwrap_err();
        assert!(matches!(err, CommandError::NotFound(name) if name == "dance"));
    }

    #[test]
    fn test_help_lists_commands() {
        let help = service().handle(&message("!help")).unwrap().unwrap();
        assert!(help.contains("/ask"));
        assert!(help.contains("!ping"));
        assert!(help.contains("!version"));

        let single = service().handle(&message("!help ping")).unwrap().unwrap();
        assert!(single.starts_with("!ping - Check the bot is alive"));
    }
}
