//! Console adapter for development/testing

use std::sync::Arc;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::{BotEvent, EventDispatcher};
use crate::application::services::ask_service::{ASK_COMMAND, QUESTION_OPTION};
use crate::domain::entities::{IncomingMessage, Reply, SlashInvocation, User};
use crate::domain::traits::{Bot, BotInfo, InteractionResponder, TypingGuard};

const CONSOLE_CHANNEL: &str = "console";
const CONSOLE_USER_ID: &str = "1";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    user: User,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo { id: "0".to_string() },
            user: User::new(CONSOLE_USER_ID, whoami()),
        }
    }

    /// `/ask <question>` becomes a slash invocation, anything else a mention
    pub fn event_for_line(&self, line: &str) -> Option<BotEvent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let ask_prefix = format!("/{}", ASK_COMMAND);
        let question = line
            .strip_prefix(&ask_prefix)
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
        if let Some(question) = question {
            let invocation = SlashInvocation::new(ASK_COMMAND, self.user.clone(), CONSOLE_CHANNEL)
                .with_option(QUESTION_OPTION, question.trim());
            return Some(BotEvent::SlashCommand {
                invocation,
                responder: Arc::new(ConsoleInteraction),
            });
        }

        let content = format!("<@{}> {}", self.info.id, line);
        let message = IncomingMessage::new(chrono::Utc::now().timestamp_millis().to_string(), CONSOLE_CHANNEL, self.user.clone(), content)
            .with_mention(self.info.id.clone());
        Some(BotEvent::Message(message))
    }

    /// Read stdin until EOF, dispatching one event per line
    pub async fn run(&self, dispatcher: &EventDispatcher) -> Result<(), BotError> {
        println!("Console mode. Type a message, '/ask <question>', or 'exit'.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print_prompt();
            let line = lines
                .next_line()
                .await
                .map_err(|e| BotError::Internal(format!("stdin: {}", e)))?;

            let Some(line) = line else { break };
            if matches!(line.trim(), "exit" | "quit") {
                break;
            }

            if let Some(event) = self.event_for_line(&line) {
                dispatcher.dispatch(event, self).await;
            }
        }

        println!("Bye!");
        Ok(())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn whoami() -> String {
    std::env::var("USER").unwrap_or_else(|_| "you".to_string())
}

fn print_prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Text(text) => println!("[BOT] {}", text),
        Reply::Embed(embed) => {
            println!("[BOT] == {} ==", embed.author);
            println!("{}", embed.description);
            if let Some(footer) = &embed.footer {
                println!("-- {}", footer);
            }
        }
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
        print_reply(&Reply::text(text));
        Ok("console_msg".to_string())
    }

    fn start_typing(&self, _channel_id: &str) -> Result<TypingGuard, BotError> {
        println!("[BOT is typing...]");
        Ok(TypingGuard::none())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Prints interaction responses
pub struct ConsoleInteraction;

#[async_trait]
impl InteractionResponder for ConsoleInteraction {
    async fn defer(&self) -> Result<(), BotError> {
        println!("[BOT is thinking...]");
        Ok(())
    }

    async fn followup(&self, reply: Reply) -> Result<(), BotError> {
        print_reply(&reply);
        Ok(())
    }
}
