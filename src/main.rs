use std::process::ExitCode;
use clap::{Parser, Subcommand};

use gemini_discord_bot::app::{build_dispatcher, build_generation, run_bot};
use gemini_discord_bot::application::errors::BotError;
use gemini_discord_bot::infrastructure::adapters::console::ConsoleAdapter;
use gemini_discord_bot::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "gemini-discord-bot")]
#[command(about = "Discord bot answering with Google Gemini", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (default)
    Run,
    /// Chat with the bot handlers from the terminal
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => block_on(run_bot(load_config(&cli.config), cli.token)),
        Commands::Console => block_on(run_console(load_config(&cli.config))),
        Commands::Version => {
            println!("gemini-discord-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn block_on(task: impl std::future::Future<Output = Result<(), BotError>>) -> Result<(), BotError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(task)
}

/// File config when present, environment variables on top
fn load_config(config_path: &str) -> Config {
    if !std::path::Path::new(config_path).exists() {
        return Config::load_env();
    }

    match Config::load(config_path) {
        Ok(mut config) => {
            config.apply_env();
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        }
    }
}

async fn run_console(config: Config) -> Result<(), BotError> {
    let generation = build_generation(&config.llm);
    let dispatcher = build_dispatcher(&config, generation);

    ConsoleAdapter::new().run(&dispatcher).await
}

fn init_config(path: &str) -> Result<(), BotError> {
    if std::path::Path::new(path).exists() {
        println!("Config already exists: {}", path);
        return Ok(());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)
        .map_err(|e| BotError::Internal(format!("Failed to write {}: {}", path, e)))?;
    println!("Created {}", path);
    Ok(())
}
