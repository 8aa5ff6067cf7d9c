use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::processor::{EngineSettings, StatsEngine};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

pub mod commands;

/// Per-user file statistics for a chat file-intake bot
#[derive(Parser)]
#[command(name = "file-stats")]
#[command(about = "Per-user file statistics for a chat file-intake bot")]
#[command(version)]
pub struct Cli {
    /// Database path (overrides config.toml and env vars)
    #[arg(long, global = true)]
    pub database_path: Option<PathBuf>,

    /// Configuration file to read instead of ./config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging (same as DEBUG_MODE=true)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a local file (or archive) into a user's statistics
    Ingest(commands::ingest::IngestCommand),
    /// Show a user's statistics
    Stats(commands::stats::StatsCommand),
    /// Reset a user's statistics
    Reset(commands::reset::ResetCommand),
    /// Manage a user's ignored extensions
    Ignore(commands::ignore::IgnoreCommand),
    /// Remove whole extension categories from a user's statistics
    Forget(commands::forget::ForgetCommand),
    /// List users with stored statistics
    Users(commands::users::UsersCommand),
}

/// Everything a command needs once configuration is resolved
pub struct CommandContext {
    pub config: AppConfig,
    pub engine: StatsEngine<Database>,
}

impl CommandContext {
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let database = Database::with_busy_timeout(
            &config.database.path,
            Duration::from_millis(config.database.busy_timeout_ms),
        )?;
        let settings = EngineSettings::from_config(&config)?;
        debug!("Archive suffixes: {:?}", settings.archives.suffixes());

        Ok(Self {
            engine: StatsEngine::new(database, settings),
            config,
        })
    }
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())
        .map_err(|e| AppError::Config(format!("Configuration error: {}", e)))?;

    // CLI arguments override config values
    if let Some(path) = &cli.database_path {
        config.database.path = path.clone();
    }
    if cli.debug {
        config.logging.debug = true;
    }

    // RUST_LOG wins; otherwise "error", or "debug" in debug mode
    let default_filter = if config.logging.debug { "debug" } else { "error" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();

    info!("Using database {}", config.database.path.display());
    let ctx = CommandContext::from_config(config)?;

    match cli.command {
        Commands::Ingest(command) => command.run(&ctx),
        Commands::Stats(command) => command.run(&ctx),
        Commands::Reset(command) => command.run(&ctx),
        Commands::Ignore(command) => command.run(&ctx),
        Commands::Forget(command) => command.run(&ctx),
        Commands::Users(command) => command.run(&ctx),
    }
}
