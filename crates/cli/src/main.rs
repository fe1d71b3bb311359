//! ragview CLI
//!
//! Main entry point for the ragview command-line tool.
//! Opens the terminal query screen, or asks a single question headlessly.

mod commands;
mod tui;

use clap::{Parser, Subcommand};
use commands::{AskCommand, TuiCommand};
use ragview_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// ragview - ask questions of a retrieval-augmented query service
#[derive(Parser, Debug)]
#[command(name = "ragview")]
#[command(about = "Terminal client for a RAG query service", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "RAGVIEW_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "RAGVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Query service endpoint (default: http://localhost:8003/query)
    #[arg(short, long, global = true, env = "RAGVIEW_ENDPOINT")]
    endpoint: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive query screen (default)
    Tui(TuiCommand),

    /// Ask a single question and print the answer
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from defaults, config file and environment
    let mut config = AppConfig::load()?;

    // Config files named on the command line are merged on top
    if let Some(workspace) = &cli.workspace {
        let path = workspace.join(".ragview").join("config.yaml");
        if cli.config.is_none() && path.exists() {
            config = config.merge_yaml(&path)?;
        }
    }
    if let Some(path) = &cli.config {
        if config.config_file.as_ref() != Some(path) {
            config = config.merge_yaml(path)?;
        }
    }

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.endpoint,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );
    config.validate()?;

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Tui(TuiCommand::default()));

    // The terminal UI owns the screen, so it logs to a file instead of stderr
    match &command {
        Commands::Tui(_) => {
            config.ensure_log_dir()?;
            logging::init_file_logging(&config.log_file(), config.log_level.as_deref())?;
        }
        Commands::Ask(_) => logging::init_logging(config.log_level.as_deref(), config.no_color)?,
    }

    tracing::info!("ragview starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Endpoint: {}", config.endpoint);

    let command_name = match &command {
        Commands::Tui(_) => "tui",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match command {
        Commands::Tui(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        // Already reported to the user as a notice
        Err(e) if e.is_recoverable() => tracing::warn!("Command ended with: {}", e),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
