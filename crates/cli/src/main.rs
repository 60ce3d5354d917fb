//! askdocs CLI
//!
//! Main entry point for the askdocs command-line tool.
//! Answers questions over a prebuilt document corpus via retrieval-augmented
//! generation.

mod commands;

use askdocs_core::{config::AppConfig, logging, AppResult};
use clap::{Parser, Subcommand};
use commands::{AskCommand, SearchCommand, StatsCommand};
use std::path::PathBuf;

/// askdocs - question answering over a prebuilt document corpus
#[derive(Parser, Debug)]
#[command(name = "askdocs")]
#[command(about = "Question answering over a prebuilt document corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "ASKDOCS_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the vector index file
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Path to the chunk-mapping file
    #[arg(long, global = true)]
    chunks: Option<PathBuf>,

    /// Base URL for the chat and embedding services
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Chat model identifier
    #[arg(short, long, global = true)]
    model: Option<String>,

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
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question and get an answer grounded in the corpus
    Ask(AskCommand),

    /// Retrieve the chunks nearest to a query, without answering
    Search(SearchCommand),

    /// Show corpus statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load(cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.index,
        cli.chunks,
        cli.endpoint,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    // Log startup
    tracing::info!("askdocs starting");
    tracing::debug!("Index: {:?}", config.index);
    tracing::debug!("Chunks: {:?}", config.chunks);
    tracing::debug!("Chat model: {}", config.chat.model);

    // Emit command.start span
    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Search(_) => "search",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
