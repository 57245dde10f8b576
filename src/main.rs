use clap::{Parser, Subcommand};
use std::sync::Arc;

mod api;
mod cli;
mod config;
mod core;
mod error;
mod services;
mod signal_handler;
mod utils;

use cli::{serve, songs, stub};
use config::Config;
use error::Result;
use services::ServiceFactory;

#[derive(Parser)]
#[command(name = "songlib")]
#[command(about = "Song catalog with lyric enrichment and verse pagination")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(serve::ServeArgs),

    /// Add a song, fetching its details from the lookup service
    Add(songs::AddArgs),

    /// List songs matching a filter
    List(songs::ListArgs),

    /// Show a page of one song's verses
    Verses(songs::VersesArgs),

    /// Replace fields of a stored song
    Update(songs::UpdateArgs),

    /// Delete a song
    Delete(songs::DeleteArgs),

    /// Run the stub song details service
    StubApi(stub::StubArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first so configuration problems are reported
    let log_handle = utils::logging::init_logging(cli.verbose)?;

    // Load configuration, then switch to its log level
    let config_file = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load(cli.config.as_deref())?;
    log_handle.apply_level(&config.log_level)?;

    // Initialize services
    let services = ServiceFactory::new(Arc::new(config));

    let config = services.config();
    match cli.command {
        Commands::Serve(args) => serve::execute(args, &config).await,
        Commands::Add(args) => songs::add(args, &services).await,
        Commands::List(args) => songs::list(args, &services).await,
        Commands::Verses(args) => songs::verses(args, &services).await,
        Commands::Update(args) => songs::update(args, &services).await,
        Commands::Delete(args) => songs::delete(args, &services).await,
        Commands::StubApi(args) => stub::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args, &config, &config_file).await,
    }
}
