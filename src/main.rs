//! Main entry point for the Lingo24 CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingo24::cli::commands::{self, Commands};
use lingo24::{Client, ClientConfig};

/// Lingo24 Business Documents client
#[derive(Parser, Debug)]
#[command(name = "lingo24", version, about, long_about = None)]
struct Args {
    /// API key (optional, defaults to LINGO24_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// API base URL (optional, defaults to LINGO24_API_ENDPOINT env var)
    #[arg(long)]
    endpoint: Option<String>,

    /// JSON or YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page size for listings
    #[arg(long)]
    per_page: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_PKG_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(command) = args.command else {
        println!("Please specify a command. Use --help for more information.");
        return Ok(());
    };

    // Override config with CLI args if provided
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(api_key) = args.api_key {
        config.api_key = api_key;
    }
    if let Some(endpoint) = args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(per_page) = args.per_page {
        config = config.with_per_page(per_page);
    }

    let client = Client::new(config)?;

    // Execute command
    match command {
        Commands::Show { job } => commands::handle_show(&client, job).await?,
        Commands::Price { job } => commands::handle_price(&client, job).await?,
        Commands::Metrics { job } => commands::handle_metrics(&client, job).await?,
        Commands::Files { job, file_type } => {
            commands::handle_files(&client, job, file_type).await?
        }
        Commands::Delete { job } => commands::handle_delete(&client, job).await?,
    }

    Ok(())
}
