//! price-tracker - Product page extraction and price-history tracking CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use price_tracker::commands::{ScrapeCommand, ShowCommand, TrackCommand};
use price_tracker::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-tracker",
    version,
    about = "Product page price extraction and price-history tracking",
    long_about = "Scrapes retail product pages into normalized records and tracks lowest, highest and average prices over time."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PRICE_TRACKER_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true, env = "PRICE_TRACKER_DELAY")]
    delay: Option<u64>,

    /// Product store file
    #[arg(long, global = true, env = "PRICE_TRACKER_STORE")]
    store: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract product records without storing them
    #[command(alias = "s")]
    Scrape {
        /// Product page URL(s)
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Extract product records and add their prices to the store
    #[command(alias = "t")]
    Track {
        /// Product page URL(s)
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Show stored products, or one product's price history
    Show {
        /// Product page URL
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(store) = cli.store {
        config.store_path = Some(store);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let output = match cli.command {
        Commands::Scrape { urls } => ScrapeCommand::new(config).execute(&urls).await?,
        Commands::Track { urls } => TrackCommand::new(config).execute(&urls).await?,
        Commands::Show { url } => ShowCommand::new(config).execute(url.as_deref())?,
    };

    println!("{}", output);

    Ok(())
}
