//! torrent-search command line entry point
//!
//! Loads settings, builds the provider registry and runs a single search,
//! printing the verified results as JSON.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use torrent_search::{
    config, network::HttpClient, providers::ProviderLoader, SearchAggregator,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Search torrent providers in order until one returns matching results.
///
/// Settings are read from --config, $TORRENT_SEARCH_SETTINGS_PATH,
/// settings.yml or config/settings.yml. TORRENT_SEARCH_SERVICES and
/// TORRENT_SEARCH_TIMEOUT override the search section; RUST_LOG sets the
/// log filter (default: info).
#[derive(Parser, Debug)]
#[command(name = "torrent-search", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search term; several words are joined with single spaces
    #[arg(required = true, trailing_var_arg = true)]
    term: Vec<String>,
}

impl Cli {
    fn term(&self) -> String {
        self.term.join(" ")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = config::load(cli.config.as_deref())?;

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let registry = ProviderLoader::load(&settings, &client)?;
    let aggregator = SearchAggregator::new(&registry, &settings.search)?;
    info!(
        "Using providers {:?} with a {:?} timeout",
        aggregator.provider_names(),
        aggregator.search_timeout()
    );

    let results = aggregator.search(&cli.term()).await?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
