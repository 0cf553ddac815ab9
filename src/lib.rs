//! torrent-search: fallback search across unreliable torrent providers
//!
//! Providers are tried one at a time; the first one whose results survive
//! verification against the search term wins.

pub mod config;
pub mod error;
pub mod network;
pub mod providers;
pub mod results;
pub mod search;

pub use config::{SearchSettings, Settings};
pub use error::{ConfigError, ProviderError, SearchError};
pub use providers::{Provider, ProviderRegistry};
pub use results::TorrentResult;
pub use search::SearchAggregator;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
