//! Provider trait

use crate::error::ProviderError;
use crate::results::TorrentResult;
use async_trait::async_trait;

/// A torrent search service the aggregator can fall back across
///
/// Implementations are shared between concurrent searches and must not
/// keep per-search state. A call may fail, return results that do not
/// match the term, or never settle; the aggregator copes with all three.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name, as referenced by `search_services`
    fn name(&self) -> &str;

    /// Search the service for `term`
    async fn search(&self, term: &str) -> Result<Vec<TorrentResult>, ProviderError>;
}
