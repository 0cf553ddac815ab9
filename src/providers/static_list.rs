//! Provider backed by a fixed list of results

use super::traits::Provider;
use crate::error::ProviderError;
use crate::results::TorrentResult;
use async_trait::async_trait;

/// Returns the same configured results for every term
///
/// Filtering against the term is left to the aggregator, like any other
/// provider.
pub struct StaticProvider {
    name: String,
    results: Vec<TorrentResult>,
}

impl StaticProvider {
    pub fn new(name: impl Into<String>, results: Vec<TorrentResult>) -> Self {
        Self {
            name: name.into(),
            results,
        }
    }
}

#[async_trait]
impl Provider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _term: &str) -> Result<Vec<TorrentResult>, ProviderError> {
        Ok(self.results.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_results() {
        let provider = StaticProvider::new(
            "offline",
            vec![TorrentResult::new("Foo"), TorrentResult::new("Bar Foo")],
        );

        assert_eq!(provider.name(), "offline");
        let results = provider.search("anything").await.unwrap();
        assert_eq!(results.len(), 2);
    }
}
