//! Sequential fallback search across providers

use super::timeout;
use super::verify::verify_results;
use crate::config::SearchSettings;
use crate::error::{AggregateError, AttemptError, ConfigError, ProviderError, SearchError};
use crate::providers::{Provider, ProviderRegistry};
use crate::results::TorrentResult;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Searches providers one after another until one yields verified results
///
/// Each provider gets two attempts (the second one is a retry after a
/// failure, a timeout or an empty verified set) before the next provider
/// is tried. Providers are never queried concurrently.
pub struct SearchAggregator {
    providers: Vec<Arc<dyn Provider>>,
    search_timeout: Duration,
}

/// Progress of one `search` call through the provider list
enum ChainState {
    /// First attempt on provider `i`
    Trying(usize),
    /// Second and last attempt on provider `i`
    RetryingOnce(usize),
    Succeeded(Vec<TorrentResult>),
    ExhaustedAll,
}

impl SearchAggregator {
    /// Select providers from `registry` according to `settings`
    ///
    /// Without `search_services` every registered provider is used, in
    /// registration order. Fails on the first name the registry does not
    /// know.
    pub fn new(registry: &ProviderRegistry, settings: &SearchSettings) -> Result<Self, ConfigError> {
        let providers = match settings.search_services {
            Some(ref names) => registry.resolve(names.as_slice())?,
            None => registry.all(),
        };

        Ok(Self {
            providers,
            search_timeout: settings.timeout(),
        })
    }

    /// Names of the selected providers, in fallback order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Window each provider attempt is raced against
    pub fn search_timeout(&self) -> Duration {
        self.search_timeout
    }

    /// Search for `term`, falling back across providers
    ///
    /// Resolves to the first non-empty verified result set. With no
    /// providers selected it resolves to an empty list. When every provider
    /// is exhausted the error carries everything collected on the way.
    pub async fn search(&self, term: &str) -> Result<Vec<TorrentResult>, SearchError> {
        info!("Searching for '{}'...", term);

        if self.providers.is_empty() {
            debug!("No providers configured");
            return Ok(Vec::new());
        }

        let mut errors = Vec::new();
        let mut state = ChainState::Trying(0);

        loop {
            state = match state {
                ChainState::Trying(index) => {
                    match self.attempt(index, 1, term, &mut errors).await {
                        Some(results) => ChainState::Succeeded(results),
                        None => ChainState::RetryingOnce(index),
                    }
                }
                ChainState::RetryingOnce(index) => {
                    match self.attempt(index, 2, term, &mut errors).await {
                        Some(results) => ChainState::Succeeded(results),
                        None if index + 1 < self.providers.len() => ChainState::Trying(index + 1),
                        None => ChainState::ExhaustedAll,
                    }
                }
                ChainState::Succeeded(results) => {
                    info!("Found {} results for '{}'", results.len(), term);
                    return Ok(results);
                }
                ChainState::ExhaustedAll => {
                    return Err(AggregateError::new(errors).into());
                }
            };
        }
    }

    /// One attempt against provider `index`
    ///
    /// Returns the verified results if there are any, otherwise records why
    /// the attempt was unusable.
    async fn attempt(
        &self,
        index: usize,
        attempt: u8,
        term: &str,
        errors: &mut Vec<AttemptError>,
    ) -> Option<Vec<TorrentResult>> {
        let provider = &self.providers[index];

        let error = match self.service_search(provider, term).await {
            Ok(raw) => {
                let returned = raw.len();
                let verified = verify_results(raw, term);
                if !verified.is_empty() {
                    debug!(
                        "Provider {} returned {} results, {} verified",
                        provider.name(),
                        returned,
                        verified.len()
                    );
                    return Some(verified);
                }

                debug!(
                    "Provider {} returned no matching results (attempt {})",
                    provider.name(),
                    attempt
                );
                ProviderError::NoMatches { returned }
            }
            Err(err) => {
                warn!(
                    "Search error from {} (attempt {}): {}",
                    provider.name(),
                    attempt,
                    err
                );
                err
            }
        };

        errors.push(AttemptError {
            provider: provider.name().to_string(),
            attempt,
            error,
        });
        None
    }

    /// Race one provider call against the timeout
    ///
    /// The call runs as its own task. When the timer wins, the task is
    /// detached rather than aborted: it runs to completion and its outcome
    /// is ignored.
    async fn service_search(
        &self,
        provider: &Arc<dyn Provider>,
        term: &str,
    ) -> Result<Vec<TorrentResult>, ProviderError> {
        let provider = Arc::clone(provider);
        let term = term.to_string();
        let call = tokio::spawn(async move { provider.search(&term).await });

        timeout::race(
            async move {
                call.await
                    .unwrap_or_else(|e| Err(ProviderError::Panicked(e.to_string())))
            },
            self.search_timeout,
        )
        .await
    }
}

impl fmt::Debug for SearchAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchAggregator")
            .field("providers", &self.provider_names())
            .field("search_timeout", &self.search_timeout)
            .finish()
    }
}
