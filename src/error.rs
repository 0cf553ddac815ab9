//! Error types for torrent-search
//!
//! Provider failures are recovered by the fallback chain; only
//! [`SearchError`] ever reaches a caller of `SearchAggregator::search`.

use std::time::Duration;

/// Errors raised while building an aggregator or its provider registry
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A requested search service is not in the registry
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// A provider entry in the settings cannot be instantiated
    #[error("Invalid provider {name}: {reason}")]
    InvalidProvider { name: String, reason: String },
}

/// Failure of a single provider attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Transport level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-2xx response
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Response body did not have the expected shape
    #[error("parse error: {0}")]
    Parse(String),

    /// The attempt did not settle within the race window
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The provider task panicked
    #[error("provider task panicked: {0}")]
    Panicked(String),

    /// The provider answered but nothing matched the search term
    #[error("no matching results ({returned} returned)")]
    NoMatches { returned: usize },

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// One entry of the per-search error accumulator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{provider} (attempt {attempt}): {error}")]
pub struct AttemptError {
    /// Provider that produced the error
    pub provider: String,
    /// 1 for the first attempt, 2 for the retry
    pub attempt: u8,
    pub error: ProviderError,
}

/// Every error collected during one search, in collection order
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("Search failed. Errors: {}.", join_detail(.errors))]
pub struct AggregateError {
    pub errors: Vec<AttemptError>,
}

impl AggregateError {
    pub fn new(errors: Vec<AttemptError>) -> Self {
        Self { errors }
    }
}

/// Entries separated by a blank line
fn join_detail(errors: &[AttemptError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Terminal error of a search call
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Every configured provider was exhausted, retries included
    #[error(transparent)]
    Exhausted(#[from] AggregateError),
}

impl SearchError {
    /// Errors collected before the search gave up
    pub fn errors(&self) -> &[AttemptError] {
        match self {
            Self::Exhausted(aggregate) => &aggregate.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(provider: &str, attempt: u8, error: ProviderError) -> AttemptError {
        AttemptError {
            provider: provider.to_string(),
            attempt,
            error,
        }
    }

    #[test]
    fn test_unknown_service_message() {
        let err = ConfigError::UnknownService("Kickass".into());
        assert_eq!(err.to_string(), "Unknown service: Kickass");
    }

    #[test]
    fn test_timeout_message() {
        let err = ProviderError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "timed out after 30000ms");
    }

    #[test]
    fn test_aggregate_joins_with_blank_line() {
        let aggregate = AggregateError::new(vec![
            attempt("tpb", 1, ProviderError::Status(503)),
            attempt("tpb", 2, ProviderError::Http("connection reset".into())),
        ]);

        assert_eq!(
            aggregate.to_string(),
            "Search failed. Errors: tpb (attempt 1): unexpected HTTP status 503\n\n\
             tpb (attempt 2): HTTP error: connection reset."
        );
    }

    #[test]
    fn test_empty_aggregate_message() {
        assert_eq!(
            AggregateError::default().to_string(),
            "Search failed. Errors: ."
        );
    }

    #[test]
    fn test_search_error_is_transparent() {
        let aggregate = AggregateError::new(vec![attempt(
            "lime",
            1,
            ProviderError::NoMatches { returned: 4 },
        )]);
        let err = SearchError::from(aggregate.clone());

        assert_eq!(err.to_string(), aggregate.to_string());
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ProviderError>();
        assert_send_sync::<SearchError>();
    }
}
