//! Generic JSON API provider
//!
//! Covers services that answer a GET request with a JSON document holding
//! an array of result objects somewhere inside it.

use super::traits::Provider;
use crate::config::ProviderConfig;
use crate::error::{ConfigError, ProviderError};
use crate::network::HttpClient;
use crate::results::TorrentResult;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Provider querying a JSON endpoint
pub struct JsonApiProvider {
    name: String,
    client: HttpClient,
    url: Url,
    query_param: String,
    results_pointer: String,
    name_field: String,
    params: Vec<(String, String)>,
}

impl JsonApiProvider {
    /// Build a provider from its config entry
    pub fn from_config(config: &ProviderConfig, client: HttpClient) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidProvider {
            name: config.name.clone(),
            reason,
        };

        let raw_url = config
            .url
            .as_deref()
            .ok_or_else(|| invalid("missing url".to_string()))?;
        let url = Url::parse(raw_url).map_err(|e| invalid(format!("bad url {raw_url}: {e}")))?;

        if !config.results_pointer.is_empty() && !config.results_pointer.starts_with('/') {
            return Err(invalid(format!(
                "results_pointer must start with '/': {}",
                config.results_pointer
            )));
        }

        // Sorted so requests are reproducible
        let mut params: Vec<(String, String)> = config
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        params.sort();

        Ok(Self {
            name: config.name.clone(),
            client,
            url,
            query_param: config.query_param.clone(),
            results_pointer: config.results_pointer.clone(),
            name_field: config.name_field.clone(),
            params,
        })
    }

    fn parse_results(&self, body: Value) -> Result<Vec<TorrentResult>, ProviderError> {
        let mut body = body;
        let items = match body.pointer_mut(&self.results_pointer).map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                return Err(ProviderError::Parse(format!(
                    "no result array at '{}'",
                    self.results_pointer
                )))
            }
            Some(other) => {
                return Err(ProviderError::Parse(format!(
                    "expected array at '{}', found {}",
                    self.results_pointer,
                    json_kind(&other)
                )))
            }
        };

        Ok(items
            .into_iter()
            .filter_map(|item| TorrentResult::from_object(item, &self.name_field))
            .collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl Provider for JsonApiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, term: &str) -> Result<Vec<TorrentResult>, ProviderError> {
        let mut params = Vec::with_capacity(self.params.len() + 1);
        params.push((self.query_param.clone(), term.to_string()));
        params.extend(self.params.iter().cloned());

        let body = self.client.get_json(self.url.as_str(), &params).await?;
        let results = self.parse_results(body)?;

        debug!("Provider {} returned {} raw results", self.name, results.len());
        Ok(results)
    }
}
