//! Provider loader for building the registry from configuration

use super::json_api::JsonApiProvider;
use super::registry::ProviderRegistry;
use super::static_list::StaticProvider;
use super::traits::Provider;
use crate::config::{ProviderConfig, ProviderKind, Settings};
use crate::error::ConfigError;
use crate::network::HttpClient;
use crate::results::TorrentResult;
use std::sync::Arc;
use tracing::info;

/// Loader for initializing providers from configuration
pub struct ProviderLoader;

impl ProviderLoader {
    /// Load all enabled providers from settings, in declaration order
    pub fn load(settings: &Settings, client: &HttpClient) -> Result<ProviderRegistry, ConfigError> {
        let mut registry = ProviderRegistry::new();

        for config in &settings.providers {
            if config.disabled {
                info!("Skipping disabled provider: {}", config.name);
                continue;
            }

            let provider = Self::create_provider(config, client)?;
            info!("Loaded provider: {} ({:?})", config.name, config.kind);
            registry.register(provider);
        }

        info!("Loaded {} providers", registry.len());
        Ok(registry)
    }

    /// Create a provider instance for one config entry
    fn create_provider(
        config: &ProviderConfig,
        client: &HttpClient,
    ) -> Result<Arc<dyn Provider>, ConfigError> {
        if config.name.trim().is_empty() {
            return Err(ConfigError::InvalidProvider {
                name: config.name.clone(),
                reason: "empty name".to_string(),
            });
        }

        let provider: Arc<dyn Provider> = match config.kind {
            ProviderKind::JsonApi => Arc::new(JsonApiProvider::from_config(config, client.clone())?),
            ProviderKind::Static => {
                let results = config
                    .results
                    .iter()
                    .map(|value| {
                        TorrentResult::from_object(value.clone(), "name").ok_or_else(|| {
                            ConfigError::InvalidProvider {
                                name: config.name.clone(),
                                reason: "static results must be objects".to_string(),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Arc::new(StaticProvider::new(&config.name, results))
            }
        };

        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(providers: Vec<ProviderConfig>) -> Settings {
        Settings {
            providers,
            ..Default::default()
        }
    }

    fn static_config(name: &str) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            kind: ProviderKind::Static,
            results: vec![json!({ "name": "Ubuntu 22.04 ISO", "size": 1234 })],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_in_declaration_order() {
        let api = ProviderConfig {
            name: "torrentapi".to_string(),
            url: Some("https://torrents.example.org/api".to_string()),
            ..Default::default()
        };
        let mut disabled = static_config("spare");
        disabled.disabled = true;

        let registry = ProviderLoader::load(
            &settings(vec![static_config("offline"), disabled, api]),
            &HttpClient::new().unwrap(),
        )
        .unwrap();

        assert_eq!(registry.names(), vec!["offline", "torrentapi"]);

        let results = registry.get("offline").unwrap().search("ubuntu").await.unwrap();
        assert_eq!(results[0].name(), Some("Ubuntu 22.04 ISO"));
        assert_eq!(results[0].field("size"), Some(&json!(1234)));
    }

    #[test]
    fn test_invalid_entries_fail() {
        let client = HttpClient::new().unwrap();

        let missing_url = ProviderConfig {
            name: "torrentapi".to_string(),
            ..Default::default()
        };
        assert!(ProviderLoader::load(&settings(vec![missing_url]), &client).is_err());

        let mut bad_static = static_config("offline");
        bad_static.results = vec![json!("Ubuntu")];
        assert!(ProviderLoader::load(&settings(vec![bad_static]), &client).is_err());

        let unnamed = static_config(" ");
        assert!(ProviderLoader::load(&settings(vec![unnamed]), &client).is_err());
    }
}
