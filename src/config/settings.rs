//! Settings structures for torrent-search configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Per-attempt timeout used when `search_timeout` is unset or zero
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub providers: Vec<ProviderConfig>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (TORRENT_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("TORRENT_SEARCH_SERVICES") {
            let services: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            self.search.search_services = Some(services);
        }
        if let Some(val) = var("TORRENT_SEARCH_TIMEOUT") {
            if let Ok(secs) = val.trim().parse() {
                self.search.search_timeout = Some(secs);
            }
        }
    }

    /// Get provider config by name
    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Get all enabled providers, in declaration order
    pub fn enabled_providers(&self) -> Vec<&ProviderConfig> {
        self.providers.iter().filter(|p| !p.disabled).collect()
    }
}

/// Aggregator settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Providers to query, in order (none = every registered provider)
    pub search_services: Option<Vec<String>>,
    /// Per-attempt timeout in seconds
    pub search_timeout: Option<u64>,
}

impl SearchSettings {
    /// Effective per-attempt timeout
    ///
    /// Both an absent value and `0` fall back to [`DEFAULT_SEARCH_TIMEOUT`],
    /// so a timeout of zero seconds cannot be configured.
    pub fn timeout(&self) -> Duration {
        match self.search_timeout {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => DEFAULT_SEARCH_TIMEOUT,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Transport timeout in seconds
    pub request_timeout: f64,
    /// User agent string (none = random)
    pub useragent: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 20.0,
            useragent: None,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Kind of provider to instantiate for a config entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// HTTP GET returning a JSON document
    #[default]
    JsonApi,
    /// Results listed inline in the settings
    Static,
}

/// Individual provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider name (unique identifier, used in `search_services`)
    pub name: String,
    /// Provider implementation
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    /// Whether provider is disabled
    pub disabled: bool,
    /// Endpoint URL (json_api)
    pub url: Option<String>,
    /// Query string parameter carrying the search term (json_api)
    pub query_param: String,
    /// JSON pointer to the result array, empty for the document root (json_api)
    pub results_pointer: String,
    /// Field holding the result name (json_api)
    pub name_field: String,
    /// Fixed query string parameters (json_api)
    pub params: HashMap<String, String>,
    /// Inline results (static)
    pub results: Vec<serde_json::Value>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ProviderKind::default(),
            disabled: false,
            url: None,
            query_param: "q".to_string(),
            results_pointer: String::new(),
            name_field: "name".to_string(),
            params: HashMap::new(),
            results: Vec::new(),
        }
    }
}
