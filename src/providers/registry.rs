//! Provider registry for looking up search services by name

use super::traits::Provider;
use crate::error::ConfigError;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered table of available providers
///
/// Built once at startup and handed to every aggregator that needs it.
/// Iteration follows registration order, which is also the default
/// fallback order.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
    /// Provider name -> position in `providers`
    index: HashMap<String, usize>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider
    ///
    /// Registering a name twice replaces the earlier provider but keeps its
    /// position.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        let name = provider.name().to_string();
        match self.index.get(&name) {
            Some(&pos) => self.providers[pos] = provider,
            None => {
                self.index.insert(name, self.providers.len());
                self.providers.push(provider);
            }
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, provider: Arc<dyn Provider>) -> Self {
        self.register(provider);
        self
    }

    /// Get a provider by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Provider>> {
        self.index.get(name).map(|&pos| &self.providers[pos])
    }

    /// Resolve names to providers, preserving the given order
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<dyn Provider>>, ConfigError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownService(name.to_string()))
            })
            .collect()
    }

    /// All providers in registration order
    pub fn all(&self) -> Vec<Arc<dyn Provider>> {
        self.providers.clone()
    }

    /// All provider names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Check if a provider exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
