//! Search provider module
//!
//! Defines the Provider trait and the registry the aggregator selects
//! providers from.

mod json_api;
mod loader;
mod registry;
mod static_list;
mod traits;

pub use json_api::JsonApiProvider;
pub use loader::ProviderLoader;
pub use registry::ProviderRegistry;
pub use static_list::StaticProvider;
pub use traits::Provider;
