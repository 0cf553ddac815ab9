//! Configuration module for torrent-search
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable pointing at a settings file
pub const SETTINGS_PATH_ENV: &str = "TORRENT_SEARCH_SETTINGS_PATH";

/// Load settings from an explicit path, the environment, or default locations
///
/// An explicit path must exist. Otherwise the first existing file among
/// `$TORRENT_SEARCH_SETTINGS_PATH`, `settings.yml`, `config/settings.yml`
/// and `<config dir>/torrent-search/settings.yml` is used, falling back to
/// defaults. Environment overrides are applied last in every case.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?
        }
        None => match find_settings_file() {
            Some(path) => {
                info!("Loading settings from: {}", path.display());
                Settings::from_file(&path)
                    .with_context(|| format!("failed to load settings from {}", path.display()))?
            }
            None => {
                info!("No settings file found, using defaults");
                Settings::default()
            }
        },
    };

    settings.merge_env();
    Ok(settings)
}

fn find_settings_file() -> Option<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("settings.yml"));
    paths.push(PathBuf::from("config/settings.yml"));
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("torrent-search/settings.yml"));
    }

    paths.into_iter().find(|path| path.exists())
}
