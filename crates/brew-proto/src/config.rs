use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the recipe store reads its catalog and keeps its own state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// TOML file with `[[recipe]]` and `[[ingredient]]` tables.
    /// Defaults to `$XDG_CONFIG_HOME/brewlog/catalog.toml`.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: PathBuf,
    /// JSON file holding favorite overrides.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    /// How many recently updated recipes the store exposes.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_search")]
    pub show_search: bool,
    /// Initial state of the debug stats panel.
    #[serde(default)]
    pub debug_panel: bool,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_file: default_catalog_file(),
            state_file: default_state_file(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_search: default_show_search(),
            debug_panel: false,
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_catalog_file() -> PathBuf {
    // Bundled distributions ship catalog.toml beside the executable
    #[cfg(windows)]
    {
        if let Some(dir) = platform::exe_dir() {
            let portable = dir.join("catalog.toml");
            if portable.exists() {
                return portable;
            }
        }
    }

    platform::config_dir().join("catalog.toml")
}

fn default_state_file() -> PathBuf {
    platform::data_dir().join("state.json")
}

fn default_recent_limit() -> usize {
    5
}

fn default_show_search() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    100
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
