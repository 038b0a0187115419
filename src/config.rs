use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::events::ModelEvent;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub events: EventsConfig,
}

/// Which lifecycle events get handler dispatch when a model type boots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Events to bind, in binding order (default: all of them)
    #[serde(default = "default_bind")]
    pub bind: Vec<ModelEvent>,
}

fn default_bind() -> Vec<ModelEvent> {
    ModelEvent::ALL.to_vec()
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;
        Ok(config_dir.join("action-hooks").join("config.toml"))
    }
}
