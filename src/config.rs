use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::midi::SourceSpec;

/// Configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiConfig {
    pub version: String,

    /// Snapshot of the provider's ports, used instead of live hardware
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Declared devices; empty exposes every port
    #[serde(default)]
    pub source: SourceSpec,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            snapshot: None,
            source: SourceSpec::new(),
            log_level: default_log_level(),
        }
    }
}

impl MidiConfig {
    /// Write the default configuration if `path` does not exist yet
    pub async fn ensure_config_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let json = serde_json::to_string_pretty(&MidiConfig::default())?;
        fs::write(path, json)
            .await
            .context("Failed to write default config")?;

        Ok(())
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .context(format!("Failed to read config from {:?}", path))?;

        let mut config: MidiConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        // Relative snapshot paths are taken from the config's directory
        if let (Some(snapshot), Some(dir)) = (config.snapshot.as_mut(), path.parent()) {
            if snapshot.is_relative() {
                *snapshot = dir.join(&*snapshot);
            }
        }

        Ok(config)
    }
}
