use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use madori_layout::{LayoutMode, PlacementConfig, Presets};
use serde::{Deserialize, Serialize};

use crate::hotkey::{parse_hotkey, Hotkey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub placement: PlacementConfig,
    pub presets: Presets,
    /// Hotkey string (`ctrl-alt-c`) to layout mode.
    pub bindings: BTreeMap<String, LayoutMode>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            presets: Presets::default(),
            bindings: default_bindings(),
        }
    }
}

fn default_bindings() -> BTreeMap<String, LayoutMode> {
    [
        ("ctrl-alt-c", LayoutMode::Center),
        ("ctrl-alt-d", LayoutMode::CenterDoubled),
        ("ctrl-alt-left", LayoutMode::LeftHalf),
        ("ctrl-alt-right", LayoutMode::RightHalf),
        ("ctrl-alt-m", LayoutMode::MoveToCenter),
    ]
    .into_iter()
    .map(|(key, mode)| (key.to_string(), mode))
    .collect()
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.placement.validate();
        Ok(config)
    }

    /// Parse every binding. Fails on the first hotkey that does not parse.
    pub fn hotkeys(&self) -> Result<HashMap<Hotkey, LayoutMode>> {
        self.bindings
            .iter()
            .map(|(key, mode)| {
                let hotkey = parse_hotkey(key)
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("Invalid binding for {}: '{}'", mode, key))?;
                Ok((hotkey, *mode))
            })
            .collect()
    }
}

/// `~/.config/madori/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("madori").join("config.toml"))
}

pub fn try_load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Config::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the config, falling back to defaults. A missing file is normal;
/// any other problem is logged.
pub fn load(path: Option<&Path>) -> Config {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        tracing::warn!("Could not determine config path, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Config::default();
    }

    match try_load(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("{:#}; using defaults", e);
            Config::default()
        }
    }
}
