//! hostgrid.toml configuration parser.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Plugin configuration, loaded from a TOML file. Every field has a
/// default so the plugin runs without a config file at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostgridConfig {
    #[serde(default)]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Name the plugin reports to the orchestrator.
    #[serde(default = "default_plugin_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_plugin_name() -> String {
    "hostgrid".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            name: default_plugin_name(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl HostgridConfig {
    /// Load configuration from `path`, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
