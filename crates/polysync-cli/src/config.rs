//! TOML configuration.
//!
//! Supplies connection parameters for both stores plus run options. The
//! sync core receives already-parameterized connections, never this struct.

use anyhow::{Context, Result};
use polysync_graph::GraphConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "polysync.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub graph: GraphConfig,
    pub sync: SyncConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            graph: GraphConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

/// Relational store location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("polysync.db"),
        }
    }
}

/// Run options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Clear the projected subgraph before syncing. Marker-scoped: graph
    /// content without a source_id is never touched.
    pub wipe_before_sync: bool,
}

impl Config {
    /// Load configuration from an explicit path, or from `polysync.toml` in
    /// the working directory, falling back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.source.path, PathBuf::from("polysync.db"));
        assert_eq!(config.graph.uri, "bolt://localhost:7687");
        assert!(!config.sync.wipe_before_sync);
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            "[source]\npath = \"red_social.db\"\n\n[sync]\nwipe_before_sync = true\n",
        )
        .unwrap();
        assert_eq!(config.source.path, PathBuf::from("red_social.db"));
        assert!(config.sync.wipe_before_sync);
        assert_eq!(config.graph.user, "neo4j");
    }
}
