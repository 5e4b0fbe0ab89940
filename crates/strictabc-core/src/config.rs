//! Configuration file loading for strictabc.
//!
//! Reads `.strictabc/strictabc.json` and provides typed access to all settings.
//! Falls back to defaults when the config file is missing or incomplete.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_DIR: &str = ".strictabc";
pub const CONFIG_FILE: &str = "strictabc.json";

/// Top-level strictabc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrictConfig {
    pub version: String,
    /// Modules whose `abstractmethod` decorator marks restricted-abstract methods.
    #[serde(default = "default_marker_modules")]
    pub marker_modules: Vec<String>,
    /// Glob patterns (relative to the project root) of files to skip.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Finding codes dropped from reports (e.g. `"A004"`).
    #[serde(default)]
    pub suppress: Vec<String>,
}

fn default_marker_modules() -> Vec<String> {
    vec!["abcmeta".to_string()]
}

impl Default for StrictConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            marker_modules: default_marker_modules(),
            ignore_patterns: vec![],
            suppress: vec![],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StrictConfig {
    /// Load configuration from `strictabc.json` inside the given config directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Load from `<root>/.strictabc/strictabc.json`.
    pub fn load_from_root(root: &Path) -> Self {
        Self::load(&root.join(CONFIG_DIR))
    }

    /// Write this configuration as pretty JSON, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<PathBuf, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;
        let body = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, body + "\n").map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn is_suppressed(&self, code: &str) -> bool {
        self.suppress.iter().any(|c| c == code)
    }
}
