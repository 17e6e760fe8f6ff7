//! Configuration for scanning and viewing.
//!
//! Load order: `.classtree/config.toml` → environment variables → defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level classtree configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClasstreeConfig {
    pub scan: ScanConfig,
    pub view: ViewConfig,
}

/// Directory scanning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Skip files matched by `.gitignore` / `.ignore`.
    pub respect_gitignore: bool,
    /// Extra glob patterns (relative to the scanned root) to skip.
    pub extra_excludes: Vec<String>,
}

/// Interactive view configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows of source shown in the preview panel.
    pub preview_height: usize,
    /// Preview lines longer than this are truncated.
    pub preview_max_columns: usize,
    /// Maximum lines of the miniature subtree in the details panel.
    pub mini_tree_lines: usize,
    /// Relative paths longer than this are shortened with a `…/` prefix.
    pub path_max_chars: usize,
    /// Where tree exports are written. Defaults to the scanned root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            respect_gitignore: true,
            extra_excludes: Vec::new(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            preview_height: 30,
            preview_max_columns: 120,
            mini_tree_lines: 8,
            path_max_chars: 48,
            export_dir: None,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl ClasstreeConfig {
    /// Load config from `.classtree/config.toml` under `root`, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join(".classtree").join("config.toml");

        let mut config = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?
        } else {
            Self::default()
        };

        env_override("CLASSTREE_RECURSIVE", &mut config.scan.recursive);
        env_override("CLASSTREE_PREVIEW_HEIGHT", &mut config.view.preview_height);
        env_override(
            "CLASSTREE_PREVIEW_MAX_COLUMNS",
            &mut config.view.preview_max_columns,
        );
        env_override("CLASSTREE_MINI_TREE_LINES", &mut config.view.mini_tree_lines);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.preview_height == 0 {
            return Err(ConfigError::Invalid {
                field: "view.preview_height",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.view.preview_max_columns < 8 {
            return Err(ConfigError::Invalid {
                field: "view.preview_max_columns",
                reason: format!("{} is below the minimum of 8", self.view.preview_max_columns),
            });
        }
        Ok(())
    }
}
