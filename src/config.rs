//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/flattree/flattree.toml`
//! 3. Local config: `<dir>/.flattree.toml` (working directory or `-C <dir>`)
//! 4. Environment variables: `FLATTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;

/// Unified configuration for flattree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Delimiter applied to nodes that carry a `path` but no `splitDelimiter`
    pub delimiter: String,
    /// Attribute used to sort sibling groups when building (`id` or any attribute)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    /// Recompute `level`/`isLeaf` right after building
    pub relevel: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: "/".into(),
            sort_key: None,
            relevel: false,
            pretty: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub delimiter: Option<String>,
    pub sort_key: Option<String>,
    pub relevel: Option<bool>,
    pub pretty: Option<bool>,
}

/// Get the XDG config directory for flattree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flattree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("flattree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".flattree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            delimiter: overlay
                .delimiter
                .clone()
                .unwrap_or_else(|| self.delimiter.clone()),
            sort_key: overlay.sort_key.clone().or_else(|| self.sort_key.clone()),
            relevel: overlay.relevel.unwrap_or(self.relevel),
            pretty: overlay.pretty.unwrap_or(self.pretty),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.flattree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), local_dir)
    }

    /// Load settings from an explicit global file and local directory.
    ///
    /// Missing files are skipped; unreadable or malformed ones are errors.
    #[instrument(level = "debug")]
    pub fn load_layers(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply FLATTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FLATTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = val;
        }
        if let Ok(val) = config.get_string("sort_key") {
            settings.sort_key = Some(val);
        }
        if let Ok(val) = config.get_bool("relevel") {
            settings.relevel = val;
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.delimiter.is_empty() {
            return Err(ApplicationError::Config {
                message: "delimiter must not be empty".into(),
            });
        }
        if self.sort_key.as_deref() == Some("") {
            return Err(ApplicationError::Config {
                message: "sort_key must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# flattree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/flattree/flattree.toml
#   Local:  <dir>/.flattree.toml
#   Env:    FLATTREE_* environment variables (explicit overrides)

# Delimiter for nodes with a path but no splitDelimiter
# delimiter = "/"

# Sort sibling groups by this attribute when building ("id" or any attribute)
# sort_key = "id"

# Recompute level/isLeaf right after building
# relevel = false

# Pretty-print JSON output
# pretty = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
