//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `BINTREE_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Which implementation answers the depth, sum and lookup queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Recursive below `recursion_limit` nodes, explicit stack above
    #[default]
    Auto,
    /// Recursion over subtree views
    Recursive,
    /// Explicit-stack loops
    Iterative,
}

/// Unified configuration for bintree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub traversal: Traversal,
    /// Node count above which `auto` stops recursing
    pub recursion_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            traversal: Traversal::Auto,
            recursion_limit: 10_000,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub traversal: Option<Traversal>,
    pub recursion_limit: Option<usize>,
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

/// Expand `~` and `$VAR` in a user supplied path.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            traversal: overlay.traversal.unwrap_or(self.traversal),
            recursion_limit: overlay.recursion_limit.unwrap_or(self.recursion_limit),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(&expand_path(path))?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply BINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BINTREE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        if let Some(value) = optional(config.get_string("traversal"))? {
            settings.traversal = Traversal::from_str(&value, true).map_err(|_| {
                SettingsError::InvalidValue {
                    key: "traversal".to_string(),
                    value,
                }
            })?;
        }
        if let Some(limit) = optional(config.get::<usize>("recursion_limit"))? {
            settings.recursion_limit = limit;
        }
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/bintree/bintree.toml
#   Explicit: bintree --config <file>
#   Env:      BINTREE_* environment variables (e.g. BINTREE_TRAVERSAL=iterative)

# Query implementation: "auto", "recursive" or "iterative"
# traversal = "auto"

# Node count above which "auto" switches to the explicit-stack implementation
# recursion_limit = 10000
"#
        .to_string()
    }
}

// unset keys are not an error, malformed ones are
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, SettingsError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
