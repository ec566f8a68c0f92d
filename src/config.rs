//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Local config: `<dir>/.orgtree.toml`
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, UnresolvedPolicy};

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub unresolved: Option<UnresolvedPolicy>,
}

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Hierarchy data file used when none is given on the command line
    pub data_file: Option<PathBuf>,
    /// Handling of subordinate ids without a record
    pub unresolved: UnresolvedPolicy,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".orgtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
///
/// A relative `data_file` is taken relative to the config file's directory.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    let mut raw: RawSettings = toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })?;

    if let Some(data_file) = raw.data_file.take() {
        let expanded = PathBuf::from(expand_env_vars(&data_file.to_string_lossy()));
        raw.data_file = Some(match path.parent() {
            Some(dir) if expanded.is_relative() => dir.join(expanded),
            _ => expanded,
        });
    }
    Ok(raw)
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

fn parse_policy(value: &str) -> Result<UnresolvedPolicy, ApplicationError> {
    match value.trim().to_lowercase().as_str() {
        "reject" => Ok(UnresolvedPolicy::Reject),
        "skip" => Ok(UnresolvedPolicy::Skip),
        other => Err(ApplicationError::Config {
            message: format!("unknown unresolved policy: {} (expected reject or skip)", other),
        }),
    }
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay.data_file.clone().or_else(|| self.data_file.clone()),
            unresolved: overlay.unresolved.unwrap_or(self.unresolved),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.orgtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Load only the given local config on top of defaults.
    ///
    /// Skips the global config and environment variables.
    pub fn load_local_only(dir: &Path) -> Result<Self, ApplicationError> {
        let local_path = local_config_path(dir);
        if !local_path.exists() {
            return Ok(Self::default());
        }
        Ok(Self::default().merge_with(&load_raw_settings(&local_path)?))
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = Some(PathBuf::from(expand_env_vars(&val)));
        }
        if let Ok(val) = config.get_string("unresolved") {
            settings.unresolved = parse_policy(&val)?;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_rejects_unresolved_and_has_no_data_file() {
        let settings = Settings::default();
        assert_eq!(settings.unresolved, UnresolvedPolicy::Reject);
        assert!(settings.data_file.is_none());
    }

    #[test]
    fn given_overlay_when_merging_then_specified_fields_win() {
        let base = Settings {
            data_file: Some(PathBuf::from("/base.json")),
            unresolved: UnresolvedPolicy::Reject,
        };
        let overlay = RawSettings {
            data_file: None,
            unresolved: Some(UnresolvedPolicy::Skip),
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.data_file, Some(PathBuf::from("/base.json")));
        assert_eq!(merged.unresolved, UnresolvedPolicy::Skip);
    }

    #[test]
    fn given_policy_strings_when_parsing_then_case_insensitive() {
        assert_eq!(parse_policy("Skip").unwrap(), UnresolvedPolicy::Skip);
        assert_eq!(parse_policy(" reject ").unwrap(), UnresolvedPolicy::Reject);
        assert!(parse_policy("ignore").is_err());
    }
}
