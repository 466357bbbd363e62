//! TOML-based application configuration.
//!
//! Stores:
//! - Where the course catalog lives
//! - How lecture/subsection suffixes are compared
//! - Whether overlapping classes are only reported or also refused
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::conflict::ConflictPolicy;
use crate::error::{ConfigError, CoreError, Result};
use crate::selection::{SelectionRules, SuffixMatch};

const CONFIG_FILE: &str = "config.toml";

/// Catalog location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Relative paths resolve against the data directory.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

/// Selection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub suffix_match: SuffixMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictMode {
    #[default]
    Advisory,
    Strict,
}

/// Conflict handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictsConfig {
    #[serde(default)]
    pub policy: ConflictMode,
    /// Only used in strict mode.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub conflicts: ConflictsConfig,
}

fn default_catalog_path() -> String {
    "courses.json".into()
}
fn default_max_concurrent() -> usize {
    2
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for ConflictsConfig {
    fn default() -> Self {
        Self {
            policy: ConflictMode::Advisory,
            max_concurrent: default_max_concurrent(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf setting".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Load from `dir`, writing defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(dir)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let path = Self::path_in(dir);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// setting (e.g. `conflicts.policy = "sometimes"`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| {
            CoreError::from(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(())
    }

    /// Catalog path, resolved against `dir` when relative.
    pub fn catalog_path(&self, dir: &Path) -> PathBuf {
        let path = Path::new(&self.catalog.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            dir.join(path)
        }
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        match self.conflicts.policy {
            ConflictMode::Advisory => ConflictPolicy::Advisory,
            ConflictMode::Strict => ConflictPolicy::Strict {
                max_concurrent: self.conflicts.max_concurrent,
            },
        }
    }

    /// Selection rules described by this configuration.
    pub fn selection_rules(&self) -> SelectionRules {
        SelectionRules {
            suffix_match: self.selection.suffix_match,
            conflict_policy: self.conflict_policy(),
        }
    }
}
