//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The opaque user identifier used to look up the goal
//! - The cycle year (the cycle ends on 31 December, 23:59:59 local time)
//! - Currency symbol for finance missions
//! - Whether consistency percentages clamp at 100
//! - An optional replacement mission content table
//!
//! Configuration is stored at `~/.config/northstar/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::engine::{EngineSettings, DEFAULT_CURRENCY_SYMBOL, DEFAULT_CYCLE_YEAR};
use crate::error::{ConfigError, Result};
use crate::progress::ProgressPolicy;

/// Identity of the local user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

/// Goal cycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_cycle_year")]
    pub year: i32,
}

/// Finance display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

/// Progress display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default)]
    pub clamp_consistency: bool,
}

/// Mission content configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Path to a TOML mission table replacing the built-in one.
    #[serde(default)]
    pub missions_path: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/northstar/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub cycle: CycleConfig,
    #[serde(default)]
    pub finance: FinanceConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

fn default_user_id() -> String {
    "local".into()
}
fn default_cycle_year() -> i32 {
    DEFAULT_CYCLE_YEAR
}
fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.into()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            year: default_cycle_year(),
        }
    }
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
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
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as integer")));
                    }
                }
                // An empty value unsets optional strings; required ones then
                // fail to deserialize.
                serde_json::Value::Null | serde_json::Value::String(_) if value.is_empty() => {
                    serde_json::Value::Null
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(cfg)
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
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

    /// Change a value by dot-separated key without saving.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    /// or fails validation.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.engine_settings()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Engine settings derived from this config.
    ///
    /// # Errors
    /// Returns an error if the cycle year is outside 1..=9999.
    pub fn engine_settings(&self) -> Result<EngineSettings, ConfigError> {
        if !(1..=9999).contains(&self.cycle.year) {
            return Err(ConfigError::InvalidValue {
                key: "cycle.year".to_string(),
                message: format!("{} is not a calendar year", self.cycle.year),
            });
        }
        Ok(EngineSettings {
            cycle_year: self.cycle.year,
            currency_symbol: self.finance.currency_symbol.clone(),
            progress: ProgressPolicy {
                clamp_consistency: self.progress.clamp_consistency,
            },
        })
    }
}
