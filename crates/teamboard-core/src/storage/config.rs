//! TOML-based application configuration.
//!
//! Stores team settings including:
//! - Weekly incentive rules (minimum activities, penalty, house subsidy)
//! - Display targets (MDRT, quarterly challenge, monthly champion)
//! - Leaderboard membership
//!
//! Configuration is stored at `~/.config/teamboard/config.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::incentive::IncentiveRules;

/// Weekly incentive configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IncentiveConfig {
    #[serde(flatten)]
    pub rules: IncentiveRules,
    /// First day of the season; rollover is replayed from its week.
    #[serde(default)]
    pub season_start: Option<NaiveDate>,
}

/// Display targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetsConfig {
    #[serde(default = "default_mdrt_fyc")]
    pub mdrt_fyc: f64,
    #[serde(default = "default_quarterly_challenge")]
    pub quarterly_challenge: f64,
    #[serde(default = "default_monthly_champion_min")]
    pub monthly_champion_min: f64,
}

/// Leaderboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LeaderboardConfig {
    #[serde(default)]
    pub include_leaders: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/teamboard/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub incentive: IncentiveConfig,
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

fn default_mdrt_fyc() -> f64 {
    800_000.0
}
fn default_quarterly_challenge() -> f64 {
    88_000.0
}
fn default_monthly_champion_min() -> f64 {
    20_000.0
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            mdrt_fyc: default_mdrt_fyc(),
            quarterly_challenge: default_quarterly_challenge(),
            monthly_champion_min: default_monthly_champion_min(),
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
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // An empty value clears optional fields such as the season start
                    serde_json::Value::String(_) | serde_json::Value::Null if value.is_empty() => {
                        serde_json::Value::Null
                    }
                    // Enum settings may switch between a bare name and a table,
                    // e.g. `count` and `{"score":{"min_score":5}}`
                    serde_json::Value::String(_) | serde_json::Value::Null => {
                        match serde_json::from_str::<serde_json::Value>(value) {
                            Ok(parsed @ serde_json::Value::Object(_)) => parsed,
                            Ok(serde_json::Value::String(s)) => serde_json::Value::String(s),
                            _ => serde_json::Value::String(value.into()),
                        }
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of `config.toml` in the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Render the configuration as it is written to disk.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SaveFailed {
                path: Self::path().unwrap_or_default(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Restore one section (`incentive`, `targets` or `leaderboard`) to its
    /// defaults, leaving the others alone.
    pub fn reset_section(&mut self, section: &str) -> Result<(), ConfigError> {
        match section {
            "incentive" => self.incentive = IncentiveConfig::default(),
            "targets" => self.targets = TargetsConfig::default(),
            "leaderboard" => self.leaderboard = LeaderboardConfig::default(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(Self::path()?, content)?;
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

    /// Set a config value by key, validate, and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the resulting incentive rules are invalid, or the config cannot be
    /// saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.incentive.rules.validate()?;
        *self = updated;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
