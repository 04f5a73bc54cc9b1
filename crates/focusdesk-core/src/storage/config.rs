//! TOML-based application configuration.
//!
//! Stores user preferences: focus/break durations and the water button
//! step size. Stored at `~/.config/focusdesk/config.toml`; every field is
//! serde-defaulted so old files keep loading as the schema grows.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, CoreError};
use crate::timer::{TimerEngine, BREAK_SECS, FOCUS_SECS};

use super::data_dir;

/// Timer durations, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_min")]
    pub focus_min: u32,
    #[serde(default = "default_break_min")]
    pub break_min: u32,
}

/// Water counter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterConfig {
    /// Milliliters added/removed per button press.
    #[serde(default = "default_water_step")]
    pub step_ml: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub water: WaterConfig,
}

fn default_focus_min() -> u32 {
    FOCUS_SECS / 60
}

fn default_break_min() -> u32 {
    BREAK_SECS / 60
}

fn default_water_step() -> u32 {
    250
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_min: default_focus_min(),
            break_min: default_break_min(),
        }
    }
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            step_ml: default_water_step(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
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
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            log::warn!("config load failed, using defaults: {err}");
            Self::default()
        })
    }

    /// Timer engine with this configuration's durations.
    pub fn engine(&self) -> TimerEngine {
        TimerEngine::with_durations(self.timer.focus_min * 60, self.timer.break_min * 60)
    }

    /// Get a value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key and persist. The key must already
    /// exist; its current JSON type decides how the value parses.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        let mut current = &mut json;
        let mut parts = key.split('.').peekable();
        loop {
            let part = match parts.next() {
                Some(p) => p,
                None => return Err(ConfigError::UnknownKey(key.to_string()).into()),
            };
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
                            .into(),
                    ),
                    _ => serde_json::Value::String(value.to_string()),
                };
                obj.insert(part.to_string(), new_value);
                break;
            }
            current = match current.get_mut(part) {
                Some(next) => next,
                None => return Err(ConfigError::UnknownKey(key.to_string()).into()),
            };
        }
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }
}
