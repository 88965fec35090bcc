//! Configuration file support for Rink.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/rink/config.toml`.

use crate::catalog::WORKOUT_LOG_XP;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub progression: ProgressionConfig,

    #[serde(default)]
    pub defaults: ProfileDefaults,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// XP reward amounts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default = "default_workout_log_xp")]
    pub workout_log_xp: u32,

    #[serde(default = "default_meal_consumed_xp")]
    pub meal_consumed_xp: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            workout_log_xp: default_workout_log_xp(),
            meal_consumed_xp: default_meal_consumed_xp(),
        }
    }
}

/// Values used when a profile is first created
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileDefaults {
    #[serde(default = "default_workout_duration")]
    pub workout_duration_minutes: u32,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            workout_duration_minutes: default_workout_duration(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rink")
}

fn default_workout_log_xp() -> u32 {
    WORKOUT_LOG_XP
}

fn default_meal_consumed_xp() -> u32 {
    5
}

fn default_workout_duration() -> u32 {
    60
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the engine can't work with
    pub fn validate(&self) -> Result<()> {
        if self.defaults.workout_duration_minutes == 0 {
            return Err(Error::Config(
                "defaults.workout_duration_minutes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rink")
            .join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
