use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinates;

/// Open-Meteo serves at most this many forecast days.
pub const MAX_FORECAST_DAYS: u8 = 16;
const DEFAULT_FORECAST_DAYS: u8 = 2;
const DEFAULT_USER_AGENT: &str = concat!("forecast-cli/", env!("CARGO_PKG_VERSION"));

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Days of hourly data to request; two always cover the next 24 hours.
    pub forecast_days: u8,

    /// Sent to Nominatim, which rejects anonymous clients.
    pub user_agent: String,

    /// Example TOML:
    /// [default_location]
    /// latitude = 52.37
    /// longitude = 4.89
    pub default_location: Option<Coordinates>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast_days: DEFAULT_FORECAST_DAYS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_location: None,
        }
    }
}

impl Config {
    /// Return the saved location or explain how to set one.
    pub fn default_location(&self) -> Result<Coordinates> {
        self.default_location.ok_or_else(|| {
            anyhow!(
                "No default location configured.\n\
                 Hint: run `forecast configure` or pass --lat and --lon."
            )
        })
    }

    pub fn set_default_location(&mut self, coordinates: Coordinates) {
        self.default_location = Some(coordinates);
    }

    pub fn set_forecast_days(&mut self, days: u8) -> Result<()> {
        check_forecast_days(days)?;
        self.forecast_days = days;
        Ok(())
    }

    /// Reject values a hand-edited file may carry.
    pub fn validate(&self) -> Result<()> {
        check_forecast_days(self.forecast_days)?;
        if let Some(location) = self.default_location {
            Coordinates::new(location.latitude, location.longitude)
                .context("Invalid default_location in config")?;
        }
        Ok(())
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn check_forecast_days(days: u8) -> Result<()> {
    if (1..=MAX_FORECAST_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(anyhow!(
            "forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {days}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.default_location().unwrap_err();

        assert!(err.to_string().contains("No default location configured"));
        assert!(err.to_string().contains("Hint: run `forecast configure`"));
    }

    #[test]
    fn set_default_location_and_read_back() {
        let mut cfg = Config::default();
        let amsterdam = Coordinates::new(52.37, 4.89).expect("valid coordinates");

        cfg.set_default_location(amsterdam);

        let location = cfg.default_location().expect("default location must exist");
        assert_eq!(location, amsterdam);
    }

    #[test]
    fn toml_round_trip_keeps_settings() {
        let mut cfg = Config::default();
        cfg.set_default_location(Coordinates::new(-33.87, 151.21).expect("valid coordinates"));
        cfg.set_forecast_days(3).expect("in range");

        let text = cfg.to_toml().expect("serializable");
        assert!(text.contains("[default_location]"));

        let parsed = Config::from_toml(&text).expect("parsable");
        assert_eq!(parsed.default_location, cfg.default_location);
        assert_eq!(parsed.forecast_days, 3);
        assert_eq!(parsed.user_agent, cfg.user_agent);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = Config::from_toml("").expect("empty file is valid");

        assert!(cfg.default_location.is_none());
        assert_eq!(cfg.forecast_days, DEFAULT_FORECAST_DAYS);
        assert!(cfg.user_agent.starts_with("forecast-cli/"));
    }

    #[test]
    fn forecast_days_out_of_range_is_rejected() {
        let mut cfg = Config::default();
        assert!(cfg.set_forecast_days(0).is_err());
        assert!(cfg.set_forecast_days(MAX_FORECAST_DAYS + 1).is_err());
        assert_eq!(cfg.forecast_days, DEFAULT_FORECAST_DAYS);

        let err = Config::from_toml("forecast_days = 40").unwrap_err();
        assert!(err.to_string().contains("forecast_days"));
    }

    #[test]
    fn invalid_saved_location_is_rejected() {
        let err = Config::from_toml("[default_location]\nlatitude = 95.0\nlongitude = 0.0\n")
            .unwrap_err();
        assert!(format!("{err:#}").contains("Latitude"));
    }
}
