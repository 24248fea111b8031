use anyhow::anyhow;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// A point on the globe, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> anyhow::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(anyhow!("Latitude {latitude} is out of range, expected -90..=90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!("Longitude {longitude} is out of range, expected -180..=180"));
        }

        Ok(Self { latitude, longitude })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Hourly variables on a uniform UTC grid.
///
/// `start`, `end` and `interval` are epoch seconds; the grid is half-open on
/// `end`. Every series must have one value per grid slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawHourly {
    pub start: i64,
    pub end: i64,
    pub interval: i64,
    /// °C
    pub temperature: Vec<f64>,
    /// %
    pub humidity: Vec<f64>,
    /// %
    pub rain_chance: Vec<f64>,
    /// mm
    pub precipitation: Vec<f64>,
    /// km/h
    pub wind_speed: Vec<f64>,
}

/// A single-instant weather snapshot as delivered by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCurrent {
    pub time: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub weather_code: i32,
    pub wind_speed: f64,
}

/// Everything one provider call yields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecast {
    /// IANA timezone of the forecast location.
    pub timezone: String,
    pub hourly: RawHourly,
    pub current: RawCurrent,
}

/// Where and when the hourly table is being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationContext {
    pub timezone: Tz,
    pub now: DateTime<Utc>,
}

impl LocationContext {
    pub fn new(timezone: &str, now: DateTime<Utc>) -> Result<Self, TransformError> {
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|_| TransformError::UnknownTimezone(timezone.to_string()))?;

        Ok(Self { timezone, now })
    }
}

/// One hour of the table, every field already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormattedRow {
    pub date: String,
    pub temp: String,
    pub humidity: String,
    pub rain_chance: String,
    pub precipitation: String,
    pub wind: String,
}

/// Current conditions with display-friendly field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub time: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub weather_code: i32,
    pub wind_speed: f64,
}

impl CurrentWeather {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_reject_out_of_range() {
        let err = Coordinates::new(91.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("Latitude"));

        let err = Coordinates::new(0.0, -180.5).unwrap_err();
        assert!(err.to_string().contains("Longitude"));

        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn coordinates_display_four_decimals() {
        let coords = Coordinates::new(52.370216, 4.895168).expect("valid coordinates");
        assert_eq!(coords.to_string(), "52.3702, 4.8952");
    }

    #[test]
    fn location_context_parses_iana_names() {
        let ctx = LocationContext::new("Europe/Amsterdam", Utc::now()).expect("known zone");
        assert_eq!(ctx.timezone, chrono_tz::Europe::Amsterdam);
    }

    #[test]
    fn location_context_rejects_unknown_zone() {
        let err = LocationContext::new("Mars/Olympus_Mons", Utc::now()).unwrap_err();
        assert!(matches!(err, TransformError::UnknownTimezone(ref name) if name == "Mars/Olympus_Mons"));
    }
}
