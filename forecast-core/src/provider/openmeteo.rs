use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinates, RawCurrent, RawForecast, RawHourly};

use super::ForecastProvider;

const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DEFAULT_INTERVAL: i64 = 3600;
/// Stands in for a `null` weather code; no WMO code is negative.
const MISSING_CODE: i32 = -1;

const HOURLY_VARIABLES: &str =
    "temperature_2m,precipitation_probability,precipitation,wind_speed_10m,relative_humidity_2m";
const CURRENT_VARIABLES: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
                                 precipitation,weather_code,wind_speed_10m";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    forecast_days: u8,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(forecast_days: u8) -> Self {
        Self {
            forecast_days,
            http: Client::new(),
        }
    }

    async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<OmResponse> {
        tracing::debug!(%coordinates, days = self.forecast_days, "requesting Open-Meteo forecast");

        let res = self
            .http
            .get(BASE_URL)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("current", CURRENT_VARIABLES.to_string()),
                ("timeformat", "unixtime".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", self.forecast_days.to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")
    }
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<i64>,
    temperature_2m: Vec<Option<f64>>,
    precipitation_probability: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
    wind_speed_10m: Vec<Option<f64>>,
    relative_humidity_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: i64,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<i32>,
    wind_speed_10m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    timezone: String,
    hourly: OmHourly,
    current: OmCurrent,
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch(&self, coordinates: Coordinates) -> Result<RawForecast> {
        let parsed = self.fetch_forecast(coordinates).await?;
        Ok(into_raw(parsed))
    }
}

fn into_raw(parsed: OmResponse) -> RawForecast {
    let OmResponse {
        timezone,
        hourly,
        current,
    } = parsed;

    // The grid is rebuilt from its first stamp and spacing.
    let start = hourly.time.first().copied().unwrap_or_default();
    let interval = match hourly.time.as_slice() {
        [first, second, ..] => second - first,
        _ => DEFAULT_INTERVAL,
    };
    let end = start + hourly.time.len() as i64 * interval;

    RawForecast {
        timezone,
        hourly: RawHourly {
            start,
            end,
            interval,
            temperature: values(hourly.temperature_2m),
            humidity: values(hourly.relative_humidity_2m),
            rain_chance: values(hourly.precipitation_probability),
            precipitation: values(hourly.precipitation),
            wind_speed: values(hourly.wind_speed_10m),
        },
        current: RawCurrent {
            time: current.time,
            temperature: value(current.temperature_2m),
            humidity: value(current.relative_humidity_2m),
            apparent_temperature: value(current.apparent_temperature),
            precipitation: value(current.precipitation),
            weather_code: current.weather_code.unwrap_or(MISSING_CODE),
            wind_speed: value(current.wind_speed_10m),
        },
    }
}

// Open-Meteo reports gaps as `null`.
fn value(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

fn values(vs: Vec<Option<f64>>) -> Vec<f64> {
    vs.into_iter().map(value).collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
