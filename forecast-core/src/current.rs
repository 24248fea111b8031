use crate::model::{CurrentWeather, RawCurrent};

/// Copies the snapshot into display names. Nothing is rounded or classified.
pub fn transform_current(raw: &RawCurrent) -> CurrentWeather {
    CurrentWeather {
        time: raw.time,
        temperature: raw.temperature,
        humidity: raw.humidity,
        apparent_temperature: raw.apparent_temperature,
        precipitation: raw.precipitation,
        weather_code: raw.weather_code,
        wind_speed: raw.wind_speed,
    }
}
