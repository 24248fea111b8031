//! Turns the raw hourly series into the rows shown in the forecast table.
//!
//! The pipeline is row oriented: build the time grid, zip it with the
//! series, keep the upcoming hours and format each row on its own.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    error::TransformError,
    model::{FormattedRow, LocationContext, RawHourly},
};

/// Now plus 24 hours at hourly resolution.
pub const MAX_ROWS: usize = 25;

const DATE_FORMAT: &str = "%d/%m %Hh";
const MISSING: &str = "-";

/// One grid slot with its unformatted values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyRow {
    /// `None` when the grid stamp is outside chrono's representable range.
    pub time: Option<DateTime<Utc>>,
    pub temperature: f64,
    pub humidity: f64,
    pub rain_chance: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
}

/// Half-open grid `start, start + interval, ...` strictly below `end`.
pub fn time_grid(
    start: i64,
    end: i64,
    interval: i64,
) -> Result<Vec<Option<DateTime<Utc>>>, TransformError> {
    let step = usize::try_from(interval)
        .ok()
        .filter(|step| *step > 0)
        .ok_or(TransformError::InvalidInterval(interval))?;

    Ok((start..end)
        .step_by(step)
        .map(|ts| DateTime::from_timestamp(ts, 0))
        .collect())
}

/// Pairs every grid stamp with the values at the same index.
pub fn hourly_rows(raw: &RawHourly) -> Result<Vec<HourlyRow>, TransformError> {
    let grid = time_grid(raw.start, raw.end, raw.interval)?;

    let series: [(&'static str, &[f64]); 5] = [
        ("temperature", &raw.temperature),
        ("humidity", &raw.humidity),
        ("rain_chance", &raw.rain_chance),
        ("precipitation", &raw.precipitation),
        ("wind_speed", &raw.wind_speed),
    ];
    for (name, values) in series {
        if values.len() != grid.len() {
            return Err(TransformError::LengthMismatch {
                series: name,
                expected: grid.len(),
                actual: values.len(),
            });
        }
    }

    Ok(grid
        .into_iter()
        .enumerate()
        .map(|(i, time)| HourlyRow {
            time,
            temperature: raw.temperature[i],
            humidity: raw.humidity[i],
            rain_chance: raw.rain_chance[i],
            precipitation: raw.precipitation[i],
            wind_speed: raw.wind_speed[i],
        })
        .collect())
}

/// Drops hours before `now` and keeps at most [`MAX_ROWS`] of the rest.
///
/// Rows without a usable timestamp cannot be placed in the window and are
/// dropped as well.
pub fn upcoming(rows: Vec<HourlyRow>, now: DateTime<Utc>) -> Vec<HourlyRow> {
    rows.into_iter()
        .filter(|row| row.time.is_some_and(|time| time >= now))
        .take(MAX_ROWS)
        .collect()
}

pub fn format_row(row: &HourlyRow, timezone: &Tz) -> FormattedRow {
    FormattedRow {
        date: format_date(row.time, timezone),
        temp: format_temperature(row.temperature),
        humidity: format_humidity(row.humidity),
        rain_chance: format_rain(row.rain_chance),
        precipitation: format_precipitation(row.precipitation),
        wind: format_wind(row.wind_speed),
    }
}

pub fn transform_hourly(
    raw: &RawHourly,
    context: &LocationContext,
) -> Result<Vec<FormattedRow>, TransformError> {
    let rows = hourly_rows(raw)?;
    let total = rows.len();
    let kept = upcoming(rows, context.now);

    tracing::debug!(
        total,
        kept = kept.len(),
        timezone = %context.timezone,
        "transformed hourly series"
    );

    Ok(kept
        .iter()
        .map(|row| format_row(row, &context.timezone))
        .collect())
}

/// `DD/MM HHh` in the given zone, empty when there is no instant.
pub fn format_date(time: Option<DateTime<Utc>>, timezone: &Tz) -> String {
    time.map(|time| time.with_timezone(timezone).format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

// Rounding is half to even throughout.
fn whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn tenths(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round_ties_even() / 10.0)
}

fn with_unit(value: f64, unit: &str, fmt: impl Fn(f64) -> String) -> String {
    if value.is_finite() {
        format!("{}{unit}", fmt(value))
    } else {
        MISSING.to_string()
    }
}

pub fn format_temperature(celsius: f64) -> String {
    with_unit(celsius, "°C", tenths)
}

pub fn format_precipitation(mm: f64) -> String {
    with_unit(mm, "mm", tenths)
}

pub fn format_humidity(percent: f64) -> String {
    with_unit(percent, "%", |v| whole(v).to_string())
}

pub fn format_wind(kmh: f64) -> String {
    with_unit(kmh, "km/h", |v| whole(v).to_string())
}

/// Rain chance with one to five exclamation marks as an intensity cue.
pub fn format_rain(percent: f64) -> String {
    if !percent.is_finite() {
        return MISSING.to_string();
    }

    let chance = whole(percent);
    if chance <= 0 {
        return "0%".to_string();
    }

    let marks = 1
        + [25, 50, 75].iter().filter(|step| chance >= **step).count()
        + usize::from(chance > 90);

    format!("{chance}% {}", "!".repeat(marks))
}
