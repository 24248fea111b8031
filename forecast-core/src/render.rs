//! Plain-text output: the hourly table and the current conditions summary.

use chrono_tz::Tz;

use crate::{
    hourly::{format_date, format_humidity, format_precipitation, format_temperature, format_wind},
    model::{CurrentWeather, FormattedRow},
    scale,
};

pub const SEPARATOR: &str = "  ";

/// Table columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Temp,
    RainChance,
    Humidity,
    Precipitation,
    Wind,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Date,
        Column::Temp,
        Column::RainChance,
        Column::Humidity,
        Column::Precipitation,
        Column::Wind,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Temp => "temperature",
            Column::RainChance => "rain chance",
            Column::Humidity => "humidity",
            Column::Precipitation => "precipitation",
            Column::Wind => "wind",
        }
    }

    /// Minimum width in characters; longer values overflow.
    pub fn width(self) -> usize {
        match self {
            Column::Date => 10,
            Column::Temp => 12,
            Column::RainChance => 13,
            Column::Humidity => 9,
            Column::Precipitation => 15,
            Column::Wind => 8,
        }
    }

    pub fn value(self, row: &FormattedRow) -> &str {
        match self {
            Column::Date => &row.date,
            Column::Temp => &row.temp,
            Column::RainChance => &row.rain_chance,
            Column::Humidity => &row.humidity,
            Column::Precipitation => &row.precipitation,
            Column::Wind => &row.wind,
        }
    }
}

fn line<'a>(cell: impl Fn(Column) -> &'a str) -> String {
    Column::ALL
        .iter()
        .map(|column| format!("{:<width$}", cell(*column), width = column.width()))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Header plus one left-justified line per row, joined by `\n`.
pub fn render(rows: &[FormattedRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(line(Column::header));
    lines.extend(rows.iter().map(|row| line(|column| column.value(row))));
    lines.join("\n")
}

/// Human-readable current conditions, one entry per line.
pub fn summary(location: &str, current: &CurrentWeather, timezone: &Tz) -> Vec<String> {
    let precipitation = if current.precipitation > 0.0 {
        format!(
            "{} ({})",
            format_precipitation(current.precipitation),
            scale::precipitation_intensity(current.precipitation)
        )
    } else {
        format_precipitation(current.precipitation)
    };

    // A missing reading is NaN, which would classify as the catch-all term.
    let wind = if current.wind_speed.is_finite() {
        format!(
            "{} ({})",
            format_wind(current.wind_speed),
            scale::beaufort(current.wind_speed)
        )
    } else {
        format_wind(current.wind_speed)
    };

    vec![
        format!("Weather for {location}"),
        format!("Observed:      {}", format_date(current.observed_at(), timezone)),
        format!("Conditions:    {}", scale::describe(current.weather_code)),
        format!(
            "Temperature:   {} (feels like {})",
            format_temperature(current.temperature),
            format_temperature(current.apparent_temperature)
        ),
        format!("Humidity:      {}", format_humidity(current.humidity)),
        format!("Precipitation: {precipitation}"),
        format!("Wind:          {wind}"),
    ]
}
