use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, Coordinates, LocationContext, NominatimGeocoder, provider_from_config, render,
    scale, summary, transform_current, transform_hourly,
};
use inquire::CustomType;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Hourly weather table for a coordinate pair")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a default location and forecast settings.
    Configure {
        /// Latitude in degrees; prompted for when absent.
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees; prompted for when absent.
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Days of hourly data to request (1-16).
        #[arg(long)]
        forecast_days: Option<u8>,
    },

    /// Show current conditions and the next 24 hours.
    Show {
        /// Latitude in degrees; defaults to the configured location.
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        /// Longitude in degrees; defaults to the configured location.
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// RFC 3339 instant to treat as "now"; if absent, the system clock.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// List the WMO weather codes and their descriptions.
    Codes,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure {
                lat,
                lon,
                forecast_days,
            } => configure(lat, lon, forecast_days),
            Command::Show { lat, lon, now } => show(lat, lon, now).await,
            Command::Codes => {
                for (code, description) in scale::weather_codes() {
                    println!("{code:>3}  {description}");
                }
                Ok(())
            }
        }
    }
}

fn prompt_degrees(label: &str, given: Option<f64>) -> Result<f64> {
    match given {
        Some(value) => Ok(value),
        None => Ok(CustomType::<f64>::new(label)
            .with_error_message("Please type a number, e.g. 52.37")
            .prompt()?),
    }
}

fn configure(lat: Option<f64>, lon: Option<f64>, forecast_days: Option<u8>) -> Result<()> {
    let mut config = Config::load()?;

    let latitude = prompt_degrees("Latitude:", lat)?;
    let longitude = prompt_degrees("Longitude:", lon)?;
    config.set_default_location(Coordinates::new(latitude, longitude)?);

    if let Some(days) = forecast_days {
        config.set_forecast_days(days)?;
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

fn resolve_location(config: &Config, lat: Option<f64>, lon: Option<f64>) -> Result<Coordinates> {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
        (None, None) => config.default_location(),
        _ => Err(anyhow!("--lat and --lon must be given together")),
    }
}

async fn show(lat: Option<f64>, lon: Option<f64>, now: Option<DateTime<Utc>>) -> Result<()> {
    let config = Config::load()?;
    let coordinates = resolve_location(&config, lat, lon)?;

    let provider = provider_from_config(&config)?;
    let geocoder = NominatimGeocoder::new(&config.user_agent)?;

    let (forecast, place) = tokio::join!(
        provider.fetch(coordinates),
        geocoder.place_name(coordinates)
    );
    let forecast = forecast?;

    let location = match place {
        Ok(Some(name)) => name,
        Ok(None) => {
            tracing::warn!(%coordinates, "no place found for coordinates");
            coordinates.to_string()
        }
        Err(err) => {
            tracing::warn!(%coordinates, error = %err, "reverse geocoding failed");
            coordinates.to_string()
        }
    };

    let context = LocationContext::new(&forecast.timezone, now.unwrap_or_else(Utc::now))?;
    let rows = transform_hourly(&forecast.hourly, &context)?;
    let current = transform_current(&forecast.current);

    for line in summary(&location, &current, &context.timezone) {
        println!("{line}");
    }
    println!();
    println!("{}", render(&rows));

    Ok(())
}
