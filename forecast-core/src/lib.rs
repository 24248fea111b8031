//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Classification tables (Beaufort, precipitation intensity, WMO codes)
//! - The hourly and current-conditions transformation pipeline
//! - Fixed-width table rendering
//! - Open-Meteo and Nominatim clients, plus on-disk configuration
//!
//! The transformation and rendering modules are pure; only `provider`,
//! `geocode` and `config` perform I/O.

pub mod config;
pub mod current;
pub mod error;
pub mod geocode;
pub mod hourly;
pub mod model;
pub mod provider;
pub mod render;
pub mod scale;

pub use config::Config;
pub use current::transform_current;
pub use error::TransformError;
pub use geocode::NominatimGeocoder;
pub use hourly::transform_hourly;
pub use model::{
    Coordinates, CurrentWeather, FormattedRow, LocationContext, RawCurrent, RawForecast,
    RawHourly,
};
pub use provider::{ForecastProvider, provider_from_config};
pub use render::{render, summary};
pub use scale::{beaufort, describe, precipitation_intensity};
