use crate::{
    Config,
    model::{Coordinates, RawForecast},
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// Source of raw forecast bundles for a coordinate pair.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, coordinates: Coordinates) -> anyhow::Result<RawForecast>;
}

/// Construct the forecast provider described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    config.validate()?;

    let boxed: Box<dyn ForecastProvider> =
        Box::new(OpenMeteoProvider::new(config.forecast_days));

    Ok(boxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_from_config_rejects_bad_forecast_days() {
        let cfg = Config {
            forecast_days: 0,
            ..Config::default()
        };

        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("forecast_days"));
    }
}
