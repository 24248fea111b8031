//! Reverse geocoding through Nominatim (OpenStreetMap).

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::Coordinates;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Address parts Nominatim returns under `address`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub suburb: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<Address>,
}

fn non_empty(part: &Option<String>) -> Option<&str> {
    part.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// "place, state, country" with whatever parts are available.
///
/// The place is the most specific settlement name present. Without one
/// there is nothing meaningful to show.
pub fn place_label(address: &Address) -> Option<String> {
    let place = [
        &address.city,
        &address.town,
        &address.village,
        &address.hamlet,
        &address.suburb,
        &address.municipality,
    ]
    .into_iter()
    .find_map(non_empty)?;

    let label = match (non_empty(&address.state), non_empty(&address.country)) {
        (Some(state), Some(country)) => format!("{place}, {state}, {country}"),
        (_, Some(country)) => format!("{place}, {country}"),
        _ => place.to_string(),
    };

    Some(label)
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
}

impl NominatimGeocoder {
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub fn new(user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()
            .context("Failed to create geocoding client")?;

        Ok(Self { http })
    }

    /// Place label for the coordinates, `None` when nothing is there.
    pub async fn place_name(&self, coordinates: Coordinates) -> Result<Option<String>> {
        tracing::debug!(%coordinates, "reverse geocoding");

        let res = self
            .http
            .get(NOMINATIM_URL)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("format", "jsonv2".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Nominatim")?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("Nominatim request failed with status {status}"));
        }

        let parsed: NominatimResponse = res
            .json()
            .await
            .context("Failed to parse Nominatim response JSON")?;

        Ok(parsed.address.as_ref().and_then(place_label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(json: &str) -> Address {
        serde_json::from_str(json).expect("valid address JSON")
    }

    #[test]
    fn full_label_with_state_and_country() {
        let addr = address(
            r#"{"city": "Amsterdam", "state": "North Holland", "country": "Netherlands", "postcode": "1012"}"#,
        );
        assert_eq!(
            place_label(&addr).as_deref(),
            Some("Amsterdam, North Holland, Netherlands")
        );
    }

    #[test]
    fn town_wins_over_suburb() {
        let addr = address(r#"{"suburb": "Centrum", "town": "Zaandam", "country": "Netherlands"}"#);
        assert_eq!(place_label(&addr).as_deref(), Some("Zaandam, Netherlands"));
    }

    #[test]
    fn blank_parts_are_skipped() {
        let addr = address(r#"{"city": "  ", "village": "Giethoorn"}"#);
        assert_eq!(place_label(&addr).as_deref(), Some("Giethoorn"));
    }

    #[test]
    fn state_without_country_is_dropped() {
        let addr = address(r#"{"hamlet": "Eext", "state": "Drenthe"}"#);
        assert_eq!(place_label(&addr).as_deref(), Some("Eext"));
    }

    #[test]
    fn no_place_means_no_label() {
        let addr = address(r#"{"state": "Atlantic", "country": "Ocean"}"#);
        assert_eq!(place_label(&addr), None);
    }

    #[test]
    fn response_without_address_parses() {
        let parsed: NominatimResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).expect("valid JSON");
        assert!(parsed.address.is_none());
    }
}
