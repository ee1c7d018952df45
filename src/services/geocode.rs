// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reverse geocoding client (geocode.xyz).

use crate::error::AppError;
use crate::models::{Coordinates, LocationData};
use crate::services::enrichment::{embedded_error, non_empty_str};
use serde::Deserialize;
use serde_json::Value;

/// Reverse geocoding API client.
#[derive(Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    auth: Option<String>,
}

impl GeocodeClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, auth: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            auth,
        }
    }

    /// Look up the city, country, and timezone of a coordinate.
    ///
    /// GET {base}/{lat},{lng}?geoit=json
    pub async fn reverse(&self, coords: Coordinates) -> Result<LocationData, AppError> {
        let url = format!("{}/{},{}", self.base_url, coords.lat, coords.lng);

        let mut query = vec![("geoit", "json")];
        if let Some(auth) = self.auth.as_deref() {
            query.push(("auth", auth));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Geocode(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                tracing::warn!("Geocoding rate limit hit (429)");
            }
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Geocode(format!(
                "Problem with geocoding: HTTP {}: {}",
                status, body
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| AppError::Geocode(format!("JSON parse error: {}", e)))?;

        body.into_location()
    }
}

/// Subset of the geocode.xyz response we use.
///
/// Fields are loosely typed: the API answers `{}` instead of a string for
/// places it cannot name, and reports errors as an object.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    city: Option<Value>,
    #[serde(default)]
    country: Option<Value>,
    #[serde(default)]
    timezone: Option<Value>,
}

impl GeocodeResponse {
    fn into_location(self) -> Result<LocationData, AppError> {
        if let Some(err) = embedded_error(self.error.as_ref()) {
            return Err(AppError::Geocode(format!("Geocoding error: {}", err)));
        }

        match (non_empty_str(&self.city), non_empty_str(&self.country)) {
            (Some(city), Some(country)) => Ok(LocationData {
                city,
                country,
                timezone: non_empty_str(&self.timezone),
            }),
            _ => Err(AppError::Geocode(
                "City or country information not found in the response".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<LocationData, AppError> {
        serde_json::from_str::<GeocodeResponse>(json)
            .unwrap()
            .into_location()
    }

    #[test]
    fn test_full_response() {
        let location = parse(
            r#"{"city":"London","country":"United Kingdom","timezone":"Europe/London","latt":"51.5"}"#,
        )
        .unwrap();
        assert_eq!(location.city, "London");
        assert_eq!(location.timezone.as_deref(), Some("Europe/London"));
    }

    #[test]
    fn test_missing_city_is_an_error() {
        assert!(matches!(
            parse(r#"{"country":"UK"}"#),
            Err(AppError::Geocode(_))
        ));
        assert!(parse(r#"{"city":{},"country":"UK"}"#).is_err());
        assert!(parse(r#"{"city":"  ","country":"UK"}"#).is_err());
    }

    #[test]
    fn test_embedded_error_wins() {
        let err = parse(
            r#"{"city":"London","country":"UK","error":{"code":"006","description":"Request Throttled."}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Request Throttled."));
    }

    #[test]
    fn test_timezone_is_optional() {
        let location = parse(r#"{"city":"Nowhere","country":"Atlantis","timezone":{}}"#).unwrap();
        assert_eq!(location.timezone, None);
    }
}
