// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geo-enrichment pipeline.
//!
//! Turns a clicked coordinate into everything a workout record needs:
//! 1. Reverse geocode to city, country, and timezone
//! 2. Fetch current weather (only after step 1 succeeds)
//!
//! Either stage failing aborts the pipeline with no side effects.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, LocationData, WeatherData};
use crate::services::{GeocodeClient, WeatherClient};
use serde_json::Value;

/// Output of a successful enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub location: LocationData,
    pub weather: WeatherData,
}

/// Runs the geocode → weather lookup chain.
#[derive(Clone)]
pub struct GeoEnricher {
    geocode: GeocodeClient,
    weather: WeatherClient,
}

impl GeoEnricher {
    pub fn new(geocode: GeocodeClient, weather: WeatherClient) -> Self {
        Self { geocode, weather }
    }

    /// Build both clients from config, sharing one HTTP connection pool.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("workout-mapper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self::new(
            GeocodeClient::new(
                http.clone(),
                config.geocode_base_url.clone(),
                config.geocode_auth.clone(),
            ),
            WeatherClient::new(http, config.weather_base_url.clone()),
        ))
    }

    /// Look up location and weather for a coordinate.
    pub async fn enrich(&self, coords: Coordinates) -> Result<Enrichment> {
        tracing::info!(lat = coords.lat, lng = coords.lng, "Enriching workout location");

        let location = self.geocode.reverse(coords).await?;
        tracing::debug!(
            city = %location.city,
            country = %location.country,
            timezone = ?location.timezone,
            "Geocoded location"
        );

        let weather = self.weather.current(coords).await?;
        tracing::debug!(
            temperature = weather.temperature,
            weathercode = weather.weathercode,
            "Fetched current weather"
        );

        Ok(Enrichment { location, weather })
    }
}

/// Describe an embedded `error` field, if it signals a failure.
///
/// `null` and `false` mean no error.
pub(crate) fn embedded_error(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => Some(
            map.get("description")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(map.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}

/// A trimmed, non-empty string value.
pub(crate) fn non_empty_str(value: &Option<Value>) -> Option<String> {
    value
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
