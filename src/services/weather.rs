// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current-weather client (open-meteo).

use crate::error::AppError;
use crate::models::{Coordinates, WeatherData};
use crate::services::enrichment::embedded_error;
use serde::Deserialize;
use serde_json::Value;

/// Weather API client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch current weather at a coordinate.
    ///
    /// GET {base}/v1/forecast?latitude=..&longitude=..&current_weather=true
    pub async fn current(&self, coords: Coordinates) -> Result<WeatherData, AppError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.lat.to_string()),
                ("longitude", coords.lng.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Weather(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                tracing::warn!("Weather API rate limit hit (429)");
            }
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Weather(format!(
                "Problem with weather API response: HTTP {}: {}",
                status, body
            )));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::Weather(format!("JSON parse error: {}", e)))?;

        body.into_weather()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: u16,
    windspeed: f64,
}

impl ForecastResponse {
    fn into_weather(self) -> Result<WeatherData, AppError> {
        if let Some(err) = embedded_error(self.error.as_ref()) {
            // open-meteo sends `"error": true` with the message in `reason`
            let detail = self.reason.unwrap_or(err);
            return Err(AppError::Weather(format!("Weather data error: {}", detail)));
        }

        let current = self.current_weather.ok_or_else(|| {
            AppError::Weather("Response has no current_weather block".to_string())
        })?;

        Ok(WeatherData {
            temperature: current.temperature,
            weathercode: current.weathercode,
            windspeed: current.windspeed,
        })
    }
}
