// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory holding the workout snapshot
    pub data_dir: PathBuf,
    /// Reverse geocoding API base URL (geocode.xyz)
    pub geocode_base_url: String,
    /// Optional geocode.xyz auth key; anonymous requests are heavily throttled
    pub geocode_auth: Option<String>,
    /// Weather API base URL (open-meteo)
    pub weather_base_url: String,
    /// Timeout applied to each outbound lookup request
    pub http_timeout: Duration,
    /// Zoom level used when centering the map
    pub map_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: PathBuf::from("data"),
            geocode_base_url: "https://geocode.xyz".to_string(),
            geocode_auth: None,
            weather_base_url: "https://api.open-meteo.com".to_string(),
            http_timeout: Duration::from_secs(10),
            map_zoom: 13,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default, so a bare environment yields a working
    /// local setup against the public lookup APIs.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            geocode_base_url: env::var("GEOCODE_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.geocode_base_url),
            geocode_auth: env::var("GEOCODE_AUTH")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            weather_base_url: env::var("WEATHER_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.weather_base_url),
            http_timeout: parse_var("HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            map_zoom: parse_var("MAP_ZOOM")?.unwrap_or(defaults.map_zoom),
        })
    }

    /// Config for tests: a short timeout and placeholder upstream URLs.
    pub fn test_default() -> Self {
        Self {
            data_dir: env::temp_dir().join("workout-mapper-test"),
            geocode_base_url: "http://127.0.0.1:9".to_string(),
            weather_base_url: "http://127.0.0.1:9".to_string(),
            http_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }
}

/// Parse an optional environment variable, rejecting malformed values.
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
