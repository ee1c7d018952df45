// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payloads returned by the geocoding and weather lookups.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Where a workout happened, as reported by reverse geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LocationData {
    pub city: String,
    pub country: String,
    /// IANA timezone name (e.g. "Europe/London"), if the geocoder knew it
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Current weather at the workout location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherData {
    /// Air temperature in °C
    pub temperature: f64,
    /// WMO weather interpretation code
    pub weathercode: u16,
    /// Wind speed in km/h
    pub windspeed: f64,
}
