// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model and the inputs used to create or edit one.

use crate::error::{AppError, Result};
use crate::models::{LocationData, WeatherData};
use crate::time_utils::localize;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of trailing timestamp digits kept for a workout ID.
const ID_DIGITS: usize = 10;

/// Kind of activity.
///
/// Serialized lowercase; parsing accepts any case, as typed in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WorkoutKind {
    Running,
    Walking,
}

/// Display metadata for a workout kind.
#[derive(Debug)]
pub struct KindMeta {
    /// Lowercase label, also used for CSS classes
    pub label: &'static str,
    /// Capitalized label used in descriptions
    pub title: &'static str,
    pub emoji: &'static str,
}

/// Indexed by `WorkoutKind as usize`.
static KIND_TABLE: [KindMeta; 2] = [
    KindMeta {
        label: "running",
        title: "Running",
        emoji: "🏃🏻‍♂️",
    },
    KindMeta {
        label: "walking",
        title: "Walking",
        emoji: "🚶🏻‍♂️",
    },
];

impl WorkoutKind {
    pub fn meta(self) -> &'static KindMeta {
        &KIND_TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.meta().label
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkoutKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "walking" => Ok(WorkoutKind::Walking),
            other => Err(AppError::BadRequest(format!(
                "Unknown workout type: {}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for WorkoutKind {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A map coordinate, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether this is a real point on the globe.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// User-entered measurements of a workout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutFields {
    /// Distance in km
    pub distance: f64,
    /// Duration in minutes
    pub duration: f64,
    /// Rating out of 10
    pub rating: f64,
}

impl WorkoutFields {
    /// All values must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("distance", self.distance),
            ("duration", self.duration),
            ("rating", self.rating),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::Validation(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Create-form submission: a clicked coordinate plus the form fields.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutSubmission {
    pub kind: WorkoutKind,
    pub lat: f64,
    pub lng: f64,
    #[serde(flatten)]
    pub fields: WorkoutFields,
}

impl WorkoutSubmission {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Check the form before any lookup is attempted.
    pub fn validate(&self) -> Result<()> {
        self.fields.validate()?;
        if !self.coords().is_valid() {
            return Err(AppError::BadRequest(format!(
                "Invalid coordinate: {}, {}",
                self.lat, self.lng
            )));
        }
        Ok(())
    }
}

/// Contents of the edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutEdit {
    pub kind: WorkoutKind,
    pub distance: f64,
    pub duration: f64,
    pub rating: f64,
}

impl WorkoutEdit {
    pub fn fields(&self) -> WorkoutFields {
        WorkoutFields {
            distance: self.distance,
            duration: self.duration,
            rating: self.rating,
        }
    }
}

/// One logged workout.
///
/// `description` and `local_time` are computed once at construction and are
/// never recomputed, even when the record is edited later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub kind: WorkoutKind,
    pub coords: Coordinates,
    pub distance: f64,
    pub duration: f64,
    pub rating: f64,
    pub location: LocationData,
    pub weather: WeatherData,
    /// e.g. "Running in London, UK on July 1, 2024"
    pub description: String,
    /// Local "HH:MM" at the workout location when the record was created
    pub local_time: String,
    /// Number of times the workout was focused on the map
    #[serde(default)]
    pub clicks: u32,
}

impl WorkoutRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        kind: WorkoutKind,
        coords: Coordinates,
        fields: WorkoutFields,
        location: LocationData,
        weather: WeatherData,
    ) -> Self {
        Self::new_at(kind, coords, fields, location, weather, Utc::now())
    }

    /// Build a record as if created at `now`.
    pub fn new_at(
        kind: WorkoutKind,
        coords: Coordinates,
        fields: WorkoutFields,
        location: LocationData,
        weather: WeatherData,
        now: DateTime<Utc>,
    ) -> Self {
        let local = localize(now, location.timezone.as_deref());
        let description = format!(
            "{} in {}, {} on {} {}, {}",
            kind.meta().title,
            location.city,
            location.country,
            local.format("%B"),
            local.day(),
            local.year()
        );
        let local_time = local.format("%H:%M").to_string();

        Self {
            id: id_from_timestamp(now),
            created_at: now,
            kind,
            coords,
            distance: fields.distance,
            duration: fields.duration,
            rating: fields.rating,
            location,
            weather,
            description,
            local_time,
            clicks: 0,
        }
    }

    /// Current values as an edit form.
    pub fn to_edit(&self) -> WorkoutEdit {
        WorkoutEdit {
            kind: self.kind,
            distance: self.distance,
            duration: self.duration,
            rating: self.rating,
        }
    }

    /// Apply an edit after validating it. The record is untouched on error.
    pub fn apply_edit(&mut self, edit: &WorkoutEdit) -> Result<()> {
        edit.fields().validate()?;
        self.kind = edit.kind;
        self.distance = edit.distance;
        self.duration = edit.duration;
        self.rating = edit.rating;
        Ok(())
    }
}

/// Last `ID_DIGITS` digits of the millisecond timestamp.
fn id_from_timestamp(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().to_string();
    let start = millis.len().saturating_sub(ID_DIGITS);
    millis[start..].to_string()
}
