// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod lookup;
pub mod workout;

pub use lookup::{LocationData, WeatherData};
pub use workout::{
    Coordinates, KindMeta, WorkoutEdit, WorkoutFields, WorkoutKind, WorkoutRecord,
    WorkoutSubmission,
};
