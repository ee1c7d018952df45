// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod controller;
pub mod enrichment;
pub mod geocode;
pub mod presentation;
pub mod weather;

pub use controller::{create_workout, WorkoutController};
pub use enrichment::{Enrichment, GeoEnricher};
pub use geocode::GeocodeClient;
pub use presentation::{ListView, MapView, Marker, WorkoutListItem};
pub use weather::WeatherClient;
