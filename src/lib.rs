// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Mapper: log runs and walks on a map.
//!
//! This crate provides the backend API for a map-based workout log. Each
//! workout is enriched with its city, country, and current weather, and the
//! whole log is persisted as a single snapshot.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::{GeoEnricher, WorkoutController};
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub enricher: GeoEnricher,
    /// All workout mutations go through this lock, one at a time.
    pub controller: Mutex<WorkoutController>,
}

impl AppState {
    pub fn new(config: Config, enricher: GeoEnricher, controller: WorkoutController) -> Self {
        Self {
            config,
            enricher,
            controller: Mutex::new(controller),
        }
    }
}
