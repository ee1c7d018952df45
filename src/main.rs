// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Mapper API Server
//!
//! Logs workouts clicked on a map, enriched with location and weather data.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_mapper::{
    config::Config,
    services::{GeoEnricher, WorkoutController},
    store::{FileStorage, WorkoutStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout Mapper API");

    // Rehydrate workouts from the data directory
    let storage = FileStorage::open(&config.data_dir)?;
    let store = WorkoutStore::open(Box::new(storage));
    let controller = WorkoutController::new(store, config.map_zoom);

    let enricher = GeoEnricher::from_config(&config)?;
    tracing::info!(
        geocode = %config.geocode_base_url,
        weather = %config.weather_base_url,
        "Lookup clients initialized"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), enricher, controller));

    // Build router
    let app = workout_mapper::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_mapper=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
