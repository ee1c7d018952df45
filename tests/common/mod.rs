// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use workout_mapper::config::Config;
use workout_mapper::routes::create_router;
use workout_mapper::services::{GeoEnricher, WorkoutController};
use workout_mapper::store::{MemoryStorage, WorkoutStore};
use workout_mapper::AppState;

/// A canned upstream API that counts the requests it receives.
#[allow(dead_code)]
pub struct Upstream {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl Upstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serve `body` with `status` for GET `path` on an ephemeral local port.
#[allow(dead_code)]
pub async fn spawn_upstream(path: &str, status: StatusCode, body: Value) -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        path,
        get(move || {
            let counter = counter.clone();
            let body = body.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        base_url: format!("http://{}", addr),
        hits,
    }
}

#[allow(dead_code)]
pub fn london_geocode() -> Value {
    json!({
        "city": "London",
        "country": "UK",
        "timezone": "Europe/London",
        "latt": "51.50000",
        "longt": "-0.12000"
    })
}

#[allow(dead_code)]
pub fn london_weather() -> Value {
    json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "current_weather": {
            "temperature": 15,
            "weathercode": 2,
            "windspeed": 10,
            "winddirection": 240,
            "time": "2024-07-04T09:00"
        }
    })
}

/// Geocode and weather upstreams answering successfully for London.
#[allow(dead_code)]
pub async fn london_upstreams() -> (Upstream, Upstream) {
    let geocode = spawn_upstream("/{coords}", StatusCode::OK, london_geocode()).await;
    let weather = spawn_upstream("/v1/forecast", StatusCode::OK, london_weather()).await;
    (geocode, weather)
}

/// Create a test app backed by in-memory storage and the given upstreams.
/// Returns the router, the shared state, and the storage handle.
#[allow(dead_code)]
pub fn create_test_app(
    geocode: &Upstream,
    weather: &Upstream,
    storage: MemoryStorage,
) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        geocode_base_url: geocode.base_url.clone(),
        weather_base_url: weather.base_url.clone(),
        ..Config::test_default()
    };
    let enricher = GeoEnricher::from_config(&config).expect("Failed to build enricher");
    let store = WorkoutStore::open(Box::new(storage));
    let controller = WorkoutController::new(store, config.map_zoom);

    let state = Arc::new(AppState::new(config, enricher, controller));
    (create_router(state.clone()), state)
}

/// Create a test app whose lookups point at a closed port.
#[allow(dead_code)]
pub fn create_offline_test_app(storage: MemoryStorage) -> (axum::Router, Arc<AppState>) {
    let closed = Upstream {
        base_url: "http://127.0.0.1:9".to_string(),
        hits: Arc::new(AtomicUsize::new(0)),
    };
    create_test_app(&closed, &closed, storage)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
