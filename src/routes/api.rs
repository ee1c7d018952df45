// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API for creating, listing, editing, and deleting workouts.

use crate::error::Result;
use crate::models::{Coordinates, WorkoutEdit, WorkoutRecord, WorkoutSubmission};
use crate::services::{create_workout, MapView, Marker, WorkoutListItem};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts).post(create).delete(delete_all),
        )
        .route("/api/workouts/sort", post(sort_workouts))
        .route("/api/workouts/reload", post(reload_workouts))
        .route("/api/workouts/edit", post(submit_edit))
        .route("/api/workouts/{id}", get(get_workout).delete(delete_workout))
        .route("/api/workouts/{id}/edit", get(begin_edit))
        .route("/api/workouts/{id}/focus", post(focus_workout))
        .route("/api/markers", get(list_markers))
        .route("/api/map", get(map_view))
}

// ─── Listing ─────────────────────────────────────────────────

/// Workouts in the currently selected ordering.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutListItem>> {
    Json(state.controller.lock().await.list())
}

async fn sort_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutListItem>> {
    Json(state.controller.lock().await.sort_toggle())
}

async fn reload_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutListItem>> {
    Json(state.controller.lock().await.reload())
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutRecord>> {
    let controller = state.controller.lock().await;
    Ok(Json(controller.find(&id)?.clone()))
}

// ─── Creation ────────────────────────────────────────────────

/// Create a workout from a map click and the create form.
///
/// Runs the geocode and weather lookups before anything is stored; if either
/// fails nothing is stored. A body that does not parse (say, an empty
/// distance field) is a validation error like any other bad input.
async fn create(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<WorkoutSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutRecord>)> {
    let Json(submission) = payload?;
    let record = create_workout(&state.controller, &state.enricher, &submission).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// ─── Editing ─────────────────────────────────────────────────

/// Open the edit form for a workout, returning its current values.
async fn begin_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutEdit>> {
    Ok(Json(state.controller.lock().await.begin_edit(&id)?))
}

/// Submit the open edit form.
async fn submit_edit(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<WorkoutEdit>, JsonRejection>,
) -> Result<Json<Vec<WorkoutListItem>>> {
    let Json(edit) = payload?;
    Ok(Json(state.controller.lock().await.submit_edit(&edit)?))
}

// ─── Deletion ────────────────────────────────────────────────

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<WorkoutListItem>>> {
    Ok(Json(state.controller.lock().await.delete(&id)?))
}

#[derive(Deserialize)]
struct DeleteAllQuery {
    #[serde(default)]
    confirm: bool,
}

/// Delete every workout. Requires `?confirm=true`.
async fn delete_all(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteAllQuery>,
) -> Result<Json<Vec<WorkoutListItem>>> {
    Ok(Json(
        state.controller.lock().await.delete_all(query.confirm)?,
    ))
}

// ─── Map ─────────────────────────────────────────────────────

async fn list_markers(State(state): State<Arc<AppState>>) -> Json<Vec<Marker>> {
    Json(state.controller.lock().await.markers())
}

async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MapView>> {
    Ok(Json(state.controller.lock().await.focus(&id)?))
}

#[derive(Deserialize)]
struct MapQuery {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Initial map view. Without a client position there is no map center.
async fn map_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Json<MapView> {
    let position = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        _ => None,
    };
    Json(state.controller.lock().await.map_view(position))
}
