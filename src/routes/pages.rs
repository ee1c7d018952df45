// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered HTML fragments.

use crate::services::presentation::render_html;
use crate::AppState;
use axum::{extract::State, response::Html, routing::get, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/workouts.html", get(workout_list))
}

/// The workout sidebar list in its current ordering.
async fn workout_list(State(state): State<Arc<AppState>>) -> Html<String> {
    let items = state.controller.lock().await.list();
    Html(render_html(&items))
}
