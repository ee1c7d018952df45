// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Geocoding error: {0}")]
    Geocode(String),

    #[error("Weather API error: {0}")]
    Weather(String),

    #[error("Storage error: {0}")]
    Persistence(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// One-line message shown to the user when numeric inputs are rejected.
    pub const INVALID_INPUTS: &'static str = "Inputs have to be positive numbers!";

    /// One-line message shown to the user when a lookup API fails.
    ///
    /// Both lookup services are free tier and throttle aggressively, so the
    /// usual remedy is simply to submit again.
    pub const LOOKUP_RETRY: &'static str =
        "It's a free third party API with a request-per-second limit, so try it again.";

    /// Whether this error came from one of the enrichment lookups.
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, AppError::Geocode(_) | AppError::Weather(_))
    }
}

impl From<crate::store::StorageError> for AppError {
    fn from(err: crate::store::StorageError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(msg) => {
                tracing::debug!(reason = %msg, "Rejected workout input");
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    Some(AppError::INVALID_INPUTS.to_string()),
                )
            }
            AppError::Geocode(msg) => {
                tracing::warn!(error = %msg, "Geocoding lookup failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "geocode_error",
                    Some(AppError::LOOKUP_RETRY.to_string()),
                )
            }
            AppError::Weather(msg) => {
                tracing::warn!(error = %msg, "Weather lookup failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "weather_error",
                    Some(AppError::LOOKUP_RETRY.to_string()),
                )
            }
            AppError::Persistence(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::ConfirmationRequired(msg) => (
                StatusCode::CONFLICT,
                "confirmation_required",
                Some(msg.clone()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
