/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("prayer times unavailable from both providers")]
    PrayerTimesUnavailable,
    #[error("weather unavailable: {0}")]
    WeatherUnavailable(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The string shown to users of the dashboard. Provider details stay in
    /// the logs and the structured response body.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::LocationUnavailable(_) => {
                "Could not access your location. Please select a city manually."
            }
            ApiError::PrayerTimesUnavailable => {
                "Failed to fetch prayer times. Please try again later."
            }
            ApiError::WeatherUnavailable(_) => {
                "Failed to fetch weather data. Please try again later."
            }
            _ => "Failed to fetch data. Please try again later.",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Upstream(e) => {
                let code = match e.status().map(|s| s.as_u16()) {
                    Some(403) => "UPSTREAM_403",
                    Some(404) => "UPSTREAM_404",
                    Some(429) => "UPSTREAM_429",
                    Some(500..=599) => "UPSTREAM_5XX",
                    _ => "UPSTREAM_ERROR",
                };
                (StatusCode::BAD_GATEWAY, code)
            }
            ApiError::LocationUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "LOCATION_UNAVAILABLE")
            }
            ApiError::PrayerTimesUnavailable => {
                (StatusCode::BAD_GATEWAY, "PRAYER_TIMES_UNAVAILABLE")
            }
            ApiError::WeatherUnavailable(_) => (StatusCode::BAD_GATEWAY, "WEATHER_UNAVAILABLE"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
