use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather API returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("Malformed weather payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unexpected health check result: {0}")]
    Health(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", self),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
