use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::vacancy::templates::{EditorError, TemplateId, TemplateStoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Template(EditorError),
    TemplateNotFound(TemplateId),
    RecordFormat(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Template(err) => write!(f, "template error: {}", err),
            AppError::TemplateNotFound(id) => write!(f, "template '{}' not found", id),
            AppError::RecordFormat(err) => write!(f, "invalid vacancy record: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Template(err) => Some(err),
            AppError::TemplateNotFound(_) => None,
            AppError::RecordFormat(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Template(EditorError::Store(TemplateStoreError::CapacityExceeded {
                ..
            })) => StatusCode::CONFLICT,
            AppError::Template(EditorError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template(_) | AppError::RecordFormat(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<EditorError> for AppError {
    fn from(value: EditorError) -> Self {
        Self::Template(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::RecordFormat(value)
    }
}
