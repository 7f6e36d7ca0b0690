//! Error types for latencyd.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Per-request failures
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or mistyped request fields
    #[error("{0}")]
    Validation(String),

    /// Unexpected failure during lookup or aggregation
    #[error("{0}")]
    Computation(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ServiceError::Validation(msg) => json!({ "detail": msg }),
            ServiceError::Computation(msg) => json!({ "error": msg }),
        };
        (status, Json(body)).into_response()
    }
}

/// Dataset could not be loaded; the service cannot start
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Config file exists but cannot be used
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(err: ServiceError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_computation_error_body() {
        let (status, body) = body_json(ServiceError::Computation("x".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "x" }));
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, body) = body_json(ServiceError::Validation("bad".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "bad" }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Computation("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_is_bare_message() {
        let err = ServiceError::Validation("Missing required field(s): regions".into());
        assert_eq!(err.to_string(), "Missing required field(s): regions");
    }

    #[test]
    fn test_store_error_names_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/nope/data.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/nope/data.json"));
    }
}
