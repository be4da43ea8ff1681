//! HTTP error handling and response types.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;
use crate::orbital::OrbitalError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Request rejected by an extractor (malformed body or query, body too large)
    Rejected(StatusCode, String),
    /// Internal server error
    Internal(String),
    /// Orbital engine error
    Orbital(OrbitalError),
    /// Reference data error
    Catalog(CatalogError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Rejected(status, _) => *status,
            AppError::Internal(_) | AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Orbital(e) => match e {
                OrbitalError::NotFound(_) => StatusCode::NOT_FOUND,
                OrbitalError::InvalidOrbit(_) | OrbitalError::NonEllipticalOrbit(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                OrbitalError::Cancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
                OrbitalError::InvalidRange(_)
                | OrbitalError::RangeTooLarge(_)
                | OrbitalError::InvalidStep(_)
                | OrbitalError::InvalidSolver(_)
                | OrbitalError::InvalidTimestamp(_)
                | OrbitalError::InvalidResolution(_)
                | OrbitalError::TooManyFrames(_) => StatusCode::BAD_REQUEST,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::Rejected(_, msg) => ApiError::new("INVALID_REQUEST", msg),
            AppError::Internal(msg) => ApiError::new("INTERNAL_ERROR", msg),
            AppError::Orbital(e) => ApiError::new(e.code(), e.to_string()),
            AppError::Catalog(e) => {
                let details = e.context().to_string();
                ApiError::new("CATALOG_ERROR", e.to_string()).with_details(details)
            }
        };

        if status.is_server_error() {
            tracing::error!(code = %error.code, message = %error.message, "Request failed");
        }

        (status, Json(error)).into_response()
    }
}

impl From<OrbitalError> for AppError {
    fn from(err: OrbitalError) -> Self {
        AppError::Orbital(err)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Catalog(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Task join error: {}", err))
    }
}
