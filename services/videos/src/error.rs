//! Error taxonomy and the uniform error envelope
//!
//! Every failure leaving the service, whether raised by the domain layer or
//! by request decoding, is rendered as the same JSON envelope: an `errors`
//! array holding exactly one entry per failure, each entry carrying a fresh
//! correlation id, the offending entity or field, the HTTP status, and the
//! request path. Internals of unexpected failures are logged and never
//! serialized.

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Failures raised by the video service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A field value violates its constraints
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// The referenced record, title, or filter result does not exist
    #[error("{message}")]
    NotFound {
        entity: &'static str,
        message: &'static str,
    },

    /// A request part could not be decoded into the expected type
    #[error("{message}")]
    TypeMismatch { field: String, message: String },

    /// Anything else; detail is logged, never returned to the caller
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Type alias for service results
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A service failure tied to the request path it occurred on
#[derive(Debug)]
pub struct ApiError {
    pub error: ServiceError,
    pub path: String,
}

impl ApiError {
    /// Attach the request path to a service failure
    pub fn new(error: ServiceError, uri: &Uri) -> Self {
        Self {
            error,
            path: uri.path().to_string(),
        }
    }

    /// Render the failure as a status code and error envelope.
    ///
    /// Unexpected failures are logged here with full detail; the envelope
    /// only ever carries the generic message.
    pub fn into_envelope(self) -> (StatusCode, ErrorEnvelope) {
        let (status, entity_name, message) = match self.error {
            ServiceError::Validation { field, message } => {
                (StatusCode::BAD_REQUEST, field.to_string(), message.to_string())
            }
            ServiceError::NotFound { entity, message } => {
                (StatusCode::NOT_FOUND, entity.to_string(), message.to_string())
            }
            ServiceError::TypeMismatch { field, message } => {
                (StatusCode::BAD_REQUEST, field, message)
            }
            ServiceError::Unexpected(source) => {
                tracing::error!("Unexpected service failure: {:#}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "video".to_string(),
                    "Unexpected Video Service Error".to_string(),
                )
            }
        };

        let info = ExceptionInfo {
            correlation_id: Uuid::new_v4(),
            entity_name,
            code: status.as_u16(),
            status: status_label(status),
            message,
            timestamp: Utc::now(),
            path: self.path,
        };

        (status, ErrorEnvelope { errors: vec![info] })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = self.into_envelope();
        (status, Json(envelope)).into_response()
    }
}

/// One reported failure inside the error envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionInfo {
    pub correlation_id: Uuid,
    pub entity_name: String,
    pub code: u16,
    pub status: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub path: String,
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ExceptionInfo>,
}

fn status_label(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        _ => "INTERNAL_SERVER_ERROR",
    }
}
