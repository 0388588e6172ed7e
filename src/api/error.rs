//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::validation::{PayloadError, Violation, Violations};
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Violations),
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid id")]
    InvalidId,
    /// Lookup by key matched nothing; carries the entity name.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Malformed(reason) => Self::BadRequest(reason),
            PayloadError::Invalid(violations) => Self::Validation(violations),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [Violation]>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(err) if err.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Store details stay in the logs
        let detail = match &self {
            Self::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                if err.is_unavailable() { "Store unavailable".to_string() } else { "Internal server error".to_string() }
            }
            other => other.to_string(),
        };
        let errors = match &self {
            Self::Validation(violations) => Some(violations.as_slice()),
            _ => None,
        };
        (status, Json(ErrorBody { detail, errors })).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
