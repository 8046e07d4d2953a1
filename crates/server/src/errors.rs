use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use models::errors::ModelError;
use service::errors::ServiceError;

/// Every failure a land parcel handler can answer with.
///
/// Only `NotFound` carries a body (the service's message as plain text);
/// details of the other variants are logged and never sent to the client.
#[derive(Debug, Error)]
pub enum ParcelApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ParcelApiError {
    /// Keep `NotFound` as is and map anything else with `otherwise`.
    pub fn not_found_or(e: ServiceError, otherwise: fn(String) -> Self) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            other => otherwise(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ParcelApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ParcelApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ModelError> for ParcelApiError {
    fn from(e: ModelError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl IntoResponse for ParcelApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFound(msg) => (status, msg).into_response(),
            Self::BadRequest(detail) => {
                warn!(%detail, "land parcel request rejected");
                status.into_response()
            }
            Self::Internal(detail) => {
                error!(%detail, "land parcel request failed");
                status.into_response()
            }
        }
    }
}
