//! Server error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use verdant_core::AccessError;

/// Errors that can occur while running the verdant server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Session tokens cannot be verified with this configuration
    #[error("auth configuration error: {0}")]
    Auth(#[from] crate::auth::AuthError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

/// An authorization failure rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub AccessError);

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AccessError::AuthRequired => StatusCode::UNAUTHORIZED,
            AccessError::FacilityIdRequired => StatusCode::BAD_REQUEST,
            AccessError::FacilityNotFound(_) => StatusCode::NOT_FOUND,
            AccessError::FacilityAccessDenied(_)
            | AccessError::RoleNotAllowed { .. }
            | AccessError::CapabilityNotGranted(_) => StatusCode::FORBIDDEN,
            AccessError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.0.code(), "{}", self.0);
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.0.code(),
                message: self.0.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
