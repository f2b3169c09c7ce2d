//! JSON error responses for the HTTP surface

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::common::{AuthError, CoreError};

/// Error returned by route handlers
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    Auth(AuthError),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err {
                CoreError::NotFound(_) | CoreError::InvalidToken => StatusCode::NOT_FOUND,
                CoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CoreError::AllocationConflict(_) | CoreError::SequenceExhausted(_) => {
                    StatusCode::CONFLICT
                }
                CoreError::PolicyNotFound(_)
                | CoreError::Storage(_)
                | CoreError::Database(_)
                | CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(err) => match err {
                AuthError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
                AuthError::SuperadminRequired => StatusCode::FORBIDDEN,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Core(err) => err.kind(),
            ApiError::Auth(AuthError::AuthenticationRequired) => "unauthorized",
            ApiError::Auth(AuthError::SuperadminRequired) => "forbidden",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Core(err) => err.public_message(),
            ApiError::Auth(err) => err.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            if let ApiError::Core(err) = &self {
                error!(kind = err.kind(), error = %err, "Request failed");
            }
        }

        let body = ErrorBody {
            success: false,
            kind: self.kind(),
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}
