use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use dashboard_core::DomainError;

use crate::response::ApiResponse;

pub const SERVER_UNREACHABLE: &str =
    "Failed to connect to the server. Please ensure the API server is running.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Gone: {0}")]
    Gone(String),

    /// The remote service answered, but not with success.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The remote service could not be reached.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::Validation(_) => ApiError::Validation(message),
            DomainError::InvalidCredentials => ApiError::Unauthorized(message),
            DomainError::Forbidden => ApiError::Forbidden(message),
            DomainError::ProductNotFound(_) => ApiError::NotFound(message),
            DomainError::MutationInFlight(_) => ApiError::Conflict(message),
            DomainError::ConfirmationRequired => ApiError::ConfirmationRequired(message),
            DomainError::ViewDisposed => ApiError::Gone(message),
            DomainError::Rejected { .. } | DomainError::Decode(_) => ApiError::Upstream(message),
            DomainError::Transport(_) => ApiError::Unavailable(message),
        }
    }
}

impl ApiError {
    /// Replaces the detail of remote failures with a user-facing notice;
    /// every other error keeps its own message.
    pub fn with_notice(err: DomainError, notice: &str) -> Self {
        match err {
            DomainError::Transport(_) => {
                tracing::warn!("{} ({})", notice, err);
                ApiError::Unavailable(notice.to_string())
            }
            DomainError::Rejected { .. } | DomainError::Decode(_) => {
                tracing::warn!("{} ({})", notice, err);
                ApiError::Upstream(notice.to_string())
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            },
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
            },
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg)
            },
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            },
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "MUTATION_IN_FLIGHT", msg)
            },
            ApiError::ConfirmationRequired(msg) => {
                (StatusCode::PRECONDITION_REQUIRED, "CONFIRMATION_REQUIRED", msg)
            },
            ApiError::Gone(msg) => {
                tracing::debug!("Gone: {}", msg);
                (StatusCode::GONE, "VIEW_DISPOSED", msg)
            },
            ApiError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg)
            },
            ApiError::Unavailable(msg) => {
                tracing::error!("Upstream unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE", msg)
            },
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            },
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}
