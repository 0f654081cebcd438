//! # API Error Types
//!
//! Unified error handling for the GraphQL API layer.

use async_graphql::{Error as GraphQLError, ErrorExtensions};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use inkline_persistence::{FetchError, PersistenceError};

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid UUID format: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::InvalidUuid(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for GraphQL extensions
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidUuid(_) => "INVALID_UUID",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Collapse a retried lookup's outcome into an API error.
    ///
    /// An exhausted retry budget surfaces as NOT_FOUND: the record either
    /// does not exist or is not replicated yet, and callers must treat both
    /// as "unavailable now".
    pub fn from_fetch(
        entity_type: &str,
        id: impl std::fmt::Display,
        err: FetchError<PersistenceError>,
    ) -> Self {
        match err {
            FetchError::NotFound { attempts } => {
                tracing::debug!(entity_type, %id, attempts, "Lookup budget exhausted");
                Self::NotFound {
                    entity_type: entity_type.to_string(),
                    id: id.to_string(),
                }
            }
            FetchError::Lookup(e) => Self::Persistence(e),
            FetchError::InvalidPolicy => {
                Self::Internal("invalid read retry policy".to_string())
            }
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> GraphQLError {
        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.error_code());
            e.set("status", self.status_code().as_u16());

            if let Self::NotFound { entity_type, id } = self {
                e.set("entity_type", entity_type.as_str());
                e.set("entity_id", id.as_str());
            }
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_retry_budget_maps_to_not_found() {
        let err = ApiError::from_fetch(
            "user_profile",
            "abc",
            FetchError::<PersistenceError>::NotFound { attempts: 3 },
        );

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn lookup_failure_passes_through_as_persistence_error() {
        let err = ApiError::from_fetch(
            "artist",
            "abc",
            FetchError::Lookup(PersistenceError::Scylla("permission denied".to_string())),
        );

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "PERSISTENCE_ERROR");
    }
}
