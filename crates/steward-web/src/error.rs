// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Admin console error types and HTTP mapping.
//!
//! Configuration-time errors (schema) are fatal for the entity being
//! registered. Request-time errors become redirects or error-annotated
//! re-renders; the server process never crashes on one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use steward_core::error::{PasswordError, SchemaError};
use steward_store::error::StoreError;

/// Result type alias for admin operations.
pub type AdminResult<T> = Result<T, AdminError>;

// =============================================================================
// AdminError
// =============================================================================

/// Admin console error with HTTP response mapping.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Malformed request data, typically a bad path identifier (400).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Unknown entity or record (404).
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// No valid session; the client is sent to the login form.
    #[error("Session required")]
    Unauthenticated {
        /// Absolute path of the login route.
        login_path: String,
    },

    /// Bad credentials. Handled by re-rendering the login form; never
    /// fatal.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message shown on the login form.
        message: String,
    },

    /// Template rendering failed (500).
    #[error("Render error: {message}")]
    Render {
        /// Renderer message.
        message: String,
    },

    /// Entity registration failed.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Storage-layer failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Password primitive failure (500).
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Internal error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message, for logging rather than users.
        message: String,
    },
}

impl AdminError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a session-required error targeting the given login route.
    pub fn unauthenticated(login_path: impl Into<String>) -> Self {
        Self::Unauthenticated {
            login_path: login_path.into(),
        }
    }

    /// Creates a bad-credentials error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation { .. } => StatusCode::BAD_REQUEST,
            AdminError::NotFound { .. } => StatusCode::NOT_FOUND,
            AdminError::Unauthenticated { .. } => StatusCode::SEE_OTHER,
            AdminError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            AdminError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AdminError::Render { .. }
            | AdminError::Schema(_)
            | AdminError::Store(_)
            | AdminError::Password(_)
            | AdminError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        match self {
            // A missing session never renders an error page; it always
            // lands on the login form.
            AdminError::Unauthenticated { login_path } => {
                Redirect::to(&login_path).into_response()
            }
            other => {
                let status = other.status_code();
                let body = format!("{}\n", other);
                (status, body).into_response()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AdminError::validation("bad id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AdminError::not_found("widgets").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AdminError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AdminError::from(StoreError::not_found("widgets", 1)).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_unauthenticated_redirects() {
        let response =
            AdminError::unauthenticated("/admin/login").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/admin/login"
        );
    }

    #[test]
    fn test_server_error_classification() {
        assert!(AdminError::internal("x").is_server_error());
        assert!(!AdminError::validation("x").is_server_error());
        assert!(!AdminError::unauthenticated("/l").is_server_error());
    }
}
