// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Store adapter error types.
//!
//! Request-time storage failures are propagated to the route controller
//! unmodified; the core never retries.

use steward_core::source::SourceKind;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// StoreError
// =============================================================================

/// A storage-layer failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record exists under the given identifier.
    #[error("No '{entity}' record with id '{id}'")]
    NotFound {
        /// Entity storage name.
        entity: String,
        /// The identifier that missed.
        id: String,
    },

    /// The adapter cannot provide the invoked capability.
    #[error("Operation '{operation}' is not supported by the {kind} adapter")]
    Unsupported {
        /// The invoked operation.
        operation: &'static str,
        /// The adapter's storage paradigm.
        kind: SourceKind,
    },

    /// Driver-level failure underneath the adapter.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Driver message.
        message: String,
    },
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates an unsupported-capability error.
    pub fn unsupported(operation: &'static str, kind: SourceKind) -> Self {
        Self::Unsupported { operation, kind }
    }

    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` for the absent-record case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("widgets", 42);
        assert_eq!(err.to_string(), "No 'widgets' record with id '42'");
        assert!(err.is_not_found());

        let err = StoreError::unsupported("save", SourceKind::ManagedObject);
        assert!(err.to_string().contains("managed_object"));
        assert!(!err.is_not_found());
    }
}
