// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core error types.
//!
//! Schema errors are configuration-time failures: they abort registration
//! of the offending entity and are never surfaced to request handling.

use thiserror::Error;

/// Result type alias for descriptor construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

// =============================================================================
// SchemaError
// =============================================================================

/// Entity definition could not be turned into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The definition exposes no discoverable primary key.
    #[error("Entity '{entity}' has no discoverable primary key")]
    NoPrimaryKey {
        /// The offending entity name.
        entity: String,
    },

    /// A managed object lacks the persistence-entity marker.
    #[error("Entity '{entity}' is not marked as persistent")]
    NotPersistent {
        /// The offending entity name.
        entity: String,
    },

    /// Two attributes share a name.
    #[error("Entity '{entity}' declares field '{field}' more than once")]
    DuplicateField {
        /// The offending entity name.
        entity: String,
        /// The duplicated field name.
        field: String,
    },
}

impl SchemaError {
    /// Creates a missing-primary-key error.
    pub fn no_primary_key(entity: impl Into<String>) -> Self {
        Self::NoPrimaryKey {
            entity: entity.into(),
        }
    }

    /// Creates a not-persistent error.
    pub fn not_persistent(entity: impl Into<String>) -> Self {
        Self::NotPersistent {
            entity: entity.into(),
        }
    }

    /// Creates a duplicate-field error.
    pub fn duplicate_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            entity: entity.into(),
            field: field.into(),
        }
    }
}

// =============================================================================
// PasswordError
// =============================================================================

/// Password hashing or verification failed.
///
/// Hashing is treated as infallible for correct inputs; these errors only
/// occur on malformed stored hashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// The stored value is not a parseable hash.
    #[error("Stored password hash is malformed: {message}")]
    MalformedHash {
        /// Parser message.
        message: String,
    },

    /// The hashing primitive itself failed.
    #[error("Password hashing failed: {message}")]
    HashingFailed {
        /// Primitive message.
        message: String,
    },
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_messages() {
        let err = SchemaError::no_primary_key("Widget");
        assert_eq!(
            err.to_string(),
            "Entity 'Widget' has no discoverable primary key"
        );

        let err = SchemaError::duplicate_field("Widget", "name");
        assert!(err.to_string().contains("more than once"));
    }
}
