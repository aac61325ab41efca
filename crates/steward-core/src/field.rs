// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Field descriptor model.
//!
//! A [`FieldDescriptor`] is the uniform, backend-agnostic description of one
//! entity attribute. Descriptors are built once at registration time and
//! treated as immutable afterward; special behavior (primary key, password,
//! upload) is computed during construction rather than looked up at
//! use-sites.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// StorageType
// =============================================================================

/// The semantic storage type of an entity attribute.
///
/// All three backends map their native type metadata onto this enum, which
/// is what keeps widget mapping backend-symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Character data of any length
    Text,
    /// Integral number
    Integer,
    /// Decimal / floating point number
    Decimal,
    /// Boolean flag
    Boolean,
    /// Calendar date without time
    Date,
    /// Date and time
    DateTime,
    /// Closed set of named constants
    Enum,
    /// Binary large object
    Binary,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageType::Text => "text",
            StorageType::Integer => "integer",
            StorageType::Decimal => "decimal",
            StorageType::Boolean => "boolean",
            StorageType::Date => "date",
            StorageType::DateTime => "datetime",
            StorageType::Enum => "enum",
            StorageType::Binary => "binary",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Name Lexicons
// =============================================================================

/// Field names conventionally holding a password, matched case-insensitively.
const PASSWORD_LEXICON: &[&str] = &["password", "passwd", "pass", "pwd"];

/// Field names conventionally holding bookkeeping timestamps. These order
/// last in the built descriptor list.
const TIMESTAMP_LEXICON: &[&str] = &["created", "created_at", "modified", "updated", "updated_at"];

/// Returns `true` if the field name matches the password lexicon.
pub fn is_password_name(name: &str) -> bool {
    PASSWORD_LEXICON.contains(&name.to_ascii_lowercase().as_str())
}

/// Returns `true` if the field name matches the created/modified lexicon.
pub fn is_timestamp_name(name: &str) -> bool {
    TIMESTAMP_LEXICON.contains(&name.to_ascii_lowercase().as_str())
}

// =============================================================================
// UploadSpec
// =============================================================================

/// Upload behavior for a file-marked field.
///
/// When `storage_dir` is set, uploaded file parts are persisted there and
/// the field value becomes the stored path. Without a directory the raw
/// bytes are captured in-memory instead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadSpec {
    /// Directory uploaded files are persisted under.
    pub storage_dir: Option<PathBuf>,
}

impl UploadSpec {
    /// Creates a spec that captures uploads in memory.
    pub fn in_memory() -> Self {
        Self { storage_dir: None }
    }

    /// Creates a spec that persists uploads under the given directory.
    pub fn to_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: Some(dir.into()),
        }
    }
}

// =============================================================================
// FieldDescriptor
// =============================================================================

/// Uniform metadata describing one entity attribute.
///
/// # Examples
///
/// ```
/// use steward_core::field::{FieldDescriptor, StorageType};
///
/// let field = FieldDescriptor::new("name", StorageType::Text);
/// assert!(!field.primary_key);
/// assert!(!field.password);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Attribute name as declared by the backend.
    pub name: String,
    /// Semantic storage type.
    pub storage_type: StorageType,
    /// Whether this field is the entity's primary key.
    pub primary_key: bool,
    /// Whether submitted values must be one-way hashed before storage.
    pub password: bool,
    /// Upload behavior, present only for file-marked fields.
    pub upload: Option<UploadSpec>,
    /// Ordered constant names, present only for enum fields.
    pub enum_values: Option<Vec<String>>,
    /// Whether the field is excluded from generated forms.
    pub read_only: bool,
}

impl FieldDescriptor {
    /// Creates a plain descriptor with no markers set.
    pub fn new(name: impl Into<String>, storage_type: StorageType) -> Self {
        Self {
            name: name.into(),
            storage_type,
            primary_key: false,
            password: false,
            upload: None,
            enum_values: None,
            read_only: false,
        }
    }

    /// Marks this field as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks this field as a password field.
    pub fn password(mut self) -> Self {
        self.password = true;
        self
    }

    /// Marks this field as a file upload.
    pub fn upload(mut self, spec: UploadSpec) -> Self {
        self.upload = Some(spec);
        self
    }

    /// Attaches enum constant names, in declaration order.
    pub fn enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Marks this field read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Returns `true` if this field is a file upload.
    #[inline]
    pub fn is_upload(&self) -> bool {
        self.upload.is_some()
    }

    /// Returns `true` if this field orders last by naming convention.
    #[inline]
    pub fn is_timestamp(&self) -> bool {
        is_timestamp_name(&self.name)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_lexicon() {
        assert!(is_password_name("password"));
        assert!(is_password_name("Passwd"));
        assert!(is_password_name("PWD"));
        assert!(!is_password_name("passphrase"));
        assert!(!is_password_name("username"));
    }

    #[test]
    fn test_timestamp_lexicon() {
        assert!(is_timestamp_name("created"));
        assert!(is_timestamp_name("created_at"));
        assert!(is_timestamp_name("Modified"));
        assert!(!is_timestamp_name("creator"));
    }

    #[test]
    fn test_builder_markers() {
        let field = FieldDescriptor::new("avatar", StorageType::Binary)
            .upload(UploadSpec::to_dir("/tmp/uploads"));
        assert!(field.is_upload());
        assert_eq!(
            field.upload.unwrap().storage_dir,
            Some(PathBuf::from("/tmp/uploads"))
        );

        let pk = FieldDescriptor::new("id", StorageType::Integer).primary_key();
        assert!(pk.primary_key);
    }

    #[test]
    fn test_storage_type_display() {
        assert_eq!(StorageType::Text.to_string(), "text");
        assert_eq!(StorageType::DateTime.to_string(), "datetime");
    }
}
