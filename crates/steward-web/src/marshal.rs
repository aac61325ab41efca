// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Data marshaling engine.
//!
//! Converts incoming request fields (form or multipart) into typed storage
//! values per field descriptor. Coercion is deliberately best-effort: a
//! value that fails to parse is omitted from the output map rather than
//! failing the request. The only hard failure is a malformed primary-key
//! path parameter, which surfaces as a validation error.
//!
//! Password-marked fields are one-way hashed before they enter the output
//! map; the raw value is never retained. Upload-marked fields switch to
//! streaming mode: file parts are persisted under the field's storage dir
//! (the value becomes the stored path) or captured as raw bytes when no
//! dir is configured.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use steward_core::field::{FieldDescriptor, StorageType};
use steward_core::password::hash_password;
use steward_core::value::Value;
use steward_core::widget::{map_widget, WidgetType};
use steward_store::adapter::Record;

use crate::error::{AdminError, AdminResult};

// =============================================================================
// Raw Request Fields
// =============================================================================

/// An untyped value as read off the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A form-encoded or multipart text part.
    Text(String),
    /// A multipart file part.
    File {
        /// Client-supplied file name.
        filename: String,
        /// File contents.
        bytes: Vec<u8>,
    },
}

/// One submitted request field.
#[derive(Debug, Clone, PartialEq)]
pub struct RawField {
    /// Field name.
    pub name: String,
    /// Untyped value.
    pub value: RawValue,
}

impl RawField {
    /// Creates a text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: RawValue::Text(value.into()),
        }
    }

    /// Creates a file field.
    pub fn file(name: impl Into<String>, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            value: RawValue::File {
                filename: filename.into(),
                bytes,
            },
        }
    }
}

// =============================================================================
// Marshaling
// =============================================================================

/// Marshals submitted fields into a typed record.
///
/// Later occurrences of a name win, which lets a hidden `off` input pair
/// with its checkbox. Read-only fields and, on the create path, the
/// primary key are skipped.
pub async fn marshal(
    fields: &[FieldDescriptor],
    raw: Vec<RawField>,
    exclude_primary_key: bool,
) -> AdminResult<Record> {
    let mut submitted: HashMap<String, RawValue> = HashMap::new();
    for field in raw {
        submitted.insert(field.name, field.value);
    }

    let mut record = Record::new();
    for field in fields {
        if field.read_only || (exclude_primary_key && field.primary_key) {
            continue;
        }
        let Some(raw_value) = submitted.remove(&field.name) else {
            continue;
        };

        let typed = match raw_value {
            RawValue::Text(text) => coerce_text(field, text)?,
            RawValue::File { filename, bytes } => {
                persist_upload(field, &filename, bytes).await?
            }
        };

        match typed {
            Some(value) => {
                record.insert(field.name.clone(), value);
            }
            None => {
                // Best-effort policy: unparseable input drops the field.
                tracing::debug!(field = %field.name, "Dropped field with uncoercible value");
            }
        }
    }

    Ok(record)
}

/// Coerces a text part by widget type; `None` means the field is omitted.
fn coerce_text(field: &FieldDescriptor, text: String) -> AdminResult<Option<Value>> {
    // Checkbox submissions arrive as on/off; normalize to boolean text
    // before generic coercion.
    let text = match map_widget(field) {
        WidgetType::Checkbox => match text.as_str() {
            "on" => "true".to_string(),
            "off" => "false".to_string(),
            other => other.to_string(),
        },
        _ => text,
    };

    let coerced = match map_widget(field) {
        WidgetType::Number => match field.storage_type {
            StorageType::Integer => text.parse::<i64>().ok().map(Value::Int),
            _ => text.parse::<f64>().ok().map(Value::Float),
        },
        WidgetType::Checkbox => text.parse::<bool>().ok().map(Value::Bool),
        WidgetType::Date => parse_date(&text).map(Value::Date),
        WidgetType::DateTime => parse_datetime(&text).map(Value::DateTime),
        _ => Some(Value::Text(text)),
    };

    if field.password {
        // Hash whatever coerced to text; the plaintext never leaves this
        // scope.
        return match coerced.as_ref().and_then(Value::as_str) {
            Some(plaintext) => Ok(Some(Value::Text(hash_password(plaintext)?))),
            None => Ok(None),
        };
    }

    Ok(coerced)
}

/// Handles a multipart file part for an upload-marked field.
async fn persist_upload(
    field: &FieldDescriptor,
    filename: &str,
    bytes: Vec<u8>,
) -> AdminResult<Option<Value>> {
    let Some(spec) = &field.upload else {
        // A file part on a non-upload field cannot be coerced.
        return Ok(None);
    };

    match &spec.storage_dir {
        Some(dir) => {
            let stored = stored_file_name(filename);
            let path = dir.join(&stored);
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AdminError::internal(format!("upload dir: {}", e)))?;
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|e| AdminError::internal(format!("upload write: {}", e)))?;

            tracing::debug!(field = %field.name, path = %path.display(), size = bytes.len(), "Persisted upload");
            Ok(Some(Value::Text(path.to_string_lossy().into_owned())))
        }
        None => Ok(Some(Value::Bytes(bytes))),
    }
}

/// Prefixes the sanitized client file name with a fresh token so uploads
/// never collide or escape the storage dir.
fn stored_file_name(filename: &str) -> String {
    let safe: String = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    format!("{}-{}", uuid::Uuid::new_v4(), safe)
}

// =============================================================================
// Identifier Parsing
// =============================================================================

/// Parses a primary-key path parameter into a typed key.
///
/// # Errors
///
/// [`AdminError::Validation`] when an integer-keyed entity receives a
/// non-numeric identifier.
pub fn parse_path_id(fields: &[FieldDescriptor], raw: &str) -> AdminResult<Value> {
    let pk = fields
        .iter()
        .find(|f| f.primary_key)
        .ok_or_else(|| AdminError::internal("descriptor without primary key"))?;

    match pk.storage_type {
        StorageType::Integer => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| AdminError::validation(format!("malformed identifier '{}'", raw))),
        _ => Ok(Value::Text(raw.to_string())),
    }
}

// =============================================================================
// Date Parsing
// =============================================================================

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Accepts RFC 3339 plus the HTML `datetime-local` formats, read as UTC.
fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use steward_core::field::UploadSpec;
    use steward_core::password::verify_password;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", StorageType::Integer).primary_key(),
            FieldDescriptor::new("name", StorageType::Text),
            FieldDescriptor::new("count", StorageType::Integer),
            FieldDescriptor::new("ratio", StorageType::Decimal),
            FieldDescriptor::new("is_active", StorageType::Boolean),
            FieldDescriptor::new("born", StorageType::Date),
            FieldDescriptor::new("seen", StorageType::DateTime),
            FieldDescriptor::new("password", StorageType::Text).password(),
        ]
    }

    #[tokio::test]
    async fn test_basic_coercion() {
        let record = marshal(
            &fields(),
            vec![
                RawField::text("name", "widget-1"),
                RawField::text("count", "3"),
                RawField::text("ratio", "0.5"),
                RawField::text("is_active", "on"),
                RawField::text("born", "2024-02-29"),
                RawField::text("seen", "2024-02-29T10:30"),
            ],
            true,
        )
        .await
        .unwrap();

        assert_eq!(record.get("name"), Some(&Value::Text("widget-1".into())));
        assert_eq!(record.get("count"), Some(&Value::Int(3)));
        assert_eq!(record.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(record.get("is_active"), Some(&Value::Bool(true)));
        assert!(matches!(record.get("born"), Some(Value::Date(_))));
        assert!(matches!(record.get("seen"), Some(Value::DateTime(_))));
    }

    #[tokio::test]
    async fn test_primary_key_excluded_on_create() {
        let record = marshal(
            &fields(),
            vec![RawField::text("id", "99"), RawField::text("name", "x")],
            true,
        )
        .await
        .unwrap();
        assert!(!record.contains_key("id"));

        let record = marshal(&fields(), vec![RawField::text("id", "99")], false)
            .await
            .unwrap();
        assert_eq!(record.get("id"), Some(&Value::Int(99)));
    }

    #[tokio::test]
    async fn test_uncoercible_values_are_omitted() {
        let record = marshal(
            &fields(),
            vec![
                RawField::text("count", "not-a-number"),
                RawField::text("born", "yesterday"),
                RawField::text("seen", "whenever"),
                RawField::text("name", "kept"),
            ],
            true,
        )
        .await
        .unwrap();

        assert!(!record.contains_key("count"));
        assert!(!record.contains_key("born"));
        assert!(!record.contains_key("seen"));
        assert_eq!(record.get("name"), Some(&Value::Text("kept".into())));
    }

    #[tokio::test]
    async fn test_checkbox_off_and_duplicate_wins() {
        // Hidden off input followed by the checked value.
        let record = marshal(
            &fields(),
            vec![
                RawField::text("is_active", "off"),
                RawField::text("is_active", "on"),
            ],
            true,
        )
        .await
        .unwrap();
        assert_eq!(record.get("is_active"), Some(&Value::Bool(true)));

        let record = marshal(&fields(), vec![RawField::text("is_active", "off")], true)
            .await
            .unwrap();
        assert_eq!(record.get("is_active"), Some(&Value::Bool(false)));
    }

    #[tokio::test]
    async fn test_password_is_hashed_not_retained() {
        let record = marshal(
            &fields(),
            vec![RawField::text("password", "secret123")],
            true,
        )
        .await
        .unwrap();

        let stored = record.get("password").unwrap().as_str().unwrap();
        assert_ne!(stored, "secret123");
        assert!(verify_password("secret123", stored).unwrap());
    }

    #[tokio::test]
    async fn test_upload_persisted_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let fields = vec![
            FieldDescriptor::new("id", StorageType::Integer).primary_key(),
            FieldDescriptor::new("attachment", StorageType::Binary)
                .upload(UploadSpec::to_dir(dir.path())),
        ];

        let record = marshal(
            &fields,
            vec![RawField::file("attachment", "notes.txt", b"hello".to_vec())],
            true,
        )
        .await
        .unwrap();

        let path = record.get("attachment").unwrap().as_str().unwrap();
        assert!(path.contains("notes.txt"));
        assert_eq!(std::fs::read(path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_upload_captured_in_memory_without_dir() {
        let fields = vec![
            FieldDescriptor::new("id", StorageType::Integer).primary_key(),
            FieldDescriptor::new("attachment", StorageType::Binary)
                .upload(UploadSpec::in_memory()),
        ];

        let record = marshal(
            &fields,
            vec![RawField::file("attachment", "notes.txt", b"hello".to_vec())],
            true,
        )
        .await
        .unwrap();

        assert_eq!(
            record.get("attachment"),
            Some(&Value::Bytes(b"hello".to_vec()))
        );
    }

    #[test]
    fn test_parse_path_id() {
        let fields = fields();
        assert_eq!(parse_path_id(&fields, "42").unwrap(), Value::Int(42));
        assert!(matches!(
            parse_path_id(&fields, "not-a-number").unwrap_err(),
            AdminError::Validation { .. }
        ));

        let text_pk = vec![FieldDescriptor::new("id", StorageType::Text).primary_key()];
        assert_eq!(
            parse_path_id(&text_pk, "abc-123").unwrap(),
            Value::Text("abc-123".into())
        );
    }

    #[test]
    fn test_stored_file_name_sanitizes() {
        let stored = stored_file_name("../../etc/passwd");
        assert!(!stored.contains('/'));
        assert!(stored.ends_with("passwd"));
    }
}
