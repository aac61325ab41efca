// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTML widget mapping.
//!
//! Maps a field's semantic storage type plus its markers to the HTML input
//! category used in generated forms. The mapping is a pure function with no
//! failure mode: unknown combinations fall back to [`WidgetType::Text`].
//!
//! The mapping is backend-symmetric by construction — it only consumes the
//! uniform [`FieldDescriptor`], never backend-native metadata.

use serde::{Deserialize, Serialize};

use crate::field::{FieldDescriptor, StorageType};
use crate::value::Value;

// =============================================================================
// WidgetType
// =============================================================================

/// The HTML input category chosen to represent a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    /// Single-line text input
    Text,
    /// Masked password input
    Password,
    /// Numeric input
    Number,
    /// Checkbox
    Checkbox,
    /// Date picker
    Date,
    /// Date-time picker
    DateTime,
    /// Select dropdown
    Select,
    /// File upload input
    File,
    /// Multi-line text area
    Textarea,
}

impl std::fmt::Display for WidgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WidgetType::Text => "text",
            WidgetType::Password => "password",
            WidgetType::Number => "number",
            WidgetType::Checkbox => "checkbox",
            WidgetType::Date => "date",
            WidgetType::DateTime => "datetime",
            WidgetType::Select => "select",
            WidgetType::File => "file",
            WidgetType::Textarea => "textarea",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Mapping
// =============================================================================

/// Maps a field descriptor to its widget type.
///
/// Password and upload markers take precedence over the storage type for
/// text fields; binary fields become uploads only when marked, otherwise a
/// textarea.
pub fn map_widget(field: &FieldDescriptor) -> WidgetType {
    match field.storage_type {
        StorageType::Text => {
            if field.password {
                WidgetType::Password
            } else if field.is_upload() {
                WidgetType::File
            } else {
                WidgetType::Text
            }
        }
        StorageType::Boolean => WidgetType::Checkbox,
        StorageType::Integer | StorageType::Decimal => WidgetType::Number,
        StorageType::Date => WidgetType::Date,
        StorageType::DateTime => WidgetType::DateTime,
        StorageType::Enum => WidgetType::Select,
        StorageType::Binary => {
            if field.is_upload() {
                WidgetType::File
            } else {
                WidgetType::Textarea
            }
        }
    }
}

// =============================================================================
// Form Metadata
// =============================================================================

/// A selectable option of a [`WidgetType::Select`] widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Constant name shown and submitted.
    pub label: String,
    /// Whether this option matches the stored value.
    pub selected: bool,
}

/// Per-field form metadata handed to the template renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetField {
    /// Field name.
    pub name: String,
    /// Chosen widget.
    pub widget: WidgetType,
    /// Current value rendered as text (empty for passwords).
    pub value: String,
    /// Checkbox state, meaningful only for [`WidgetType::Checkbox`].
    pub checked: bool,
    /// Options, populated only for [`WidgetType::Select`].
    pub options: Vec<SelectOption>,
    /// Whether the field is excluded from editing.
    pub read_only: bool,
}

impl WidgetField {
    /// Builds form metadata for a field and an optional stored value.
    ///
    /// Enum `selected` flags are computed against the stored value; a
    /// checkbox is checked when the stored value is a true boolean.
    /// Passwords never echo their stored value back into the form.
    pub fn from_field(field: &FieldDescriptor, current: Option<&Value>) -> Self {
        let widget = map_widget(field);

        let value = match (widget, current) {
            (WidgetType::Password, _) => String::new(),
            (_, Some(v)) => v.to_string(),
            (_, None) => String::new(),
        };

        let checked = current.and_then(Value::as_bool).unwrap_or(false);

        let options = field
            .enum_values
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|constant| SelectOption {
                label: constant.clone(),
                selected: current.and_then(Value::as_str) == Some(constant.as_str()),
            })
            .collect();

        Self {
            name: field.name.clone(),
            widget,
            value,
            checked,
            options,
            read_only: field.read_only,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::UploadSpec;

    fn field(storage_type: StorageType) -> FieldDescriptor {
        FieldDescriptor::new("f", storage_type)
    }

    #[test]
    fn test_basic_mapping() {
        assert_eq!(map_widget(&field(StorageType::Text)), WidgetType::Text);
        assert_eq!(map_widget(&field(StorageType::Boolean)), WidgetType::Checkbox);
        assert_eq!(map_widget(&field(StorageType::Integer)), WidgetType::Number);
        assert_eq!(map_widget(&field(StorageType::Decimal)), WidgetType::Number);
        assert_eq!(map_widget(&field(StorageType::Date)), WidgetType::Date);
        assert_eq!(map_widget(&field(StorageType::DateTime)), WidgetType::DateTime);
        assert_eq!(map_widget(&field(StorageType::Enum)), WidgetType::Select);
        assert_eq!(map_widget(&field(StorageType::Binary)), WidgetType::Textarea);
    }

    #[test]
    fn test_marker_precedence() {
        assert_eq!(
            map_widget(&field(StorageType::Text).password()),
            WidgetType::Password
        );
        assert_eq!(
            map_widget(&field(StorageType::Text).upload(UploadSpec::in_memory())),
            WidgetType::File
        );
        assert_eq!(
            map_widget(&field(StorageType::Binary).upload(UploadSpec::in_memory())),
            WidgetType::File
        );
    }

    #[test]
    fn test_checkbox_checked_from_value() {
        let meta = WidgetField::from_field(&field(StorageType::Boolean), Some(&Value::Bool(true)));
        assert!(meta.checked);
        assert_eq!(meta.widget, WidgetType::Checkbox);

        let meta = WidgetField::from_field(&field(StorageType::Boolean), Some(&Value::Bool(false)));
        assert!(!meta.checked);
    }

    #[test]
    fn test_select_options_selected_flag() {
        let role = FieldDescriptor::new("role", StorageType::Enum).enum_values(vec![
            "ADMIN".into(),
            "EDITOR".into(),
            "VIEWER".into(),
        ]);
        let meta = WidgetField::from_field(&role, Some(&Value::Text("EDITOR".into())));

        assert_eq!(meta.widget, WidgetType::Select);
        let selected: Vec<_> = meta
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected, vec!["EDITOR"]);
    }

    #[test]
    fn test_password_value_never_echoed() {
        let pw = FieldDescriptor::new("password", StorageType::Text).password();
        let meta = WidgetField::from_field(&pw, Some(&Value::Text("$argon2id$...".into())));
        assert_eq!(meta.widget, WidgetType::Password);
        assert!(meta.value.is_empty());
    }
}
