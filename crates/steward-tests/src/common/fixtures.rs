// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Entity definition fixtures.
//!
//! The widget entity exists in all three backend shapes with the same
//! logical fields, which is what the symmetry suites lean on.

use steward_core::source::{
    ColumnDef, DocumentDef, Markers, ObjectDef, PropType, PropertyDef, SqlType, TableDef,
};

/// Enum constants shared by the role fixtures.
pub const ROLES: [&str; 3] = ["ADMIN", "EDITOR", "VIEWER"];

fn roles() -> Vec<String> {
    ROLES.iter().map(|r| r.to_string()).collect()
}

/// Relational widget entity.
pub fn widget_table() -> TableDef {
    TableDef::new("Widget")
        .column(ColumnDef::new("id", SqlType::Integer).primary_key())
        .column(ColumnDef::new("name", SqlType::Varchar))
        .column(ColumnDef::new("is_active", SqlType::Boolean))
        .column(ColumnDef::new("weight", SqlType::Numeric))
        .column(ColumnDef::new("launched", SqlType::Date))
        .column(
            ColumnDef::new("role", SqlType::Varchar).markers(Markers {
                enum_values: Some(roles()),
                ..Markers::none()
            }),
        )
        .column(ColumnDef::new("created_at", SqlType::Timestamp))
}

/// Managed-object widget entity with the same logical fields.
pub fn widget_object() -> ObjectDef {
    ObjectDef::new("Widget")
        .property(PropertyDef::new("id", PropType::Int).primary_key())
        .property(PropertyDef::new("name", PropType::Str))
        .property(PropertyDef::new("is_active", PropType::Bool))
        .property(PropertyDef::new("weight", PropType::Float))
        .property(PropertyDef::new("launched", PropType::Date))
        .property(PropertyDef::new("role", PropType::Enum(roles())))
        .property(PropertyDef::new("created_at", PropType::DateTime))
        .constructor(vec![
            "id".into(),
            "name".into(),
            "is_active".into(),
            "weight".into(),
            "launched".into(),
            "role".into(),
            "created_at".into(),
        ])
}

/// Document widget entity with the same logical fields.
pub fn widget_document() -> DocumentDef {
    DocumentDef::new("Widget")
        .property(PropertyDef::new("id", PropType::Str).primary_key())
        .property(PropertyDef::new("name", PropType::Str))
        .property(PropertyDef::new("is_active", PropType::Bool))
        .property(PropertyDef::new("weight", PropType::Float))
        .property(PropertyDef::new("launched", PropType::Date))
        .property(PropertyDef::new("role", PropType::Enum(roles())))
        .property(PropertyDef::new("created_at", PropType::DateTime))
}

/// Document entity with an enum role field, for select-widget suites.
pub fn account_document() -> DocumentDef {
    DocumentDef::new("Account")
        .property(PropertyDef::new("id", PropType::Str).primary_key())
        .property(PropertyDef::new("email", PropType::Str))
        .property(PropertyDef::new("role", PropType::Enum(roles())))
}
