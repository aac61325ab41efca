// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Demo entity definitions.
//!
//! One sample entity per storage paradigm, registered by the `serve`
//! command so the console has something to manage out of the box.

use steward_core::source::{
    ColumnDef, DocumentDef, EntitySource, Markers, ObjectDef, PropType, PropertyDef, SqlType,
    TableDef,
};

/// Returns the demo entities, one per backend.
pub fn demo_entities() -> Vec<EntitySource> {
    vec![product_table().into(), customer_object().into(), article_document().into()]
}

/// Relational sample: a product catalog table.
fn product_table() -> TableDef {
    TableDef::new("Product")
        .column(ColumnDef::new("id", SqlType::Integer).primary_key())
        .column(ColumnDef::new("name", SqlType::Varchar))
        .column(ColumnDef::new("price", SqlType::Numeric))
        .column(ColumnDef::new("in_stock", SqlType::Boolean))
        .column(ColumnDef::new("created_at", SqlType::Timestamp))
}

/// Managed-object sample: a customer with an enum tier.
fn customer_object() -> ObjectDef {
    ObjectDef::new("Customer")
        .property(PropertyDef::new("id", PropType::Int).primary_key())
        .property(PropertyDef::new("name", PropType::Str))
        .property(PropertyDef::new(
            "tier",
            PropType::Enum(vec!["FREE".into(), "PRO".into(), "ENTERPRISE".into()]),
        ))
        .property(PropertyDef::new("signed_up", PropType::Date))
        .constructor(vec![
            "id".into(),
            "name".into(),
            "tier".into(),
            "signed_up".into(),
        ])
}

/// Document sample: an article collection with an upload field.
fn article_document() -> DocumentDef {
    DocumentDef::new("Article")
        .property(PropertyDef::new("id", PropType::Str).primary_key())
        .property(PropertyDef::new("title", PropType::Str))
        .property(PropertyDef::new("body", PropType::Str))
        .property(PropertyDef::new("published", PropType::Bool))
        .property(
            PropertyDef::new("attachment", PropType::Bytes).markers(Markers {
                upload: Some(steward_core::field::UploadSpec::to_dir("uploads")),
                ..Markers::none()
            }),
        )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use steward_core::descriptor::DescriptorBuilder;

    #[test]
    fn test_demo_entities_all_build() {
        for source in demo_entities() {
            let descriptor = DescriptorBuilder::build(&source, "demo").unwrap();
            assert!(descriptor.fields[0].primary_key);
        }
    }
}
