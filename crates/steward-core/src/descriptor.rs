// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Entity descriptor construction.
//!
//! The builder introspects a backend-native entity definition into an
//! ordered list of [`FieldDescriptor`]s, one strategy per storage paradigm.
//! All backend-specific reflection stays inside this module; everything
//! downstream (widget mapping, marshaling, routing) sees only the uniform
//! descriptor shape.
//!
//! Ordering invariant: the primary key is always the first field, and
//! fields matching the created/modified lexicon order last, preserving the
//! relative order of everything in between.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::field::{is_password_name, FieldDescriptor};
use crate::source::{ColumnDef, EntitySource, PropType, PropertyDef, SourceKind};

// =============================================================================
// EntityDescriptor
// =============================================================================

/// The uniform schema view of one registered entity.
///
/// Built once during registration and treated as immutable afterward. Each
/// descriptor is owned by the route context of its entity and never shared
/// across entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Derived table/collection name in the backing store.
    pub storage_name: String,
    /// Ordered field descriptors; the primary key is always first.
    pub fields: Vec<FieldDescriptor>,
    /// The storage paradigm this entity lives in.
    pub source: SourceKind,
}

impl EntityDescriptor {
    /// Returns the primary-key descriptor.
    pub fn primary_key(&self) -> &FieldDescriptor {
        // Invariant established by the builder: first field is the key.
        &self.fields[0]
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the field names in descriptor order.
    pub fn headers(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Narrows this descriptor to a subset of fields for list rendering.
    ///
    /// The primary key is always retained. Unknown names are ignored. The
    /// full descriptor remains in use for create/edit views.
    pub fn narrowed(&self, list_fields: &[&str]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|f| f.primary_key || list_fields.contains(&f.name.as_str()))
            .cloned()
            .collect();

        Self {
            storage_name: self.storage_name.clone(),
            fields,
            source: self.source,
        }
    }
}

// =============================================================================
// DescriptorBuilder
// =============================================================================

/// Builds [`EntityDescriptor`]s from backend-native definitions.
pub struct DescriptorBuilder;

impl DescriptorBuilder {
    /// Builds the descriptor for an entity definition.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::NoPrimaryKey`] - no attribute carries a primary-key
    ///   marker and none is literally named `id`
    /// - [`SchemaError::NotPersistent`] - a managed object without the
    ///   persistence-entity marker
    /// - [`SchemaError::DuplicateField`] - two attributes share a name
    pub fn build(
        source: &EntitySource,
        storage_name: impl Into<String>,
    ) -> SchemaResult<EntityDescriptor> {
        let entity = source.name();
        let raw = match source {
            EntitySource::Table(table) => {
                table.columns.iter().map(from_column).collect::<Vec<_>>()
            }
            EntitySource::Object(object) => {
                if !object.persistent {
                    return Err(SchemaError::not_persistent(entity));
                }
                object.properties.iter().map(from_property).collect()
            }
            EntitySource::Document(doc) => doc.properties.iter().map(from_property).collect(),
        };

        let fields = finish(entity, raw)?;

        tracing::debug!(
            entity,
            kind = %source.kind(),
            fields = fields.len(),
            "Built entity descriptor"
        );

        Ok(EntityDescriptor {
            storage_name: storage_name.into(),
            fields,
            source: source.kind(),
        })
    }
}

// =============================================================================
// Per-Backend Strategies
// =============================================================================

/// Relational strategy: one descriptor per declared column.
fn from_column(column: &ColumnDef) -> FieldDescriptor {
    let markers = &column.markers;
    let storage_type = match &markers.enum_values {
        Some(_) => crate::field::StorageType::Enum,
        None => column.sql_type.storage_type(),
    };

    FieldDescriptor {
        name: column.name.clone(),
        storage_type,
        primary_key: column.primary_key,
        password: markers.password || is_password_name(&column.name),
        upload: markers.upload.clone(),
        enum_values: markers.enum_values.clone(),
        read_only: markers.read_only,
    }
}

/// Managed-object / document strategy: one descriptor per declared property.
fn from_property(property: &PropertyDef) -> FieldDescriptor {
    let markers = &property.markers;
    let enum_values = markers.enum_values.clone().or_else(|| match &property.prop_type {
        PropType::Enum(values) => Some(values.clone()),
        _ => None,
    });
    let storage_type = match enum_values {
        Some(_) => crate::field::StorageType::Enum,
        None => property.prop_type.storage_type(),
    };

    FieldDescriptor {
        name: property.name.clone(),
        storage_type,
        primary_key: property.primary_key,
        password: markers.password || is_password_name(&property.name),
        upload: markers.upload.clone(),
        enum_values,
        read_only: markers.read_only,
    }
}

// =============================================================================
// Shared Finishing Pass
// =============================================================================

/// Validates and orders the raw descriptor list.
fn finish(entity: &str, mut fields: Vec<FieldDescriptor>) -> SchemaResult<Vec<FieldDescriptor>> {
    // Reject duplicate names before anything else.
    let mut seen = std::collections::HashSet::new();
    for field in &fields {
        if !seen.insert(field.name.clone()) {
            return Err(SchemaError::duplicate_field(entity, &field.name));
        }
    }

    // Resolve the primary key: first explicit marker wins; fall back to a
    // field literally named "id".
    let pk_index = fields
        .iter()
        .position(|f| f.primary_key)
        .or_else(|| fields.iter().position(|f| f.name == "id"))
        .ok_or_else(|| SchemaError::no_primary_key(entity))?;

    for (i, field) in fields.iter_mut().enumerate() {
        field.primary_key = i == pk_index;
    }

    // Primary key first, created/modified names last, stable otherwise.
    let pk = fields.remove(pk_index);
    let (timestamps, mut ordered): (Vec<_>, Vec<_>) =
        fields.into_iter().partition(|f| f.is_timestamp());

    ordered.insert(0, pk);
    ordered.extend(timestamps);

    Ok(ordered)
}

// =============================================================================
// Tests
// =============================================================================
