// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Backend-native entity definitions.
//!
//! Each storage backend exposes entity metadata in its own shape: relational
//! tables declare a column list with SQL types, managed objects declare a
//! property list plus a persistence marker and a primary constructor, and
//! documents declare a bare property list. The descriptor builder consumes
//! these definitions and produces one uniform [`crate::descriptor::EntityDescriptor`]
//! regardless of the source shape.

use serde::{Deserialize, Serialize};

use crate::field::{StorageType, UploadSpec};

// =============================================================================
// SourceKind
// =============================================================================

/// The storage paradigm an entity definition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Column-based relational table
    Relational,
    /// Managed-object relational mapping
    ManagedObject,
    /// Document collection
    Document,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::Relational => "relational",
            SourceKind::ManagedObject => "managed_object",
            SourceKind::Document => "document",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Markers
// =============================================================================

/// Annotation-driven overrides attached to a column or property.
///
/// Markers take precedence over name-based detection; they are resolved into
/// plain fields on the built descriptor, never consulted again afterward.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Markers {
    /// Force password treatment regardless of the field name.
    pub password: bool,
    /// Treat the field as a file upload.
    pub upload: Option<UploadSpec>,
    /// Exclude the field from generated forms.
    pub read_only: bool,
    /// Constrain the field to an ordered set of named constants.
    pub enum_values: Option<Vec<String>>,
}

impl Markers {
    /// Creates an empty marker set.
    pub fn none() -> Self {
        Self::default()
    }
}

// =============================================================================
// Relational Tables
// =============================================================================

/// Native SQL column types recognized by the relational strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    /// VARCHAR / CHAR
    Varchar,
    /// TEXT / CLOB
    Text,
    /// INTEGER / SMALLINT
    Integer,
    /// BIGINT
    BigInt,
    /// REAL / DOUBLE
    Real,
    /// NUMERIC / DECIMAL
    Numeric,
    /// BOOLEAN
    Boolean,
    /// DATE
    Date,
    /// TIMESTAMP
    Timestamp,
    /// BLOB / BYTEA
    Blob,
}

impl SqlType {
    /// Maps this SQL type to the semantic storage type.
    pub fn storage_type(self) -> StorageType {
        match self {
            SqlType::Varchar | SqlType::Text => StorageType::Text,
            SqlType::Integer | SqlType::BigInt => StorageType::Integer,
            SqlType::Real | SqlType::Numeric => StorageType::Decimal,
            SqlType::Boolean => StorageType::Boolean,
            SqlType::Date => StorageType::Date,
            SqlType::Timestamp => StorageType::DateTime,
            SqlType::Blob => StorageType::Binary,
        }
    }
}

/// A single column declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Native SQL type.
    pub sql_type: SqlType,
    /// Explicit primary-key marker.
    pub primary_key: bool,
    /// Annotation overrides.
    pub markers: Markers,
}

impl ColumnDef {
    /// Creates a plain column.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            primary_key: false,
            markers: Markers::none(),
        }
    }

    /// Marks the column as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Attaches annotation overrides.
    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }
}

/// A relational table definition, as surfaced by schema reflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Entity name.
    pub name: String,
    /// Declared columns, in declaration order.
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Creates an empty table definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }
}

// =============================================================================
// Managed Objects & Documents
// =============================================================================

/// Native property types for managed objects and documents.
///
/// Enum properties carry their constant names directly, mirroring what the
/// backend's type introspection exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropType {
    /// String property
    Str,
    /// Integer property
    Int,
    /// Floating-point property
    Float,
    /// Boolean property
    Bool,
    /// Date property
    Date,
    /// Date-time property
    DateTime,
    /// Enumeration with ordered constant names
    Enum(Vec<String>),
    /// Binary property
    Bytes,
}

impl PropType {
    /// Maps this property type to the semantic storage type.
    pub fn storage_type(&self) -> StorageType {
        match self {
            PropType::Str => StorageType::Text,
            PropType::Int => StorageType::Integer,
            PropType::Float => StorageType::Decimal,
            PropType::Bool => StorageType::Boolean,
            PropType::Date => StorageType::Date,
            PropType::DateTime => StorageType::DateTime,
            PropType::Enum(_) => StorageType::Enum,
            PropType::Bytes => StorageType::Binary,
        }
    }
}

/// A single property declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Native property type.
    pub prop_type: PropType,
    /// Explicit primary-key marker.
    pub primary_key: bool,
    /// Annotation overrides.
    pub markers: Markers,
}

impl PropertyDef {
    /// Creates a plain property.
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            prop_type,
            primary_key: false,
            markers: Markers::none(),
        }
    }

    /// Marks the property as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Attaches annotation overrides.
    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }
}

/// A managed-object entity definition.
///
/// The constructor parameter list drives object reassembly on the write
/// path; parameters missing from a marshaled map become null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDef {
    /// Entity name.
    pub name: String,
    /// Whether the object carries the persistence-entity marker.
    pub persistent: bool,
    /// Declared properties, in declaration order.
    pub properties: Vec<PropertyDef>,
    /// Primary constructor parameter names, in declaration order.
    pub constructor: Vec<String>,
}

impl ObjectDef {
    /// Creates an empty persistent object definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            persistent: true,
            properties: Vec::new(),
            constructor: Vec::new(),
        }
    }

    /// Clears the persistence marker.
    pub fn transient(mut self) -> Self {
        self.persistent = false;
        self
    }

    /// Appends a property.
    pub fn property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Sets the primary constructor parameter names.
    pub fn constructor(mut self, params: Vec<String>) -> Self {
        self.constructor = params;
        self
    }
}

/// A document-collection entity definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDef {
    /// Entity name.
    pub name: String,
    /// Declared properties, in declaration order.
    pub properties: Vec<PropertyDef>,
}

impl DocumentDef {
    /// Creates an empty document definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Appends a property.
    pub fn property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }
}

// =============================================================================
// EntitySource
// =============================================================================

/// An entity definition in one of the three backend-native shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntitySource {
    /// Relational table definition.
    Table(TableDef),
    /// Managed-object definition.
    Object(ObjectDef),
    /// Document definition.
    Document(DocumentDef),
}

impl EntitySource {
    /// Returns the entity name.
    pub fn name(&self) -> &str {
        match self {
            EntitySource::Table(t) => &t.name,
            EntitySource::Object(o) => &o.name,
            EntitySource::Document(d) => &d.name,
        }
    }

    /// Returns the storage paradigm of this definition.
    pub fn kind(&self) -> SourceKind {
        match self {
            EntitySource::Table(_) => SourceKind::Relational,
            EntitySource::Object(_) => SourceKind::ManagedObject,
            EntitySource::Document(_) => SourceKind::Document,
        }
    }
}

impl From<TableDef> for EntitySource {
    fn from(def: TableDef) -> Self {
        EntitySource::Table(def)
    }
}

impl From<ObjectDef> for EntitySource {
    fn from(def: ObjectDef) -> Self {
        EntitySource::Object(def)
    }
}

impl From<DocumentDef> for EntitySource {
    fn from(def: DocumentDef) -> Self {
        EntitySource::Document(def)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_type_mapping() {
        assert_eq!(SqlType::Varchar.storage_type(), StorageType::Text);
        assert_eq!(SqlType::BigInt.storage_type(), StorageType::Integer);
        assert_eq!(SqlType::Numeric.storage_type(), StorageType::Decimal);
        assert_eq!(SqlType::Timestamp.storage_type(), StorageType::DateTime);
        assert_eq!(SqlType::Blob.storage_type(), StorageType::Binary);
    }

    #[test]
    fn test_prop_type_mapping() {
        assert_eq!(PropType::Str.storage_type(), StorageType::Text);
        assert_eq!(
            PropType::Enum(vec!["A".into(), "B".into()]).storage_type(),
            StorageType::Enum
        );
        assert_eq!(PropType::Bytes.storage_type(), StorageType::Binary);
    }

    #[test]
    fn test_source_kind() {
        let table: EntitySource = TableDef::new("orders").into();
        assert_eq!(table.kind(), SourceKind::Relational);
        assert_eq!(table.name(), "orders");

        let object: EntitySource = ObjectDef::new("Customer").into();
        assert_eq!(object.kind(), SourceKind::ManagedObject);

        let doc: EntitySource = DocumentDef::new("Article").into();
        assert_eq!(doc.kind(), SourceKind::Document);
    }
}
