// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # steward-core
//!
//! Core abstractions for the Steward admin console generator.
//!
//! This crate provides the backend-agnostic foundation shared by the store
//! adapters and the web layer:
//!
//! - **Value**: typed storage values exchanged with every backend
//! - **Field**: the uniform field descriptor model and marker lexicons
//! - **Source**: backend-native entity definitions (table / object / document)
//! - **Descriptor**: the introspection strategies that build entity descriptors
//! - **Widget**: HTML widget mapping and per-field form metadata
//! - **Session**: the process-wide concurrent session store
//! - **Password**: the one-way hash + verify primitive
//!
//! ## Example
//!
//! ```
//! use steward_core::descriptor::DescriptorBuilder;
//! use steward_core::source::{ColumnDef, SqlType, TableDef};
//! use steward_core::widget::{map_widget, WidgetType};
//!
//! let table = TableDef::new("Widget")
//!     .column(ColumnDef::new("id", SqlType::Integer).primary_key())
//!     .column(ColumnDef::new("name", SqlType::Varchar))
//!     .column(ColumnDef::new("is_active", SqlType::Boolean));
//!
//! let descriptor = DescriptorBuilder::build(&table.into(), "widgets").unwrap();
//! assert_eq!(descriptor.primary_key().name, "id");
//! assert_eq!(map_widget(descriptor.field("is_active").unwrap()), WidgetType::Checkbox);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod descriptor;
pub mod error;
pub mod field;
pub mod password;
pub mod session;
pub mod source;
pub mod value;
pub mod widget;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use descriptor::{DescriptorBuilder, EntityDescriptor};
pub use error::{PasswordError, SchemaError, SchemaResult};
pub use field::{FieldDescriptor, StorageType, UploadSpec};
pub use password::{hash_password, verify_password};
pub use session::{SessionManager, SessionRecord};
pub use source::{
    ColumnDef, DocumentDef, EntitySource, Markers, ObjectDef, PropType, PropertyDef, SourceKind,
    SqlType, TableDef,
};
pub use value::Value;
pub use widget::{map_widget, SelectOption, WidgetField, WidgetType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
