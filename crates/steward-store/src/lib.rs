// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # steward-store
//!
//! Store adapters for the Steward admin console.
//!
//! One [`StoreAdapter`] contract covers three structurally different
//! storage paradigms:
//!
//! - **Relational**: integer keys generated by the store, map-based writes,
//!   explicit DDL
//! - **ManagedObject**: writes via reconstructed object instances, keys from
//!   the object's own primary-key property
//! - **Document**: driver-generated opaque keys, implicit collections
//!
//! Capability mismatches surface
//! [`StoreError::Unsupported`](error::StoreError::Unsupported) rather than
//! crashing. The bundled adapters keep state in memory; production hosts
//! implement the same trait over their real drivers.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod document;
pub mod error;
pub mod managed;
pub mod relational;

pub use adapter::{Record, StoreAdapter};
pub use document::DocumentAdapter;
pub use error::{StoreError, StoreResult};
pub use managed::{ManagedObjectAdapter, ObjectFactory, ObjectInstance};
pub use relational::RelationalAdapter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
