// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The uniform store-adapter contract.
//!
//! All three storage paradigms are accessed through [`StoreAdapter`]. The
//! route controller tolerates their structural differences via the
//! descriptor's [`SourceKind`] tag and the capability defaults below: an
//! operation an adapter cannot provide returns
//! [`StoreError::Unsupported`](crate::error::StoreError::Unsupported)
//! instead of panicking.
//!
//! # Thread Safety
//!
//! Adapters are `Send + Sync` and shared across concurrent requests. The
//! core imposes no locking beyond what an adapter needs internally; two
//! concurrent writes to the same entity race exactly as the backend allows.

use std::collections::HashMap;

use async_trait::async_trait;

use steward_core::descriptor::EntityDescriptor;
use steward_core::source::SourceKind;
use steward_core::value::Value;

use crate::error::{StoreError, StoreResult};
use crate::managed::ObjectInstance;

/// An untyped storage record: attribute name to typed value.
pub type Record = HashMap<String, Value>;

// =============================================================================
// StoreAdapter Trait
// =============================================================================

/// Uniform data-access contract over one storage backend.
///
/// # Capability Matrix
///
/// | Operation       | Relational | ManagedObject | Document |
/// |-----------------|------------|---------------|----------|
/// | `save` (map)    | yes        | unsupported   | yes      |
/// | `save_object`   | unsupported| yes           | unsupported |
/// | `update` (map)  | yes        | unsupported   | yes      |
/// | `update_object` | unsupported| yes           | unsupported |
/// | everything else | yes        | yes           | yes      |
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Returns the storage paradigm this adapter serves.
    fn kind(&self) -> SourceKind;

    /// Provisions storage for an entity.
    ///
    /// Relational backends issue explicit DDL; managed-object backends are
    /// best-effort and may legitimately no-op; document collections are
    /// implicit.
    async fn ensure_storage(&self, descriptor: &EntityDescriptor) -> StoreResult<()>;

    /// Fetches a single record by primary key.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no record exists under the identifier.
    async fn find_by_id(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<Record>;

    /// Fetches all records of an entity.
    async fn find_all(&self, descriptor: &EntityDescriptor) -> StoreResult<Vec<Record>>;

    /// Fetches at most one record whose field equals the given value.
    ///
    /// Used for principal lookup by unique username; absence is not an
    /// error here.
    async fn find_by_key(
        &self,
        descriptor: &EntityDescriptor,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Record>>;

    /// Inserts a record from a marshaled value map, returning the
    /// store-generated key.
    async fn save(&self, _descriptor: &EntityDescriptor, _record: Record) -> StoreResult<Value> {
        Err(StoreError::unsupported("save", self.kind()))
    }

    /// Inserts a fully constructed object instance, returning its key.
    async fn save_object(
        &self,
        _descriptor: &EntityDescriptor,
        _instance: ObjectInstance,
    ) -> StoreResult<Value> {
        Err(StoreError::unsupported("save_object", self.kind()))
    }

    /// Updates the record under `id` from a marshaled value map.
    async fn update(
        &self,
        _descriptor: &EntityDescriptor,
        _id: &Value,
        _record: Record,
    ) -> StoreResult<()> {
        Err(StoreError::unsupported("update", self.kind()))
    }

    /// Replaces the record under `id` with a fully constructed instance.
    async fn update_object(
        &self,
        _descriptor: &EntityDescriptor,
        _id: &Value,
        _instance: ObjectInstance,
    ) -> StoreResult<()> {
        Err(StoreError::unsupported("update_object", self.kind()))
    }

    /// Deletes the record under `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no record exists under the identifier.
    async fn delete(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<()>;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use steward_core::descriptor::DescriptorBuilder;
    use steward_core::source::{DocumentDef, PropType, PropertyDef};

    /// A minimal adapter that only implements the required operations.
    struct BareAdapter;

    #[async_trait]
    impl StoreAdapter for BareAdapter {
        fn kind(&self) -> SourceKind {
            SourceKind::Document
        }

        async fn ensure_storage(&self, _descriptor: &EntityDescriptor) -> StoreResult<()> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            descriptor: &EntityDescriptor,
            id: &Value,
        ) -> StoreResult<Record> {
            Err(StoreError::not_found(&descriptor.storage_name, id))
        }

        async fn find_all(&self, _descriptor: &EntityDescriptor) -> StoreResult<Vec<Record>> {
            Ok(Vec::new())
        }

        async fn find_by_key(
            &self,
            _descriptor: &EntityDescriptor,
            _field: &str,
            _value: &Value,
        ) -> StoreResult<Option<Record>> {
            Ok(None)
        }

        async fn delete(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<()> {
            Err(StoreError::not_found(&descriptor.storage_name, id))
        }
    }

    fn descriptor() -> EntityDescriptor {
        let doc = DocumentDef::new("Thing")
            .property(PropertyDef::new("id", PropType::Str).primary_key());
        DescriptorBuilder::build(&doc.into(), "things").unwrap()
    }

    #[tokio::test]
    async fn test_capability_defaults_surface_unsupported() {
        let adapter = BareAdapter;
        let d = descriptor();

        let err = adapter.save(&d, Record::new()).await.unwrap_err();
        assert_eq!(err, StoreError::unsupported("save", SourceKind::Document));

        let err = adapter
            .update(&d, &Value::Text("x".into()), Record::new())
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::unsupported("update", SourceKind::Document));

        let err = adapter
            .save_object(&d, ObjectInstance::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unsupported { .. }));
    }
}
