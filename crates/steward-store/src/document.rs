// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Document store adapter.
//!
//! Identifiers are driver-generated opaque keys; `save` inserts the
//! document and back-fills the generated key into it. Collections are
//! implicit, so `ensure_storage` is a no-op.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use steward_core::descriptor::EntityDescriptor;
use steward_core::source::SourceKind;
use steward_core::value::Value;

use crate::adapter::{Record, StoreAdapter};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// DocumentAdapter
// =============================================================================

/// Store adapter for document collections.
#[derive(Debug, Default)]
pub struct DocumentAdapter {
    collections: RwLock<HashMap<String, BTreeMap<String, Record>>>,
}

impl DocumentAdapter {
    /// Creates an adapter with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    fn opaque_key(id: &Value) -> String {
        id.to_string()
    }
}

#[async_trait]
impl StoreAdapter for DocumentAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Document
    }

    async fn ensure_storage(&self, descriptor: &EntityDescriptor) -> StoreResult<()> {
        // Collections spring into existence on first insert.
        tracing::debug!(collection = %descriptor.storage_name, "Document collections are implicit");
        Ok(())
    }

    async fn find_by_id(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<Record> {
        let collections = self.collections.read();
        collections
            .get(&descriptor.storage_name)
            .and_then(|c| c.get(&Self::opaque_key(id)))
            .cloned()
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))
    }

    async fn find_all(&self, descriptor: &EntityDescriptor) -> StoreResult<Vec<Record>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&descriptor.storage_name)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_key(
        &self,
        descriptor: &EntityDescriptor,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Record>> {
        let collections = self.collections.read();
        Ok(collections.get(&descriptor.storage_name).and_then(|c| {
            c.values()
                .find(|doc| doc.get(field) == Some(value))
                .cloned()
        }))
    }

    async fn save(&self, descriptor: &EntityDescriptor, record: Record) -> StoreResult<Value> {
        let pk = descriptor.primary_key().name.clone();
        let key = Uuid::new_v4().to_string();

        let mut collections = self.collections.write();
        let collection = collections
            .entry(descriptor.storage_name.clone())
            .or_default();

        // Back-fill the generated key into the stored document.
        let mut doc = record;
        doc.insert(pk, Value::Text(key.clone()));
        collection.insert(key.clone(), doc);

        Ok(Value::Text(key))
    }

    async fn update(
        &self,
        descriptor: &EntityDescriptor,
        id: &Value,
        record: Record,
    ) -> StoreResult<()> {
        let pk = descriptor.primary_key().name.clone();
        let mut collections = self.collections.write();
        let collection = collections
            .get_mut(&descriptor.storage_name)
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        let doc = collection
            .get_mut(&Self::opaque_key(id))
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        for (name, value) in record {
            if name != pk {
                doc.insert(name, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<()> {
        let mut collections = self.collections.write();
        let collection = collections
            .get_mut(&descriptor.storage_name)
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        collection
            .remove(&Self::opaque_key(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))
    }
}

// =============================================================================
// Tests
// =============================================================================
