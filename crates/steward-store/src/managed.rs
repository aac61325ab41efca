// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Managed-object store adapter.
//!
//! Writes require a fully constructed object instance: the
//! [`ObjectFactory`] reassembles one from a marshaled value map via the
//! entity's primary constructor, treating missing parameters as null —
//! mirroring the marshaling engine's best-effort policy. Identifiers follow
//! the object's own primary-key property. Map-based writes surface
//! [`StoreError::Unsupported`](crate::error::StoreError::Unsupported).

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use steward_core::descriptor::EntityDescriptor;
use steward_core::field::StorageType;
use steward_core::source::{ObjectDef, SourceKind};
use steward_core::value::Value;

use crate::adapter::{Record, StoreAdapter};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// ObjectInstance & ObjectFactory
// =============================================================================

/// A reconstructed managed-object instance, ready for persistence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectInstance {
    /// Property values in constructor order semantics (missing ⇒ null).
    pub values: Record,
}

impl ObjectInstance {
    /// Creates an instance with no properties, for capability probing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the value of a property, treating absence as null.
    pub fn get(&self, name: &str) -> Value {
        self.values.get(name).cloned().unwrap_or(Value::Null)
    }
}

/// Reassembles object instances from marshaled value maps.
///
/// Keyed by the entity definition's primary constructor parameters; values
/// the map does not carry become null rather than failing construction.
#[derive(Debug, Clone)]
pub struct ObjectFactory {
    constructor: Vec<String>,
}

impl ObjectFactory {
    /// Derives a factory from an object definition.
    ///
    /// Definitions without an explicit constructor list fall back to the
    /// declared property order.
    pub fn from_def(def: &ObjectDef) -> Self {
        let constructor = if def.constructor.is_empty() {
            def.properties.iter().map(|p| p.name.clone()).collect()
        } else {
            def.constructor.clone()
        };
        Self { constructor }
    }

    /// Constructs an instance, taking each constructor parameter from the
    /// map and defaulting absent ones to null.
    pub fn construct(&self, mut values: Record) -> ObjectInstance {
        let values = self
            .constructor
            .iter()
            .map(|param| {
                let value = values.remove(param).unwrap_or(Value::Null);
                (param.clone(), value)
            })
            .collect();
        ObjectInstance { values }
    }
}

// =============================================================================
// ManagedObjectAdapter
// =============================================================================

/// One entity's stored instances, keyed by the rendered primary key.
#[derive(Debug, Default)]
struct EntityState {
    next_id: i64,
    instances: BTreeMap<String, Record>,
}

/// Store adapter for managed-object relational mapping.
#[derive(Debug, Default)]
pub struct ManagedObjectAdapter {
    entities: RwLock<HashMap<String, EntityState>>,
}

impl ManagedObjectAdapter {
    /// Creates an adapter with no stored entities.
    pub fn new() -> Self {
        Self::default()
    }

    fn render_key(id: &Value) -> String {
        id.to_string()
    }
}

#[async_trait]
impl StoreAdapter for ManagedObjectAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::ManagedObject
    }

    async fn ensure_storage(&self, descriptor: &EntityDescriptor) -> StoreResult<()> {
        // Best-effort: the backend cannot isolate single-entity schema
        // generation, so provisioning legitimately no-ops.
        tracing::debug!(entity = %descriptor.storage_name, "Managed-object storage is schema-managed; nothing to provision");
        Ok(())
    }

    async fn find_by_id(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<Record> {
        let entities = self.entities.read();
        entities
            .get(&descriptor.storage_name)
            .and_then(|e| e.instances.get(&Self::render_key(id)))
            .cloned()
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))
    }

    async fn find_all(&self, descriptor: &EntityDescriptor) -> StoreResult<Vec<Record>> {
        let entities = self.entities.read();
        Ok(entities
            .get(&descriptor.storage_name)
            .map(|e| e.instances.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_key(
        &self,
        descriptor: &EntityDescriptor,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Record>> {
        let entities = self.entities.read();
        Ok(entities.get(&descriptor.storage_name).and_then(|e| {
            e.instances
                .values()
                .find(|record| record.get(field) == Some(value))
                .cloned()
        }))
    }

    async fn save_object(
        &self,
        descriptor: &EntityDescriptor,
        instance: ObjectInstance,
    ) -> StoreResult<Value> {
        let pk = descriptor.primary_key();
        let mut entities = self.entities.write();
        let state = entities
            .entry(descriptor.storage_name.clone())
            .or_default();

        // The object's own key property wins; a null key means the store
        // assigns one on persist, as a mapper would.
        let key = match instance.get(&pk.name) {
            Value::Null => {
                if pk.storage_type == StorageType::Integer {
                    state.next_id += 1;
                    Value::Int(state.next_id)
                } else {
                    Value::Text(uuid::Uuid::new_v4().to_string())
                }
            }
            carried => carried,
        };

        let mut record = instance.values;
        record.insert(pk.name.clone(), key.clone());
        state.instances.insert(Self::render_key(&key), record);

        Ok(key)
    }

    async fn update_object(
        &self,
        descriptor: &EntityDescriptor,
        id: &Value,
        instance: ObjectInstance,
    ) -> StoreResult<()> {
        let pk = descriptor.primary_key().name.clone();
        let mut entities = self.entities.write();
        let state = entities
            .get_mut(&descriptor.storage_name)
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        let key = Self::render_key(id);
        if !state.instances.contains_key(&key) {
            return Err(StoreError::not_found(&descriptor.storage_name, id));
        }

        // A reconstructed object replaces the stored instance wholesale;
        // the path identifier stays authoritative for the key property.
        let mut record = instance.values;
        record.insert(pk, id.clone());
        state.instances.insert(key, record);
        Ok(())
    }

    async fn delete(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<()> {
        let mut entities = self.entities.write();
        let state = entities
            .get_mut(&descriptor.storage_name)
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        state
            .instances
            .remove(&Self::render_key(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))
    }
}

// =============================================================================
// Tests
// =============================================================================
