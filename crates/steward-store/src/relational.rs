// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Relational store adapter.
//!
//! Identifiers are small integers generated by the store; `save` accepts a
//! marshaled column map and returns the generated key; storage creation is
//! explicit DDL. The bundled backend keeps tables in memory behind the same
//! contract a SQL-backed adapter would implement.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use steward_core::descriptor::EntityDescriptor;
use steward_core::source::SourceKind;
use steward_core::value::Value;

use crate::adapter::{Record, StoreAdapter};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Table State
// =============================================================================

/// One provisioned table: declared columns plus rows keyed by integer id.
#[derive(Debug, Default)]
struct TableState {
    columns: Vec<String>,
    next_id: i64,
    rows: BTreeMap<i64, Record>,
}

impl TableState {
    /// Drops values for columns the DDL never declared.
    fn project(&self, mut record: Record) -> Record {
        record.retain(|name, _| self.columns.iter().any(|c| c == name));
        record
    }
}

// =============================================================================
// RelationalAdapter
// =============================================================================

/// Store adapter for column-based relational tables.
#[derive(Debug, Default)]
pub struct RelationalAdapter {
    tables: RwLock<HashMap<String, TableState>>,
}

impl RelationalAdapter {
    /// Creates an adapter with no provisioned tables.
    pub fn new() -> Self {
        Self::default()
    }

    fn integer_id(descriptor: &EntityDescriptor, id: &Value) -> StoreResult<i64> {
        id.as_i64()
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))
    }
}

#[async_trait]
impl StoreAdapter for RelationalAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Relational
    }

    async fn ensure_storage(&self, descriptor: &EntityDescriptor) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let table = tables.entry(descriptor.storage_name.clone()).or_default();

        // DDL is idempotent: re-registration refreshes the column list but
        // keeps existing rows.
        table.columns = descriptor.fields.iter().map(|f| f.name.clone()).collect();
        table.next_id = table.next_id.max(1);

        tracing::debug!(
            table = %descriptor.storage_name,
            columns = table.columns.len(),
            "Provisioned relational table"
        );
        Ok(())
    }

    async fn find_by_id(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<Record> {
        let key = Self::integer_id(descriptor, id)?;
        let tables = self.tables.read();
        tables
            .get(&descriptor.storage_name)
            .and_then(|t| t.rows.get(&key))
            .cloned()
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))
    }

    async fn find_all(&self, descriptor: &EntityDescriptor) -> StoreResult<Vec<Record>> {
        let tables = self.tables.read();
        Ok(tables
            .get(&descriptor.storage_name)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_key(
        &self,
        descriptor: &EntityDescriptor,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Record>> {
        let tables = self.tables.read();
        Ok(tables.get(&descriptor.storage_name).and_then(|t| {
            t.rows
                .values()
                .find(|row| row.get(field) == Some(value))
                .cloned()
        }))
    }

    async fn save(&self, descriptor: &EntityDescriptor, record: Record) -> StoreResult<Value> {
        let pk = descriptor.primary_key().name.clone();
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(&descriptor.storage_name)
            .ok_or_else(|| StoreError::backend(format!("table '{}' not provisioned", descriptor.storage_name)))?;

        let id = table.next_id;
        table.next_id += 1;

        let mut row = table.project(record);
        row.insert(pk, Value::Int(id));
        table.rows.insert(id, row);

        Ok(Value::Int(id))
    }

    async fn update(
        &self,
        descriptor: &EntityDescriptor,
        id: &Value,
        record: Record,
    ) -> StoreResult<()> {
        let key = Self::integer_id(descriptor, id)?;
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(&descriptor.storage_name)
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        let projected = table.project(record);
        let pk = descriptor.primary_key().name.clone();
        let row = table
            .rows
            .get_mut(&key)
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        // The path identifier stays authoritative for the row key.
        for (name, value) in projected {
            if name != pk {
                row.insert(name, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<()> {
        let key = Self::integer_id(descriptor, id)?;
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(&descriptor.storage_name)
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))?;

        table
            .rows
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(&descriptor.storage_name, id))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use steward_core::descriptor::DescriptorBuilder;
    use steward_core::source::{ColumnDef, SqlType, TableDef};

    fn descriptor() -> EntityDescriptor {
        let table = TableDef::new("Widget")
            .column(ColumnDef::new("id", SqlType::Integer).primary_key())
            .column(ColumnDef::new("name", SqlType::Varchar))
            .column(ColumnDef::new("is_active", SqlType::Boolean));
        DescriptorBuilder::build(&table.into(), "widgets").unwrap()
    }

    fn record(name: &str, active: bool) -> Record {
        Record::from([
            ("name".to_string(), Value::Text(name.into())),
            ("is_active".to_string(), Value::Bool(active)),
        ])
    }

    #[tokio::test]
    async fn test_save_generates_sequential_keys() {
        let adapter = RelationalAdapter::new();
        let d = descriptor();
        adapter.ensure_storage(&d).await.unwrap();

        let first = adapter.save(&d, record("a", true)).await.unwrap();
        let second = adapter.save(&d, record("b", false)).await.unwrap();
        assert_eq!(first, Value::Int(1));
        assert_eq!(second, Value::Int(2));
    }

    #[tokio::test]
    async fn test_save_then_find_round_trip() {
        let adapter = RelationalAdapter::new();
        let d = descriptor();
        adapter.ensure_storage(&d).await.unwrap();

        let id = adapter.save(&d, record("widget-1", true)).await.unwrap();
        let row = adapter.find_by_id(&d, &id).await.unwrap();
        assert_eq!(row.get("name"), Some(&Value::Text("widget-1".into())));
        assert_eq!(row.get("is_active"), Some(&Value::Bool(true)));
        assert_eq!(row.get("id"), Some(&id));

        let all = adapter.find_all(&d).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_columns_are_dropped() {
        let adapter = RelationalAdapter::new();
        let d = descriptor();
        adapter.ensure_storage(&d).await.unwrap();

        let mut extra = record("a", true);
        extra.insert("phantom".into(), Value::Int(1));
        let id = adapter.save(&d, extra).await.unwrap();

        let row = adapter.find_by_id(&d, &id).await.unwrap();
        assert!(!row.contains_key("phantom"));
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_key() {
        let adapter = RelationalAdapter::new();
        let d = descriptor();
        adapter.ensure_storage(&d).await.unwrap();

        let id = adapter.save(&d, record("old", true)).await.unwrap();
        adapter
            .update(
                &d,
                &id,
                Record::from([
                    ("name".to_string(), Value::Text("new".into())),
                    // A client-supplied key never rebinds the row.
                    ("id".to_string(), Value::Int(99)),
                ]),
            )
            .await
            .unwrap();

        let row = adapter.find_by_id(&d, &id).await.unwrap();
        assert_eq!(row.get("name"), Some(&Value::Text("new".into())));
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.get("is_active"), Some(&Value::Bool(true)));
    }

    #[tokio::test]
    async fn test_delete_and_not_found() {
        let adapter = RelationalAdapter::new();
        let d = descriptor();
        adapter.ensure_storage(&d).await.unwrap();

        let id = adapter.save(&d, record("a", true)).await.unwrap();
        adapter.delete(&d, &id).await.unwrap();

        assert!(adapter.find_by_id(&d, &id).await.unwrap_err().is_not_found());
        assert!(adapter.delete(&d, &id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_key() {
        let adapter = RelationalAdapter::new();
        let d = descriptor();
        adapter.ensure_storage(&d).await.unwrap();
        adapter.save(&d, record("alpha", true)).await.unwrap();

        let hit = adapter
            .find_by_key(&d, "name", &Value::Text("alpha".into()))
            .await
            .unwrap();
        assert!(hit.is_some());

        let miss = adapter
            .find_by_key(&d, "name", &Value::Text("beta".into()))
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_object_save_is_unsupported() {
        let adapter = RelationalAdapter::new();
        let d = descriptor();
        let err = adapter
            .save_object(&d, crate::managed::ObjectInstance::empty())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::unsupported("save_object", SourceKind::Relational)
        );
    }
}
