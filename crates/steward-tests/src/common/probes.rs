// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Probe adapters.
//!
//! [`CountingAdapter`] wraps a real adapter and counts read operations, so
//! suites can assert a request performed no storage access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use steward_core::descriptor::EntityDescriptor;
use steward_core::source::SourceKind;
use steward_core::value::Value;
use steward_store::adapter::{Record, StoreAdapter};
use steward_store::error::StoreResult;
use steward_store::managed::ObjectInstance;

/// Counts reads passing through to the wrapped adapter.
pub struct CountingAdapter {
    inner: Arc<dyn StoreAdapter>,
    reads: AtomicUsize,
}

impl CountingAdapter {
    /// Wraps an adapter.
    pub fn new(inner: Arc<dyn StoreAdapter>) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    /// Returns how many read operations have been executed.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreAdapter for CountingAdapter {
    fn kind(&self) -> SourceKind {
        self.inner.kind()
    }

    async fn ensure_storage(&self, descriptor: &EntityDescriptor) -> StoreResult<()> {
        self.inner.ensure_storage(descriptor).await
    }

    async fn find_by_id(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<Record> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(descriptor, id).await
    }

    async fn find_all(&self, descriptor: &EntityDescriptor) -> StoreResult<Vec<Record>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all(descriptor).await
    }

    async fn find_by_key(
        &self,
        descriptor: &EntityDescriptor,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Record>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_key(descriptor, field, value).await
    }

    async fn save(&self, descriptor: &EntityDescriptor, record: Record) -> StoreResult<Value> {
        self.inner.save(descriptor, record).await
    }

    async fn save_object(
        &self,
        descriptor: &EntityDescriptor,
        instance: ObjectInstance,
    ) -> StoreResult<Value> {
        self.inner.save_object(descriptor, instance).await
    }

    async fn update(
        &self,
        descriptor: &EntityDescriptor,
        id: &Value,
        record: Record,
    ) -> StoreResult<()> {
        self.inner.update(descriptor, id, record).await
    }

    async fn update_object(
        &self,
        descriptor: &EntityDescriptor,
        id: &Value,
        instance: ObjectInstance,
    ) -> StoreResult<()> {
        self.inner.update_object(descriptor, id, instance).await
    }

    async fn delete(&self, descriptor: &EntityDescriptor, id: &Value) -> StoreResult<()> {
        self.inner.delete(descriptor, id).await
    }
}
