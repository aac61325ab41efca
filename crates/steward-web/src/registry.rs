// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Admin site registry.
//!
//! The [`AdminSite`] façade accumulates entity definitions at configuration
//! time: each `add_view` derives the storage name, builds the entity
//! descriptor, provisions storage, and prepares the per-entity route
//! context the controller dispatches on. Registration errors are fatal for
//! the offending entity and surface before the site starts serving.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use convert_case::{Case, Casing};

use steward_core::descriptor::{DescriptorBuilder, EntityDescriptor};
use steward_core::password::hash_password;
use steward_core::session::SessionManager;
use steward_core::source::{ColumnDef, EntitySource, SourceKind, SqlType, TableDef};
use steward_core::value::Value;
use steward_store::adapter::{Record, StoreAdapter};
use steward_store::managed::ObjectFactory;
use steward_store::{DocumentAdapter, ManagedObjectAdapter, RelationalAdapter};

use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use crate::render::{HtmlRenderer, TemplateRenderer};

// =============================================================================
// EntityContext
// =============================================================================

/// Per-entity routing context.
///
/// Owns the entity's descriptors exclusively; contexts are never shared
/// across entities.
pub struct EntityContext {
    /// URL segment and storage name.
    pub slug: String,
    /// Entity display name.
    pub name: String,
    /// Full descriptor used for create/edit.
    pub descriptor: EntityDescriptor,
    /// Possibly narrowed descriptor used for list rendering only.
    pub list_descriptor: EntityDescriptor,
    /// The adapter serving this entity's storage paradigm.
    pub adapter: Arc<dyn StoreAdapter>,
    /// Object factory for managed-object writes.
    pub factory: Option<ObjectFactory>,
}

impl std::fmt::Debug for EntityContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityContext")
            .field("slug", &self.slug)
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .field("list_descriptor", &self.list_descriptor)
            .field("adapter", &"<dyn StoreAdapter>")
            .field("factory", &self.factory)
            .finish()
    }
}

/// Per-view registration options.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Narrows the list view to these fields (primary key always kept).
    pub list_fields: Option<Vec<String>>,
}

// =============================================================================
// AdminSite
// =============================================================================

/// Top-level admin console façade.
///
/// # Example
///
/// ```rust,ignore
/// let mut site = AdminSite::new(AdminConfig::default());
/// site.add_view(table_def.into()).await?;
/// let router = site.router();
/// axum::serve(listener, router).await?;
/// ```
pub struct AdminSite {
    config: AdminConfig,
    sessions: Arc<SessionManager>,
    renderer: Arc<dyn TemplateRenderer>,
    relational: Arc<dyn StoreAdapter>,
    managed: Arc<dyn StoreAdapter>,
    document: Arc<dyn StoreAdapter>,
    entities: Vec<Arc<EntityContext>>,
    principal: Option<Arc<EntityContext>>,
}

impl AdminSite {
    /// Creates a site over the bundled in-memory adapters.
    pub fn new(config: AdminConfig) -> Self {
        Self {
            config,
            sessions: Arc::new(SessionManager::new()),
            renderer: Arc::new(HtmlRenderer::new()),
            relational: Arc::new(RelationalAdapter::new()),
            managed: Arc::new(ManagedObjectAdapter::new()),
            document: Arc::new(DocumentAdapter::new()),
            entities: Vec::new(),
            principal: None,
        }
    }

    /// Replaces the template renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replaces the relational adapter.
    pub fn with_relational_adapter(mut self, adapter: Arc<dyn StoreAdapter>) -> Self {
        self.relational = adapter;
        self
    }

    /// Replaces the managed-object adapter.
    pub fn with_managed_adapter(mut self, adapter: Arc<dyn StoreAdapter>) -> Self {
        self.managed = adapter;
        self
    }

    /// Replaces the document adapter.
    pub fn with_document_adapter(mut self, adapter: Arc<dyn StoreAdapter>) -> Self {
        self.document = adapter;
        self
    }

    /// Registers an entity with default options.
    pub async fn add_view(&mut self, source: EntitySource) -> AdminResult<()> {
        self.add_view_with(source, ViewOptions::default()).await
    }

    /// Registers several entities with default options.
    pub async fn add_views(&mut self, sources: Vec<EntitySource>) -> AdminResult<()> {
        for source in sources {
            self.add_view(source).await?;
        }
        Ok(())
    }

    /// Registers an entity.
    ///
    /// Derives the storage name, builds the descriptor, provisions storage
    /// through the paradigm's adapter, and — on the first registration with
    /// authentication enabled — provisions the administrative principal
    /// entity.
    ///
    /// # Errors
    ///
    /// Schema errors abort the registration of this entity; storage errors
    /// from provisioning propagate unchanged.
    pub async fn add_view_with(
        &mut self,
        source: EntitySource,
        options: ViewOptions,
    ) -> AdminResult<()> {
        if self.config.authentication && self.principal.is_none() {
            self.provision_principal().await?;
        }

        let context = self.build_context(&source, &options).await?;
        tracing::info!(entity = %context.name, slug = %context.slug, kind = %context.descriptor.source, "Registered admin view");
        self.entities.push(context);
        Ok(())
    }

    async fn build_context(
        &self,
        source: &EntitySource,
        options: &ViewOptions,
    ) -> AdminResult<Arc<EntityContext>> {
        let storage_name = derive_storage_name(source.name());
        let descriptor = DescriptorBuilder::build(source, &storage_name)?;

        let list_descriptor = match &options.list_fields {
            Some(fields) => {
                let names: Vec<&str> = fields.iter().map(String::as_str).collect();
                descriptor.narrowed(&names)
            }
            None => descriptor.clone(),
        };

        let adapter = self.adapter_for(source.kind());
        adapter.ensure_storage(&descriptor).await?;

        let factory = match source {
            EntitySource::Object(def) => Some(ObjectFactory::from_def(def)),
            _ => None,
        };

        Ok(Arc::new(EntityContext {
            slug: storage_name,
            name: source.name().to_string(),
            descriptor,
            list_descriptor,
            adapter,
            factory,
        }))
    }

    fn adapter_for(&self, kind: SourceKind) -> Arc<dyn StoreAdapter> {
        match kind {
            SourceKind::Relational => self.relational.clone(),
            SourceKind::ManagedObject => self.managed.clone(),
            SourceKind::Document => self.document.clone(),
        }
    }

    /// Provisions the administrative principal entity and seeds the
    /// configured account if it does not exist yet.
    async fn provision_principal(&mut self) -> AdminResult<()> {
        let source: EntitySource = principal_table().into();
        let context = self.build_context(&source, &ViewOptions::default()).await?;

        let existing = context
            .adapter
            .find_by_key(
                &context.descriptor,
                "username",
                &Value::Text(self.config.admin_username.clone()),
            )
            .await?;

        if existing.is_none() {
            let now = Value::DateTime(Utc::now());
            let record = Record::from([
                (
                    "username".to_string(),
                    Value::Text(self.config.admin_username.clone()),
                ),
                (
                    "password".to_string(),
                    Value::Text(hash_password(&self.config.admin_password)?),
                ),
                ("role".to_string(), Value::Text("admin".to_string())),
                ("created".to_string(), now.clone()),
                ("modified".to_string(), now),
            ]);
            context.adapter.save(&context.descriptor, record).await?;
            tracing::info!(username = %self.config.admin_username, "Seeded administrator account");
        }

        self.principal = Some(context.clone());
        self.entities.push(context);
        Ok(())
    }

    /// Finalizes the site into an axum router.
    pub fn router(self) -> axum::Router {
        let state = AdminState::from_site(self);
        crate::routes::router(state)
    }

    /// Finalizes the site into shared request state, for hosts that mount
    /// routes themselves.
    pub fn into_state(self) -> AdminState {
        AdminState::from_site(self)
    }
}

/// Derives the table/collection name for an entity.
fn derive_storage_name(entity_name: &str) -> String {
    entity_name.to_case(Case::Snake)
}

/// The auto-provisioned administrative principal table.
fn principal_table() -> TableDef {
    TableDef::new("AdminUser")
        .column(ColumnDef::new("id", SqlType::Integer).primary_key())
        .column(ColumnDef::new("username", SqlType::Varchar))
        .column(ColumnDef::new("password", SqlType::Varchar))
        .column(ColumnDef::new("role", SqlType::Varchar))
        .column(ColumnDef::new("created", SqlType::Timestamp))
        .column(ColumnDef::new("modified", SqlType::Timestamp))
}

// =============================================================================
// AdminState
// =============================================================================

/// Shared request state handed to every handler.
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<SiteInner>,
}

struct SiteInner {
    config: AdminConfig,
    sessions: Arc<SessionManager>,
    renderer: Arc<dyn TemplateRenderer>,
    entities: Vec<Arc<EntityContext>>,
    by_slug: HashMap<String, Arc<EntityContext>>,
    principal: Option<Arc<EntityContext>>,
}

impl AdminState {
    fn from_site(site: AdminSite) -> Self {
        let by_slug = site
            .entities
            .iter()
            .map(|ctx| (ctx.slug.clone(), ctx.clone()))
            .collect();

        Self {
            inner: Arc::new(SiteInner {
                config: site.config,
                sessions: site.sessions,
                renderer: site.renderer,
                entities: site.entities,
                by_slug,
                principal: site.principal,
            }),
        }
    }

    /// Returns the site configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Returns the session store.
    pub fn sessions(&self) -> &SessionManager {
        &self.inner.sessions
    }

    /// Returns the template renderer.
    pub fn renderer(&self) -> &dyn TemplateRenderer {
        self.inner.renderer.as_ref()
    }

    /// Returns the registered entities in registration order.
    pub fn entities(&self) -> &[Arc<EntityContext>] {
        &self.inner.entities
    }

    /// Looks an entity up by its URL slug.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] for unknown slugs.
    pub fn entity(&self, slug: &str) -> AdminResult<Arc<EntityContext>> {
        self.inner
            .by_slug
            .get(slug)
            .cloned()
            .ok_or_else(|| AdminError::not_found(format!("entity '{}'", slug)))
    }

    /// Returns the administrative principal context, when provisioned.
    pub fn principal(&self) -> Option<&Arc<EntityContext>> {
        self.inner.principal.as_ref()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use steward_core::source::{DocumentDef, PropType, PropertyDef};

    fn widget_table() -> TableDef {
        TableDef::new("ProductWidget")
            .column(ColumnDef::new("id", SqlType::Integer).primary_key())
            .column(ColumnDef::new("name", SqlType::Varchar))
    }

    #[test]
    fn test_derive_storage_name() {
        assert_eq!(derive_storage_name("ProductWidget"), "product_widget");
        assert_eq!(derive_storage_name("AdminUser"), "admin_user");
        assert_eq!(derive_storage_name("orders"), "orders");
    }

    #[tokio::test]
    async fn test_add_view_registers_entity() {
        let mut site = AdminSite::new(AdminConfig::default().with_authentication(false));
        site.add_view(widget_table().into()).await.unwrap();

        let state = site.into_state();
        assert_eq!(state.entities().len(), 1);
        let ctx = state.entity("product_widget").unwrap();
        assert_eq!(ctx.name, "ProductWidget");
        assert_eq!(ctx.descriptor.primary_key().name, "id");
    }

    #[tokio::test]
    async fn test_unknown_slug_not_found() {
        let site = AdminSite::new(AdminConfig::default().with_authentication(false));
        let state = site.into_state();
        assert!(matches!(
            state.entity("ghosts").unwrap_err(),
            AdminError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_principal_provisioned_once() {
        let mut site = AdminSite::new(
            AdminConfig::default().with_admin("Root", "root", "hunter2"),
        );
        site.add_view(widget_table().into()).await.unwrap();
        site.add_view(
            DocumentDef::new("Note")
                .property(PropertyDef::new("id", PropType::Str).primary_key())
                .into(),
        )
        .await
        .unwrap();

        let state = site.into_state();
        // admin_user + the two registered views.
        assert_eq!(state.entities().len(), 3);

        let principal = state.principal().unwrap();
        let stored = principal
            .adapter
            .find_by_key(
                &principal.descriptor,
                "username",
                &Value::Text("root".into()),
            )
            .await
            .unwrap()
            .unwrap();

        let hash = stored.get("password").unwrap().as_str().unwrap();
        assert_ne!(hash, "hunter2");
        assert!(steward_core::password::verify_password("hunter2", hash).unwrap());
    }

    #[tokio::test]
    async fn test_schema_error_aborts_registration() {
        let mut site = AdminSite::new(AdminConfig::default().with_authentication(false));
        let orphan = TableDef::new("Orphan").column(ColumnDef::new("label", SqlType::Varchar));
        let err = site.add_view(orphan.into()).await.unwrap_err();
        assert!(matches!(err, AdminError::Schema(_)));

        let state = site.into_state();
        assert!(state.entities().is_empty());
    }

    #[tokio::test]
    async fn test_list_field_filter() {
        let mut site = AdminSite::new(AdminConfig::default().with_authentication(false));
        let table = widget_table().column(ColumnDef::new("notes", SqlType::Text));
        site.add_view_with(
            table.into(),
            ViewOptions {
                list_fields: Some(vec!["name".into()]),
            },
        )
        .await
        .unwrap();

        let state = site.into_state();
        let ctx = state.entity("product_widget").unwrap();
        assert_eq!(ctx.list_descriptor.headers(), vec!["id", "name"]);
        assert_eq!(ctx.descriptor.fields.len(), 3);
    }
}
