// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # steward-web
//!
//! CRUD route controller, marshaling engine, and admin registry for the
//! Steward admin console.
//!
//! A host registers entity definitions with an [`AdminSite`], which derives
//! storage names, builds descriptors, provisions storage, and produces an
//! axum router with authenticated index/list/create/edit/delete/login/
//! logout routes per entity. Incoming form or multipart data is marshaled
//! into typed storage values; view models are handed to the pluggable
//! [`TemplateRenderer`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use steward_web::{AdminConfig, AdminSite};
//!
//! let mut site = AdminSite::new(AdminConfig::default());
//! site.add_view(widget_table.into()).await?;
//!
//! let router = site.router();
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod marshal;
pub mod registry;
pub mod render;
pub mod routes;

pub use auth::SESSION_COOKIE;
pub use config::AdminConfig;
pub use error::{AdminError, AdminResult};
pub use marshal::{marshal, parse_path_id, RawField, RawValue};
pub use registry::{AdminSite, AdminState, EntityContext, ViewOptions};
pub use render::{HtmlRenderer, TemplateRenderer, ViewModel};
pub use routes::router;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
