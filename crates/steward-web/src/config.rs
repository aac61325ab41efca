// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Admin console configuration.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// AdminConfig
// =============================================================================

/// Configuration for an admin site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Base path all admin routes are mounted under.
    pub base_path: String,
    /// Whether routes are gated behind a session.
    pub authentication: bool,
    /// Display name of the seeded administrator.
    pub admin_name: String,
    /// Username of the seeded administrator.
    pub admin_username: String,
    /// Plaintext password of the seeded administrator; hashed before it is
    /// stored, never persisted as-is.
    pub admin_password: String,
    /// Session lifetime in seconds.
    pub session_ttl_secs: i64,
    /// Directory uploaded files default to when a field has no explicit
    /// storage dir.
    pub uploads_dir: PathBuf,
    /// Optional favicon path served by the host.
    pub favicon: Option<String>,
    /// Per-view template overrides (view name to template name).
    pub templates: HashMap<String, String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_path: "/admin".to_string(),
            authentication: true,
            admin_name: "Administrator".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            session_ttl_secs: 30 * 60,
            uploads_dir: PathBuf::from("uploads"),
            favicon: None,
            templates: HashMap::new(),
        }
    }
}

impl AdminConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base path.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = normalize_base_path(base_path.into());
        self
    }

    /// Enables or disables session gating.
    pub fn with_authentication(mut self, enabled: bool) -> Self {
        self.authentication = enabled;
        self
    }

    /// Sets the seeded administrator account.
    pub fn with_admin(
        mut self,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.admin_name = name.into();
        self.admin_username = username.into();
        self.admin_password = password.into();
        self
    }

    /// Sets the session lifetime in seconds.
    pub fn with_session_ttl_secs(mut self, secs: i64) -> Self {
        self.session_ttl_secs = secs;
        self
    }

    /// Sets the default uploads directory.
    pub fn with_uploads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.uploads_dir = dir.into();
        self
    }

    /// Overrides the template used for a view.
    pub fn with_template(mut self, view: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(view.into(), template.into());
        self
    }

    /// Returns the login route path.
    pub fn login_path(&self) -> String {
        format!("{}/login", self.base_path)
    }

    /// Returns the dashboard route path.
    pub fn index_path(&self) -> String {
        self.base_path.clone()
    }
}

/// Trims trailing slashes and guarantees a leading one.
fn normalize_base_path(raw: String) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.base_path, "/admin");
        assert!(config.authentication);
        assert_eq!(config.login_path(), "/admin/login");
    }

    #[test]
    fn test_base_path_normalization() {
        let config = AdminConfig::new().with_base_path("console/");
        assert_eq!(config.base_path, "/console");

        let config = AdminConfig::new().with_base_path("/ops");
        assert_eq!(config.base_path, "/ops");
    }

    #[test]
    fn test_template_override() {
        let config = AdminConfig::new().with_template("list", "custom/list");
        assert_eq!(config.templates.get("list").unwrap(), "custom/list");
    }
}
