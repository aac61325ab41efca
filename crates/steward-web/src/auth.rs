// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session gating for admin routes.
//!
//! Sessions ride an opaque cookie token resolved against the process-wide
//! [`SessionManager`]. Every route except login runs through
//! [`require_session`] before touching storage; a missing or expired
//! session short-circuits into a redirect to the login form.

use axum::http::{header, HeaderMap};

use steward_core::session::{SessionManager, SessionRecord};

use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "steward_session";

// =============================================================================
// Cookie Handling
// =============================================================================

/// Extracts the session token from the request's `Cookie` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Builds the `Set-Cookie` value that installs a session token.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// Builds the `Set-Cookie` value that clears the session client-side.
pub fn expired_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

// =============================================================================
// Session Gate
// =============================================================================

/// Resolves the request's session, redirecting to login when absent.
///
/// With authentication disabled the gate passes everything through and
/// resolves to `None`.
///
/// # Errors
///
/// [`AdminError::Unauthenticated`] when authentication is enabled and the
/// request carries no valid, unexpired session cookie.
pub fn require_session(
    config: &AdminConfig,
    sessions: &SessionManager,
    headers: &HeaderMap,
) -> AdminResult<Option<SessionRecord>> {
    if !config.authentication {
        return Ok(None);
    }

    session_token(headers)
        .and_then(|token| sessions.get(&token))
        .map(Some)
        .ok_or_else(|| AdminError::unauthenticated(config.login_path()))
}

/// Returns `true` if the request carries a valid session.
pub fn has_valid_session(sessions: &SessionManager, headers: &HeaderMap) -> bool {
    session_token(headers)
        .map(|token| sessions.get(&token).is_some())
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
