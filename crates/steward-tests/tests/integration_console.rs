// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Console Integration Tests
//!
//! Drives the full admin router in-process:
//!
//! - `test_auth_*`: session gating, login, logout
//! - `test_crud_*`: create/list/edit/delete round trips
//! - `test_error_*`: validation and not-found behavior

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;

use steward_store::RelationalAdapter;
use steward_tests::common::{fixtures, harness, probes::CountingAdapter};
use steward_web::{AdminConfig, AdminSite};

const BASE: &str = "/admin";

/// Builds a site with the widget table and account document registered.
async fn test_router(authentication: bool) -> Router {
    let config = AdminConfig::default()
        .with_authentication(authentication)
        .with_admin("Test Admin", "admin", "hunter2");

    let mut site = AdminSite::new(config);
    site.add_view(fixtures::widget_table().into()).await.unwrap();
    site.add_view(fixtures::account_document().into())
        .await
        .unwrap();
    site.router()
}

// =============================================================================
// Session Gating
// =============================================================================

#[tokio::test]
async fn test_auth_unauthorized_list_redirects_without_storage_read() {
    let probe = Arc::new(CountingAdapter::new(Arc::new(RelationalAdapter::new())));

    let mut site = AdminSite::new(
        AdminConfig::default().with_admin("Test Admin", "admin", "hunter2"),
    )
    .with_relational_adapter(probe.clone());
    site.add_view(fixtures::widget_table().into()).await.unwrap();
    let router = site.router();

    let reads_after_setup = probe.reads();

    let response = harness::get(&router, "/admin/widget/list", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(harness::location(&response), "/admin/login");

    // The gate rejected the request before any adapter call.
    assert_eq!(probe.reads(), reads_after_setup);
}

#[tokio::test]
async fn test_auth_login_failure_rerenders_form() {
    let router = test_router(true).await;

    let response = harness::post_form(
        &router,
        "/admin/login",
        "username=admin&password=wrong",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = harness::body_string(response).await;
    assert!(body.contains("Invalid username or password"));
}

#[tokio::test]
async fn test_auth_login_success_reaches_dashboard() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::get(&router, "/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = harness::body_string(response).await;
    assert!(body.contains("Widget"));
    assert!(body.contains("Account"));
}

#[tokio::test]
async fn test_auth_login_view_redirects_when_already_signed_in() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::get(&router, "/admin/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(harness::location(&response), "/admin");
}

#[tokio::test]
async fn test_auth_logout_invalidates_session() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::get(&router, "/admin/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cleared.contains("Max-Age=0"));

    // The server-side record is gone; the old cookie no longer passes.
    let response = harness::get(&router, "/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(harness::location(&response), "/admin/login");
}

#[tokio::test]
async fn test_auth_disabled_serves_without_cookie() {
    let router = test_router(false).await;

    let response = harness::get(&router, "/admin/widget/list", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// CRUD Round Trips
// =============================================================================

#[tokio::test]
async fn test_crud_create_then_list_round_trip() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::post_form(
        &router,
        "/admin/widget/new",
        "name=widget-1&is_active=on&weight=2.5",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        harness::location(&response),
        "/admin/widget/list?saved=1"
    );

    let response = harness::get(&router, "/admin/widget/list?saved=1", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = harness::body_string(response).await;

    // One-shot success message, the saved row, and the checked checkbox.
    assert!(body.contains("Saved record 1"));
    assert!(body.contains("<td>widget-1</td>"));
    assert!(body.contains("<input type=\"checkbox\" disabled checked>"));
}

#[tokio::test]
async fn test_crud_edit_round_trip() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    harness::post_form(
        &router,
        "/admin/widget/new",
        "name=before&is_active=off",
        Some(&cookie),
    )
    .await;

    let response = harness::post_form(
        &router,
        "/admin/widget/edit/1",
        "id=1&name=after&is_active=on",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        harness::location(&response),
        "/admin/widget/edit/1?saved=1"
    );

    let response = harness::get(&router, "/admin/widget/edit/1?saved=1", Some(&cookie)).await;
    let body = harness::body_string(response).await;
    assert!(body.contains("Saved record 1"));
    assert!(body.contains("value=\"after\""));
}

#[tokio::test]
async fn test_crud_enum_select_marks_stored_value() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::post_form(
        &router,
        "/admin/account/new",
        "email=kim%40example.com&role=EDITOR",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let id = harness::location(&response)
        .split("saved=")
        .nth(1)
        .unwrap()
        .to_string();

    let response = harness::get(
        &router,
        &format!("/admin/account/edit/{}", id),
        Some(&cookie),
    )
    .await;
    let body = harness::body_string(response).await;

    assert!(body.contains("<option value=\"EDITOR\" selected>"));
    assert!(body.contains("<option value=\"ADMIN\">"));
    assert!(body.contains("<option value=\"VIEWER\">"));
}

#[tokio::test]
async fn test_crud_delete_removes_record() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    harness::post_form(
        &router,
        "/admin/widget/new",
        "name=doomed&is_active=off",
        Some(&cookie),
    )
    .await;

    let response = harness::get(&router, "/admin/widget/delete/1", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = harness::body_string(response).await;
    assert!(body.contains("Deleted record 1"));

    let response = harness::get(&router, "/admin/widget/list", Some(&cookie)).await;
    let body = harness::body_string(response).await;
    assert!(!body.contains("doomed"));
}

#[tokio::test]
async fn test_crud_password_round_trip_via_admin_entity() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    // Creating a second administrator hashes the submitted password.
    let response = harness::post_form(
        &router,
        "/admin/admin_user/new",
        "username=bob&password=secret123&role=admin",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The stored hash is never echoed into the edit form.
    let list = harness::get(&router, "/admin/admin_user/list", Some(&cookie)).await;
    let body = harness::body_string(list).await;
    assert!(!body.contains("secret123"));

    // The new account can sign in against the stored hash.
    let second = harness::login(&router, BASE, "bob", "secret123").await;
    let response = harness::get(&router, "/admin", Some(&second)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Error Behavior
// =============================================================================

#[tokio::test]
async fn test_error_malformed_id_is_validation_error() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::get(&router, "/admin/widget/edit/not-a-number", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_unknown_entity_not_found() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::get(&router, "/admin/ghosts/list", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_unknown_record_not_found() {
    let router = test_router(true).await;
    let cookie = harness::login(&router, BASE, "admin", "hunter2").await;

    let response = harness::get(&router, "/admin/widget/edit/999", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
