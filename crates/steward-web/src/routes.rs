// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CRUD route controller.
//!
//! One set of handlers serves every registered entity, dispatching on the
//! `{entity}` path segment through the registry's slug map. Every handler
//! runs the session gate before touching an adapter. Success messages ride
//! the redirect query string and are consumed on the next render, so
//! controllers stay stateless across requests.

use axum::{
    extract::{FromRequest, Form, Multipart, Path, Query, Request, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tower_http::trace::TraceLayer;

use steward_core::source::SourceKind;
use steward_core::value::Value;
use steward_core::widget::{map_widget, WidgetField};
use steward_store::adapter::Record;

use crate::auth::{expired_cookie, has_valid_session, require_session, session_cookie};
use crate::error::{AdminError, AdminResult};
use crate::marshal::{marshal, parse_path_id, RawField, RawValue};
use crate::registry::{AdminState, EntityContext};
use crate::render::ViewModel;

// =============================================================================
// Router Assembly
// =============================================================================

/// Builds the admin router mounted under the configured base path.
pub fn router(state: AdminState) -> Router {
    let routes = Router::new()
        .route("/", get(index))
        .route("/login", get(login_view).post(login_submit))
        .route("/logout", get(logout))
        .route("/{entity}/list", get(list_view))
        .route("/{entity}/new", get(create_view).post(create_submit))
        .route("/{entity}/edit/{id}", get(edit_view).post(edit_submit))
        .route("/{entity}/delete/{id}", get(delete_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let base = state.config().base_path.clone();
    if base == "/" {
        routes
    } else {
        Router::new().nest(&base, routes)
    }
}

// =============================================================================
// Rendering Helpers
// =============================================================================

fn model(value: serde_json::Value) -> ViewModel {
    value.as_object().cloned().unwrap_or_default()
}

/// Renders a view, honoring per-view template overrides from config.
fn render(state: &AdminState, view: &str, model: &ViewModel) -> AdminResult<Html<String>> {
    let default_template = format!("steward/{}", view);
    let template = state
        .config()
        .templates
        .get(view)
        .cloned()
        .unwrap_or(default_template);
    state.renderer().render(view, &template, model).map(Html)
}

/// One list cell: display text plus enough widget context for booleans to
/// render as checkboxes.
fn cell_json(ctx: &EntityContext, field_name: &str, record: &Record) -> serde_json::Value {
    let value = record.get(field_name);
    let text = value.map(Value::to_string).unwrap_or_default();
    match ctx.descriptor.field(field_name) {
        Some(field) => json!({
            "text": text,
            "widget": map_widget(field).to_string(),
            "checked": value.and_then(Value::as_bool).unwrap_or(false),
        }),
        None => json!({ "text": text }),
    }
}

/// Builds the headers + rows table for an entity's list descriptor.
async fn list_table(ctx: &EntityContext) -> AdminResult<(Vec<String>, Vec<serde_json::Value>)> {
    let records = ctx.adapter.find_all(&ctx.list_descriptor).await?;
    let headers: Vec<String> = ctx
        .list_descriptor
        .headers()
        .into_iter()
        .map(String::from)
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            let cells: Vec<serde_json::Value> = headers
                .iter()
                .map(|h| cell_json(ctx, h, record))
                .collect();
            json!(cells)
        })
        .collect();

    Ok((headers, rows))
}

fn flash_message(query: &HashMap<String, String>) -> Option<String> {
    query.get("saved").map(|id| format!("Saved record {}", id))
}

// =============================================================================
// Write Dispatch
// =============================================================================

/// Persists a marshaled create, routing managed objects through the
/// reconstruction factory.
async fn persist_create(ctx: &EntityContext, record: Record) -> AdminResult<Value> {
    match ctx.descriptor.source {
        SourceKind::ManagedObject => {
            let factory = ctx
                .factory
                .as_ref()
                .ok_or_else(|| AdminError::internal("managed entity without object factory"))?;
            let instance = factory.construct(record);
            Ok(ctx.adapter.save_object(&ctx.descriptor, instance).await?)
        }
        _ => Ok(ctx.adapter.save(&ctx.descriptor, record).await?),
    }
}

/// Persists a marshaled update.
async fn persist_update(ctx: &EntityContext, id: &Value, record: Record) -> AdminResult<()> {
    match ctx.descriptor.source {
        SourceKind::ManagedObject => {
            let factory = ctx
                .factory
                .as_ref()
                .ok_or_else(|| AdminError::internal("managed entity without object factory"))?;
            let instance = factory.construct(record);
            Ok(ctx.adapter.update_object(&ctx.descriptor, id, instance).await?)
        }
        _ => Ok(ctx.adapter.update(&ctx.descriptor, id, record).await?),
    }
}

// =============================================================================
// Request Body Reading
// =============================================================================

/// Reads submitted fields from a form-encoded or multipart body.
async fn read_raw_fields(req: Request) -> AdminResult<Vec<RawField>> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AdminError::validation(format!("invalid multipart body: {}", e)))?;

        let mut fields = Vec::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AdminError::validation(format!("invalid multipart part: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) if !filename.is_empty() => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AdminError::validation(format!("upload read: {}", e)))?;
                    fields.push(RawField {
                        name,
                        value: RawValue::File {
                            filename,
                            bytes: bytes.to_vec(),
                        },
                    });
                }
                _ => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AdminError::validation(format!("field read: {}", e)))?;
                    fields.push(RawField::text(name, text));
                }
            }
        }
        Ok(fields)
    } else {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, &())
            .await
            .map_err(|e| AdminError::validation(format!("invalid form body: {}", e)))?;
        Ok(pairs
            .into_iter()
            .map(|(name, value)| RawField::text(name, value))
            .collect())
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /{base}
///
/// Renders the dashboard listing every registered entity.
async fn index(State(state): State<AdminState>, headers: HeaderMap) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;

    let entities: Vec<serde_json::Value> = state
        .entities()
        .iter()
        .map(|ctx| json!({ "slug": ctx.slug, "name": ctx.name }))
        .collect();

    let view_model = model(json!({
        "title": state.config().admin_name,
        "base_path": state.config().base_path,
        "entities": entities,
    }));
    Ok(render(&state, "index", &view_model)?.into_response())
}

// =============================================================================
// List
// =============================================================================

/// GET /{base}/{entity}/list
async fn list_view(
    State(state): State<AdminState>,
    Path(entity): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;
    let ctx = state.entity(&entity)?;

    let (table_headers, rows) = list_table(&ctx).await?;
    let view_model = model(json!({
        "title": ctx.name,
        "base_path": state.config().base_path,
        "entity": ctx.slug,
        "headers": table_headers,
        "rows": rows,
        "message": flash_message(&query),
    }));
    Ok(render(&state, "list", &view_model)?.into_response())
}

// =============================================================================
// Create
// =============================================================================

/// GET /{base}/{entity}/new
async fn create_view(
    State(state): State<AdminState>,
    Path(entity): Path<String>,
    headers: HeaderMap,
) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;
    let ctx = state.entity(&entity)?;

    let fields: Vec<serde_json::Value> = ctx
        .descriptor
        .fields
        .iter()
        .filter(|f| !f.primary_key && !f.read_only)
        .map(|f| json!(WidgetField::from_field(f, None)))
        .collect();

    // Current list snapshot for page chrome.
    let (snapshot_headers, snapshot_rows) = list_table(&ctx).await?;

    let multipart = ctx.descriptor.fields.iter().any(|f| f.is_upload());
    let view_model = model(json!({
        "title": format!("New {}", ctx.name),
        "action": format!("{}/{}/new", state.config().base_path, ctx.slug),
        "multipart": multipart,
        "fields": fields,
        "snapshot": { "headers": snapshot_headers, "rows": snapshot_rows },
    }));
    Ok(render(&state, "form", &view_model)?.into_response())
}

/// POST /{base}/{entity}/new
async fn create_submit(
    State(state): State<AdminState>,
    Path(entity): Path<String>,
    headers: HeaderMap,
    req: Request,
) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;
    let ctx = state.entity(&entity)?;

    let raw = read_raw_fields(req).await?;
    let record = marshal(&ctx.descriptor.fields, raw, true).await?;
    let id = persist_create(&ctx, record).await?;

    tracing::info!(entity = %ctx.slug, id = %id, "Created record");
    let target = format!("{}/{}/list?saved={}", state.config().base_path, ctx.slug, id);
    Ok(Redirect::to(&target).into_response())
}

// =============================================================================
// Edit
// =============================================================================

/// GET /{base}/{entity}/edit/{id}
async fn edit_view(
    State(state): State<AdminState>,
    Path((entity, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;
    let ctx = state.entity(&entity)?;

    let key = parse_path_id(&ctx.descriptor.fields, &id)?;
    let record = ctx.adapter.find_by_id(&ctx.descriptor, &key).await?;

    let fields: Vec<serde_json::Value> = ctx
        .descriptor
        .fields
        .iter()
        .map(|f| {
            let mut meta = WidgetField::from_field(f, record.get(&f.name));
            // Only the relational path lets the client resubmit the key.
            if f.primary_key && ctx.descriptor.source != SourceKind::Relational {
                meta.read_only = true;
            }
            json!(meta)
        })
        .collect();

    let multipart = ctx.descriptor.fields.iter().any(|f| f.is_upload());
    let view_model = model(json!({
        "title": format!("Edit {} {}", ctx.name, id),
        "action": format!("{}/{}/edit/{}", state.config().base_path, ctx.slug, id),
        "multipart": multipart,
        "fields": fields,
        "message": flash_message(&query),
    }));
    Ok(render(&state, "form", &view_model)?.into_response())
}

/// POST /{base}/{entity}/edit/{id}
async fn edit_submit(
    State(state): State<AdminState>,
    Path((entity, id)): Path<(String, String)>,
    headers: HeaderMap,
    req: Request,
) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;
    let ctx = state.entity(&entity)?;

    let key = parse_path_id(&ctx.descriptor.fields, &id)?;
    let raw = read_raw_fields(req).await?;
    let record = marshal(&ctx.descriptor.fields, raw, false).await?;
    persist_update(&ctx, &key, record).await?;

    tracing::info!(entity = %ctx.slug, id = %key, "Updated record");
    let target = format!(
        "{}/{}/edit/{}?saved={}",
        state.config().base_path,
        ctx.slug,
        id,
        key
    );
    Ok(Redirect::to(&target).into_response())
}

// =============================================================================
// Delete
// =============================================================================

/// GET /{base}/{entity}/delete/{id}
async fn delete_view(
    State(state): State<AdminState>,
    Path((entity, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;
    let ctx = state.entity(&entity)?;

    let key = parse_path_id(&ctx.descriptor.fields, &id)?;
    ctx.adapter.delete(&ctx.descriptor, &key).await?;

    tracing::info!(entity = %ctx.slug, id = %key, "Deleted record");
    let view_model = model(json!({
        "title": ctx.name,
        "message": format!("Deleted record {}", id),
    }));
    Ok(render(&state, "confirm", &view_model)?.into_response())
}

// =============================================================================
// Login / Logout
// =============================================================================

/// Login form body.
#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

/// GET /{base}/login
async fn login_view(State(state): State<AdminState>, headers: HeaderMap) -> AdminResult<Response> {
    if !state.config().authentication || has_valid_session(state.sessions(), &headers) {
        return Ok(Redirect::to(&state.config().index_path()).into_response());
    }

    let view_model = model(json!({ "action": state.config().login_path() }));
    Ok(render(&state, "login", &view_model)?.into_response())
}

/// POST /{base}/login
///
/// Single attempt, re-checked every time; a failure re-renders the form
/// with an error message rather than surfacing an error response.
async fn login_submit(
    State(state): State<AdminState>,
    Form(form): Form<LoginForm>,
) -> AdminResult<Response> {
    if !state.config().authentication {
        return Ok(Redirect::to(&state.config().index_path()).into_response());
    }

    match verify_credentials(&state, &form.username, &form.password).await {
        Ok(principal) => {
            let ttl = chrono::Duration::seconds(state.config().session_ttl_secs);
            let token = state.sessions().set(&principal, ttl);
            tracing::info!(username = %principal, "Administrator signed in");

            let response = (
                [(header::SET_COOKIE, session_cookie(&token))],
                Redirect::to(&state.config().index_path()),
            );
            Ok(response.into_response())
        }
        Err(AdminError::Authentication { message }) => {
            tracing::debug!(username = %form.username, "Login rejected");
            let view_model = model(json!({
                "action": state.config().login_path(),
                "error": message,
            }));
            Ok(render(&state, "login", &view_model)?.into_response())
        }
        Err(other) => Err(other),
    }
}

/// Looks the principal up through the store adapter and verifies the
/// password hash.
async fn verify_credentials(
    state: &AdminState,
    username: &str,
    password: &str,
) -> AdminResult<String> {
    let principal = state
        .principal()
        .ok_or_else(|| AdminError::internal("authentication enabled without principal entity"))?;

    let record = principal
        .adapter
        .find_by_key(
            &principal.descriptor,
            "username",
            &Value::Text(username.to_string()),
        )
        .await?
        .ok_or_else(|| AdminError::authentication("Invalid username or password"))?;

    let stored = record
        .get("password")
        .and_then(Value::as_str)
        .ok_or_else(|| AdminError::authentication("Invalid username or password"))?;

    if steward_core::password::verify_password(password, stored)? {
        Ok(username.to_string())
    } else {
        Err(AdminError::authentication("Invalid username or password"))
    }
}

/// GET /{base}/logout
async fn logout(State(state): State<AdminState>, headers: HeaderMap) -> AdminResult<Response> {
    require_session(state.config(), state.sessions(), &headers)?;

    // The cookie value is invalidated client-side; the server-side record
    // lapses on its own TTL.
    if let Some(token) = crate::auth::session_token(&headers) {
        state.sessions().invalidate(&token);
    }

    let view_model = model(json!({
        "title": state.config().admin_name,
        "message": "Signed out",
    }));
    let page = render(&state, "confirm", &view_model)?;
    Ok(([(header::SET_COOKIE, expired_cookie())], page).into_response())
}
