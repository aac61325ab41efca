// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Template renderer seam.
//!
//! The route controller builds a transient view-model map per request and
//! hands it to a [`TemplateRenderer`] together with a view name and a
//! default template name; per-view overrides from configuration take
//! precedence over the default. Hosts plug their own engine in behind the
//! trait; the bundled [`HtmlRenderer`] covers the standard views so the
//! console works out of the box.

use serde_json::Value as Json;

use crate::error::{AdminError, AdminResult};

/// A transient per-request view model, never reused across requests.
pub type ViewModel = serde_json::Map<String, Json>;

// =============================================================================
// TemplateRenderer Trait
// =============================================================================

/// Renders a view model into response markup.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `view` using `template`, consuming the view model.
    ///
    /// # Errors
    ///
    /// [`AdminError::Render`] when the template cannot be produced.
    fn render(&self, view: &str, template: &str, model: &ViewModel) -> AdminResult<String>;
}

// =============================================================================
// HtmlRenderer
// =============================================================================

/// The bundled renderer for the standard admin views.
///
/// Emits deliberately plain markup; anything beyond page structure is the
/// host renderer's business.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Creates the bundled renderer.
    pub fn new() -> Self {
        Self
    }

    fn page(title: &str, body: String) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
            escape(title),
            body
        )
    }

    fn render_index(model: &ViewModel) -> String {
        let title = text(model, "title");
        let mut body = format!("<h1>{}</h1>\n<ul>\n", escape(&title));
        for entity in array(model, "entities") {
            let slug = entity.get("slug").and_then(Json::as_str).unwrap_or("");
            let name = entity.get("name").and_then(Json::as_str).unwrap_or(slug);
            let base = text(model, "base_path");
            body.push_str(&format!(
                "<li><a href=\"{}/{}/list\">{}</a></li>\n",
                base,
                slug,
                escape(name)
            ));
        }
        body.push_str("</ul>");
        Self::page(&title, body)
    }

    fn render_list(model: &ViewModel) -> String {
        let title = text(model, "title");
        let mut body = String::new();
        if let Some(message) = model.get("message").and_then(Json::as_str) {
            body.push_str(&format!("<p class=\"flash\">{}</p>\n", escape(message)));
        }
        body.push_str(&format!("<h1>{}</h1>\n<table>\n<tr>", escape(&title)));
        for header in array(model, "headers") {
            body.push_str(&format!(
                "<th>{}</th>",
                escape(header.as_str().unwrap_or(""))
            ));
        }
        body.push_str("</tr>\n");
        for row in array(model, "rows") {
            body.push_str("<tr>");
            for cell in row.as_array().cloned().unwrap_or_default() {
                body.push_str(&format!("<td>{}</td>", render_cell(&cell)));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("</table>");
        Self::page(&title, body)
    }

    fn render_form(model: &ViewModel) -> String {
        let title = text(model, "title");
        let action = text(model, "action");
        let multipart = model
            .get("multipart")
            .and_then(Json::as_bool)
            .unwrap_or(false);
        let enctype = if multipart {
            " enctype=\"multipart/form-data\""
        } else {
            ""
        };

        let mut body = String::new();
        if let Some(message) = model.get("message").and_then(Json::as_str) {
            body.push_str(&format!("<p class=\"flash\">{}</p>\n", escape(message)));
        }
        body.push_str(&format!(
            "<h1>{}</h1>\n<form method=\"post\" action=\"{}\"{}>\n",
            escape(&title),
            action,
            enctype
        ));

        for field in array(model, "fields") {
            body.push_str(&render_input(&field));
        }

        body.push_str("<button type=\"submit\">Save</button>\n</form>");
        Self::page(&title, body)
    }

    fn render_login(model: &ViewModel) -> String {
        let action = text(model, "action");
        let mut body = String::new();
        if let Some(message) = model.get("error").and_then(Json::as_str) {
            body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
        }
        body.push_str(&format!(
            "<h1>Sign in</h1>\n<form method=\"post\" action=\"{}\">\n\
             <label>Username <input type=\"text\" name=\"username\"></label>\n\
             <label>Password <input type=\"password\" name=\"password\"></label>\n\
             <button type=\"submit\">Sign in</button>\n</form>",
            action
        ));
        Self::page("Sign in", body)
    }

    fn render_confirm(model: &ViewModel) -> String {
        let title = text(model, "title");
        let message = text(model, "message");
        let body = format!("<h1>{}</h1>\n<p>{}</p>", escape(&title), escape(&message));
        Self::page(&title, body)
    }
}

impl TemplateRenderer for HtmlRenderer {
    fn render(&self, view: &str, _template: &str, model: &ViewModel) -> AdminResult<String> {
        let html = match view {
            "index" => Self::render_index(model),
            "list" => Self::render_list(model),
            "form" => Self::render_form(model),
            "login" => Self::render_login(model),
            "confirm" => Self::render_confirm(model),
            other => {
                return Err(AdminError::render(format!("unknown view '{}'", other)));
            }
        };
        Ok(html)
    }
}

// =============================================================================
// Markup Helpers
// =============================================================================

/// Renders one widget-field entry from the view model.
fn render_input(field: &Json) -> String {
    let name = field.get("name").and_then(Json::as_str).unwrap_or("");
    let widget = field.get("widget").and_then(Json::as_str).unwrap_or("text");
    let value = field.get("value").and_then(Json::as_str).unwrap_or("");
    let read_only = field
        .get("read_only")
        .and_then(Json::as_bool)
        .unwrap_or(false);
    if read_only {
        return String::new();
    }

    let label = escape(name);
    match widget {
        "checkbox" => {
            let checked = field
                .get("checked")
                .and_then(Json::as_bool)
                .unwrap_or(false);
            let checked_attr = if checked { " checked" } else { "" };
            // The hidden input guarantees an explicit off value is
            // submitted for unchecked boxes.
            format!(
                "<label>{} <input type=\"hidden\" name=\"{}\" value=\"off\">\
                 <input type=\"checkbox\" name=\"{}\" value=\"on\"{}></label>\n",
                label, name, name, checked_attr
            )
        }
        "select" => {
            let mut markup = format!("<label>{} <select name=\"{}\">\n", label, name);
            for option in field
                .get("options")
                .and_then(Json::as_array)
                .cloned()
                .unwrap_or_default()
            {
                let constant = option.get("label").and_then(Json::as_str).unwrap_or("");
                let selected = option
                    .get("selected")
                    .and_then(Json::as_bool)
                    .unwrap_or(false);
                markup.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>\n",
                    escape(constant),
                    if selected { " selected" } else { "" },
                    escape(constant)
                ));
            }
            markup.push_str("</select></label>\n");
            markup
        }
        "textarea" => format!(
            "<label>{} <textarea name=\"{}\">{}</textarea></label>\n",
            label,
            name,
            escape(value)
        ),
        "file" => format!(
            "<label>{} <input type=\"file\" name=\"{}\"></label>\n",
            label, name
        ),
        "password" => format!(
            "<label>{} <input type=\"password\" name=\"{}\"></label>\n",
            label, name
        ),
        "number" => format!(
            "<label>{} <input type=\"number\" step=\"any\" name=\"{}\" value=\"{}\"></label>\n",
            label,
            name,
            escape(value)
        ),
        "date" => format!(
            "<label>{} <input type=\"date\" name=\"{}\" value=\"{}\"></label>\n",
            label,
            name,
            escape(value)
        ),
        "datetime" => format!(
            "<label>{} <input type=\"datetime-local\" name=\"{}\" value=\"{}\"></label>\n",
            label,
            name,
            escape(value)
        ),
        _ => format!(
            "<label>{} <input type=\"text\" name=\"{}\" value=\"{}\"></label>\n",
            label,
            name,
            escape(value)
        ),
    }
}

/// Renders one list cell. Boolean cells arrive with widget context and
/// come out as disabled checkboxes; everything else is escaped text.
fn render_cell(cell: &Json) -> String {
    if let Some(object) = cell.as_object() {
        let text = object.get("text").and_then(Json::as_str).unwrap_or("");
        if object.get("widget").and_then(Json::as_str) == Some("checkbox") {
            let checked = object
                .get("checked")
                .and_then(Json::as_bool)
                .unwrap_or(false);
            return format!(
                "<input type=\"checkbox\" disabled{}>",
                if checked { " checked" } else { "" }
            );
        }
        return escape(text);
    }
    escape(&json_text(cell))
}

/// Minimal HTML escaping for text nodes and attribute values.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn text(model: &ViewModel, key: &str) -> String {
    model
        .get(key)
        .and_then(Json::as_str)
        .unwrap_or("")
        .to_string()
}

fn array(model: &ViewModel, key: &str) -> Vec<Json> {
    model
        .get(key)
        .and_then(Json::as_array)
        .cloned()
        .unwrap_or_default()
}

fn json_text(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        Json::Null => String::new(),
        other => other.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
