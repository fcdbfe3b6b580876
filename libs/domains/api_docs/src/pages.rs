//! Render contexts for the landing and documentation pages.
//!
//! The renderer does not escape, so every catalog value placed in a context
//! here goes through [`escape_html`] first. The embedded document goes
//! through [`script_safe_json`] instead.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{Catalog, SpecEntry};
use crate::render::{item, RenderContext};

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// JSON text that can sit inside a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, so writing them as
/// `\u003c`, `\u003e` and `\u0026` keeps the same value while no `</script>`
/// or `<!--` sequence can reach the HTML parser.
pub fn script_safe_json(value: &Value) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    Ok(out)
}

fn api_card(entry: &SpecEntry, group: &str) -> String {
    let key = escape_html(&entry.key);
    let title = escape_html(&entry.title);
    let version = escape_html(&entry.version);
    let description = escape_html(&entry.description);
    let group = escape_html(group);

    format!(
        r#"
          <a href="/api-docs/{key}" class="api-brick" data-version="{version}" data-title="{title}" data-description="{description}" data-folder="{group}">
            <div class="brick-header">
              <div class="api-title">{title}</div>
              <div class="api-version">v{version}</div>
            </div>
            <div class="api-description">
              <span class="folder-tag">{group}</span> {description}
            </div>
            <div class="brick-footer">
              <span class="view-docs">View Documentation &rarr;</span>
            </div>
          </a>
"#
    )
}

/// Landing page: `apiHtml` (cards grouped by folder), `count`, list `apis`.
pub fn landing_context(catalog: &Catalog) -> RenderContext {
    let mut groups: BTreeMap<&str, Vec<&SpecEntry>> = BTreeMap::new();
    for entry in catalog.entries() {
        groups.entry(entry.group()).or_default().push(entry);
    }

    let api_html: String = groups
        .iter()
        .flat_map(|(group, entries)| entries.iter().map(move |entry| api_card(entry, group)))
        .collect();

    let apis = catalog
        .entries()
        .map(|entry| {
            item([
                ("key", escape_html(&entry.key)),
                ("title", escape_html(&entry.title)),
                ("version", escape_html(&entry.version)),
                ("description", escape_html(&entry.description)),
                ("folder", escape_html(entry.group())),
            ])
        })
        .collect();

    RenderContext::new()
        .with("apiHtml", api_html)
        .with("count", catalog.len().to_string())
        .with_list("apis", apis)
}

/// Documentation page for `entry`: navigation over the whole catalog with
/// `entry` marked active, plus the parsed document as JSON in `spec`.
pub fn docs_context(catalog: &Catalog, entry: &SpecEntry) -> serde_json::Result<RenderContext> {
    let nav = catalog
        .entries()
        .map(|other| {
            let active = if other.key == entry.key { "active" } else { "" };
            item([
                ("key", escape_html(&other.key)),
                ("title", escape_html(&other.title)),
                ("version", escape_html(&other.version)),
                ("active", active.to_string()),
            ])
        })
        .collect();

    Ok(RenderContext::new()
        .with("title", escape_html(&format!("{} Documentation", entry.title)))
        .with("key", escape_html(&entry.key))
        .with("version", escape_html(&entry.version))
        .with("description", escape_html(&entry.description))
        .with_list("apis", nav)
        .with("spec", script_safe_json(&entry.document)?))
}
