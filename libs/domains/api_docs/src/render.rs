//! Minimal template renderer
//!
//! Two constructs only:
//! - `{{#name}} ... {{/name}}` repeats the fragment once per item of the list
//!   `name`, resolving `{{alias.field}}` from the item (any alias word);
//! - `{{name}}` is replaced by the scalar `name`.
//!
//! Blocks are expanded first, then scalars. Missing values render as empty
//! text. Nothing is escaped. Inserted values are never scanned again, so
//! marker-shaped data is emitted as-is.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static BLOCK_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{#(\w+)\}\}").unwrap());
static ITEM_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{\w+\.(\w+)\}\}").unwrap());
static SCALAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());

/// Field values of one list item
pub type RenderItem = HashMap<String, String>;

/// Variables available to a single [`render`] call.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    scalars: HashMap<String, String>,
    lists: HashMap<String, Vec<RenderItem>>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.scalars.insert(name.into(), value.into());
        self
    }

    pub fn with_list(mut self, name: impl Into<String>, items: Vec<RenderItem>) -> Self {
        self.lists.insert(name.into(), items);
        self
    }

    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.scalars.get(name).map(String::as_str)
    }

    pub fn list(&self, name: &str) -> Option<&[RenderItem]> {
        self.lists.get(name).map(Vec::as_slice)
    }
}

/// Builds a [`RenderItem`] from `(field, value)` pairs.
pub fn item<I, K, V>(fields: I) -> RenderItem
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Output pieces: template text still subject to the scalar pass, or data
/// that is emitted verbatim.
enum Segment<'t, 'c> {
    Template(&'t str),
    Data(&'c str),
}

pub fn render(template: &str, context: &RenderContext) -> String {
    let segments = expand_blocks(template, context);

    let mut out = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Template(text) => {
                let replaced = SCALAR.replace_all(text, |caps: &regex::Captures| {
                    context.scalar(&caps[1]).unwrap_or_default().to_string()
                });
                out.push_str(&replaced);
            }
            Segment::Data(text) => out.push_str(text),
        }
    }
    out
}

fn expand_blocks<'t, 'c>(template: &'t str, context: &'c RenderContext) -> Vec<Segment<'t, 'c>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(caps) = BLOCK_OPEN.captures(rest) {
        let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let close_marker = format!("{{{{/{}}}}}", name.as_str());
        let after_open = &rest[open.end()..];

        let Some(close_at) = after_open.find(&close_marker) else {
            // unmatched opener stays literal
            segments.push(Segment::Template(&rest[..open.end()]));
            rest = after_open;
            continue;
        };

        segments.push(Segment::Template(&rest[..open.start()]));

        let fragment = &after_open[..close_at];
        if let Some(items) = context.list(name.as_str()) {
            for item in items {
                expand_fragment(fragment, item, &mut segments);
            }
        }

        rest = &after_open[close_at + close_marker.len()..];
    }

    segments.push(Segment::Template(rest));
    segments
}

fn expand_fragment<'t, 'c>(fragment: &'t str, item: &'c RenderItem, segments: &mut Vec<Segment<'t, 'c>>) {
    let mut last = 0;
    for caps in ITEM_REF.captures_iter(fragment) {
        let (Some(whole), Some(field)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        segments.push(Segment::Template(&fragment[last..whole.start()]));
        if let Some(value) = item.get(field.as_str()) {
            segments.push(Segment::Data(value));
        }
        last = whole.end();
    }
    segments.push(Segment::Template(&fragment[last..]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apis(titles: &[(&str, &str)]) -> Vec<RenderItem> {
        titles
            .iter()
            .map(|(key, title)| item([("key", *key), ("title", *title)]))
            .collect()
    }

    #[test]
    fn test_block_repeats_per_item_in_order() {
        let template = "<ul>{{#apis}}<li>{{api.key}}={{api.title}}</li>{{/apis}}</ul>";
        let context = RenderContext::new()
            .with_list("apis", apis(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")]));

        let html = render(template, &context);

        assert_eq!(
            html,
            "<ul><li>a=Alpha</li><li>b=Beta</li><li>c=Gamma</li></ul>"
        );
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_missing_list_collapses_block() {
        let template = "before{{#apis}}<li>{{api.key}}</li>{{/apis}}after";
        assert_eq!(render(template, &RenderContext::new()), "beforeafter");
    }

    #[test]
    fn test_scalar_as_list_name_collapses_block() {
        let template = "[{{#apis}}x{{/apis}}]";
        let context = RenderContext::new().with("apis", "not a list");
        assert_eq!(render(template, &context), "[]");
    }

    #[test]
    fn test_missing_scalar_is_empty() {
        let template = "<title>{{title}}</title><p>{{missing}}</p>";
        let context = RenderContext::new().with("title", "Docs");
        assert_eq!(render(template, &context), "<title>Docs</title><p></p>");
    }

    #[test]
    fn test_missing_item_field_is_empty() {
        let template = "{{#apis}}<a class=\"{{api.active}}\">{{api.key}}</a>{{/apis}}";
        let context = RenderContext::new().with_list("apis", apis(&[("a", "Alpha")]));
        assert_eq!(render(template, &context), "<a class=\"\">a</a>");
    }

    #[test]
    fn test_scalars_inside_blocks_are_substituted() {
        let template = "{{#apis}}{{api.key}}@{{host}};{{/apis}}";
        let context = RenderContext::new()
            .with("host", "docs")
            .with_list("apis", apis(&[("a", "A"), ("b", "B")]));
        assert_eq!(render(template, &context), "a@docs;b@docs;");
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        let template = "{{body}}|{{#apis}}{{api.title}}{{/apis}}";
        let context = RenderContext::new()
            .with("body", "{{secret}}")
            .with("secret", "leaked")
            .with_list("apis", apis(&[("a", "{{secret}}")]));

        assert_eq!(render(template, &context), "{{secret}}|{{secret}}");
    }

    #[test]
    fn test_multiple_blocks_and_multiline_fragment() {
        let template = "{{#left}}\n  <i>{{x.v}}</i>\n{{/left}}-{{#right}}{{y.v}}{{/right}}";
        let context = RenderContext::new()
            .with_list("left", vec![item([("v", "1")])])
            .with_list("right", vec![item([("v", "2")]), item([("v", "3")])]);

        assert_eq!(render(template, &context), "\n  <i>1</i>\n-23");
    }

    #[test]
    fn test_unmatched_block_marker_is_left_alone() {
        let template = "{{#apis}}<li>{{title}}</li>";
        let context = RenderContext::new().with("title", "T");
        assert_eq!(render(template, &context), "{{#apis}}<li>T</li>");
    }
}
