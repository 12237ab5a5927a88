//! Read-only resources: server info, pattern listings and generated CSS.
//!
//! ```text
//! classmcp://info                      markdown
//! classmcp://patterns/<fw>/all         JSON array of patterns
//! classmcp://patterns/<fw>/<category>  JSON array of patterns
//! classmcp://css/<fw>/full             CSS with every state variant
//! ```

use cm_catalog::CssOptions;
use cm_core::{FrameworkId, category_display_name};

use crate::dispatcher::Dispatcher;
use crate::protocol::{ResourceContents, ResourceInfo, RpcError};

const INFO_URI: &str = "classmcp://info";
const PATTERNS_PREFIX: &str = "classmcp://patterns/";
const CSS_PREFIX: &str = "classmcp://css/";

const MARKDOWN: &str = "text/markdown";
const JSON: &str = "application/json";
const CSS: &str = "text/css";

fn info_markdown(display_name: &str) -> String {
    format!(
        "# classmcp - AI-Optimized CSS Classes

## What is classmcp?

classmcp provides semantic CSS class patterns optimized for AI code generation.
Instead of writing long utility class strings, use short semantic names.

## Why use classmcp?

1. **Token Savings**: \"btn-primary\" vs \"inline-flex items-center justify-center px-4 py-2 bg-blue-600...\"
2. **Consistency**: Pre-tested patterns that work across your app
3. **SSR-Safe**: Patterns marked for hydration safety
4. **Multi-Framework**: Works with Tailwind, Bootstrap, UnoCSS, Tachyons

## Quick Start

1. Use `list_classes` to see available patterns
2. Use `get_class` to get the utility classes for a pattern
3. Use `generate_css` to create the CSS file for your project

## Current Framework: {display_name}

Use `set_framework` to change frameworks.
"
    )
}

fn parse_framework(raw: &str) -> Result<FrameworkId, RpcError> {
    raw.parse()
        .map_err(|_| RpcError::resource_not_found(format!("Unknown framework: {raw}")))
}

impl Dispatcher {
    /// Resources for the current framework, one per category included.
    #[must_use]
    pub fn list_resources(&self) -> Vec<ResourceInfo> {
        let framework = self.framework;
        let display_name = &self.registry.config(framework).display_name;

        let mut resources = vec![
            ResourceInfo {
                uri: INFO_URI.to_owned(),
                name: "classmcp Info".to_owned(),
                description: "Information about classmcp and available frameworks".to_owned(),
                mime_type: MARKDOWN.to_owned(),
            },
            ResourceInfo {
                uri: format!("{PATTERNS_PREFIX}{framework}/all"),
                name: format!("All {display_name} Patterns"),
                description: "Complete list of all available semantic class patterns".to_owned(),
                mime_type: JSON.to_owned(),
            },
            ResourceInfo {
                uri: format!("{CSS_PREFIX}{framework}/full"),
                name: format!("Full {display_name} CSS"),
                description: "Complete CSS file with all class definitions".to_owned(),
                mime_type: CSS.to_owned(),
            },
        ];
        resources.extend(self.registry.categories(framework).into_iter().map(|category| {
            ResourceInfo {
                uri: format!("{PATTERNS_PREFIX}{framework}/{category}"),
                name: format!("{} Patterns", category_display_name(category)),
                description: format!("Class patterns for {category}"),
                mime_type: JSON.to_owned(),
            }
        }));
        resources
    }

    /// Reads one resource.
    ///
    /// Any framework can be read, not only the current one. Unknown
    /// frameworks and URIs are errors.
    pub fn read_resource(&self, uri: &str) -> Result<ResourceContents, RpcError> {
        let contents = |mime_type: &str, text: String| ResourceContents {
            uri: uri.to_owned(),
            mime_type: mime_type.to_owned(),
            text,
        };

        if uri == INFO_URI {
            let display_name = &self.registry.config(self.framework).display_name;
            return Ok(contents(MARKDOWN, info_markdown(display_name)));
        }

        if let Some((framework, category)) = uri
            .strip_prefix(PATTERNS_PREFIX)
            .and_then(|rest| rest.split_once('/'))
        {
            let framework = parse_framework(framework)?;
            let patterns = if category == "all" {
                self.registry.patterns(framework)
            } else {
                self.registry.patterns_by_category(framework, category)
            };
            let text = serde_json::to_string_pretty(&patterns).map_err(RpcError::internal)?;
            return Ok(contents(JSON, text));
        }

        if let Some(framework) = uri
            .strip_prefix(CSS_PREFIX)
            .and_then(|rest| rest.strip_suffix("/full"))
        {
            let framework = parse_framework(framework)?;
            let css = self.registry.generate_css(framework, &CssOptions::default());
            return Ok(contents(CSS, css));
        }

        Err(RpcError::resource_not_found(format!("Unknown resource: {uri}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dispatcher;
    use serde_json::Value;

    #[test]
    fn test_list_resources() {
        let (_dir, d) = dispatcher();
        let resources = d.list_resources();

        assert_eq!(resources[0].uri, "classmcp://info");
        assert_eq!(resources[1].uri, "classmcp://patterns/tailwind/all");
        assert_eq!(resources[1].name, "All Tailwind CSS Patterns");
        assert_eq!(resources[2].uri, "classmcp://css/tailwind/full");
        assert_eq!(resources[2].mime_type, "text/css");

        assert_eq!(resources[3].uri, "classmcp://patterns/tailwind/buttons");
        assert_eq!(resources[3].name, "Buttons Patterns");
        assert_eq!(resources[3].description, "Class patterns for buttons");
        assert_eq!(resources.len(), 3 + 14);
    }

    #[test]
    fn test_read_info() {
        let (_dir, mut d) = dispatcher();
        d.set_framework(FrameworkId::Tachyons);
        let info = d.read_resource("classmcp://info").unwrap();
        assert_eq!(info.mime_type, "text/markdown");
        assert!(info.text.contains("## Current Framework: Tachyons\n"));
    }

    #[test]
    fn test_read_patterns() {
        let (_dir, d) = dispatcher();
        let all = d.read_resource("classmcp://patterns/bootstrap/all").unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&all.text).unwrap();
        assert_eq!(parsed.len(), 103);
        assert_eq!(all.uri, "classmcp://patterns/bootstrap/all");

        let loading = d.read_resource("classmcp://patterns/bootstrap/loading").unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&loading.text).unwrap();
        assert!(parsed.iter().all(|p| p["category"] == "loading"));
        assert_eq!(parsed[0]["ssr"]["safe"], false);

        let empty = d.read_resource("classmcp://patterns/bootstrap/nothing").unwrap();
        assert_eq!(empty.text, "[]");
    }

    #[test]
    fn test_read_css() {
        let (_dir, d) = dispatcher();
        let css = d.read_resource("classmcp://css/unocss/full").unwrap();
        assert!(css.text.starts_with("/* Generated by classmcp - UnoCSS */\n\n/* BUTTONS */\n"));
        assert!(css.text.contains("hover:bg-blue-700"));
    }

    #[test]
    fn test_read_errors() {
        let (_dir, d) = dispatcher();
        let err = d.read_resource("classmcp://patterns/bulma/all").unwrap_err();
        assert_eq!(err.code, RpcError::RESOURCE_NOT_FOUND);
        assert_eq!(err.message, "Unknown framework: bulma");

        let err = d.read_resource("classmcp://css/bulma/full").unwrap_err();
        assert_eq!(err.message, "Unknown framework: bulma");

        let err = d.read_resource("https://example.com").unwrap_err();
        assert_eq!(err.message, "Unknown resource: https://example.com");
    }
}
