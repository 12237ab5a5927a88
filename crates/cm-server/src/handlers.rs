//! Text rendering for each tool.
//!
//! Every handler returns markdown. Lookups that fail (unknown class,
//! framework or component) produce an explanatory message rather than an
//! error.

use std::fmt::Write as _;

use cm_catalog::{
    CssOptions, CustomOverlay, ResolveOptions, group_by_category, resolve_classes,
};
use cm_config::reload_config;
use cm_core::{ComponentPattern, FrameworkId};
use cm_minify::{MinificationMap, RenderOptions, render_css};
use tracing::{info, warn};

use crate::components::{COMPONENT_NAMES, component, minify_markup};
use crate::dispatcher::Dispatcher;
use crate::tools::{
    GenerateCssArgs, GetClassArgs, GetComponentArgs, GetSsrInfoArgs, ListClassesArgs,
    ListCustomPatternsArgs, SearchClassesArgs, SetFrameworkArgs,
};

const DEFAULT_SSR_WARNING: &str = "This class may cause hydration mismatches.";

const EXAMPLE_CONFIG: &str = "```json
{
  \"customPatterns\": [
    { \"id\": \"brand-btn\", \"classes\": \"px-4 py-2 bg-brand-600 text-white rounded-lg\" }
  ]
}
```";

/// Similar patterns offered when a lookup misses.
const MAX_SUGGESTIONS: usize = 3;

/// Custom patterns listed after a reload.
const MAX_RELOAD_LISTING: usize = 10;

/// Characters of classes shown per search hit.
const SEARCH_PREVIEW_CHARS: usize = 100;

/// Characters of classes shown per custom pattern.
const CUSTOM_PREVIEW_CHARS: usize = 60;

fn unknown_framework(requested: &str) -> String {
    format!(
        "Unknown framework: {requested}. Available: {}",
        FrameworkId::joined()
    )
}

/// First `max` characters of `text`, with `...` appended if anything was cut.
fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

fn ssr_badge(pattern: &ComponentPattern, badge: &'static str) -> &'static str {
    if pattern.is_ssr_safe() { "" } else { badge }
}

impl Dispatcher {
    fn display_name(&self) -> &str {
        &self.registry.config(self.framework).display_name
    }

    pub(crate) fn set_framework_tool(&mut self, args: &SetFrameworkArgs) -> String {
        let Ok(framework) = args.framework.parse::<FrameworkId>() else {
            return unknown_framework(&args.framework);
        };
        self.set_framework(framework);

        let stats = self.registry.stats(framework);
        format!(
            "Framework set to **{}**\n\n\
             - Total patterns: {}\n\
             - Categories: {}\n\
             - SSR-safe patterns: {}\n\
             - Patterns requiring client JS: {}",
            self.display_name(),
            stats.total_patterns,
            stats.categories,
            stats.ssr_safe_patterns,
            stats.client_only_patterns,
        )
    }

    pub(crate) fn get_class(&self, args: &GetClassArgs) -> String {
        let name = args.name.as_str();
        let Some(pattern) = self.registry.pattern(self.framework, name) else {
            return self.class_not_found(name);
        };

        if args.ssr_safe && !pattern.is_ssr_safe() {
            return format!(
                "**Warning:** \"{name}\" is not SSR-safe.\n\n{}\n\n\
                 Use `get_ssr_info` for more details or set `ssrSafe: false` to use anyway.",
                pattern.ssr_warning().unwrap_or(DEFAULT_SSR_WARNING),
            );
        }

        let options = ResolveOptions::default()
            .include_states(args.include_states)
            .ssr_safe(args.ssr_safe);
        let classes = resolve_classes(pattern, &options);

        let mut class_name = name.to_owned();
        let mut minified_info = String::new();
        if args.minified {
            let mut map = MinificationMap::new();
            let entry = map.minify(name, &classes);
            let saved = classes.len().saturating_sub(entry.minified.len());
            minified_info = format!(
                "\nMinified: `{}` (saves ~{saved} chars per usage)",
                entry.minified
            );
            class_name.clone_from(&entry.minified);
        }

        let mut out = format!(
            "**{}** ({})\n\n\
             Class: `{class_name}`{minified_info}\n\n\
             Utilities:\n```\n{classes}\n```\n\n\
             Description: {}\n",
            pattern.name, pattern.category, pattern.description,
        );
        if !pattern.is_ssr_safe() {
            let _ = write!(
                out,
                "\n**SSR Warning:** {}",
                pattern.ssr_warning().unwrap_or(DEFAULT_SSR_WARNING)
            );
        }
        let _ = write!(
            out,
            "\n\n**Usage:**\n```html\n<element class=\"{class_name}\">...</element>\n```"
        );
        out
    }

    fn class_not_found(&self, name: &str) -> String {
        let needle = name.to_lowercase();
        let similar: Vec<String> = self
            .registry
            .patterns(self.framework)
            .into_iter()
            .filter(|p| {
                p.id.contains(name) || name.contains(p.id.as_str())
                    || p.name.to_lowercase().contains(&needle)
            })
            .take(MAX_SUGGESTIONS)
            .map(|p| format!("  - {}: {}", p.id, p.description))
            .collect();

        let hint = if similar.is_empty() {
            "Use list_classes to see available classes.".to_owned()
        } else {
            format!("Did you mean:\n{}", similar.join("\n"))
        };
        format!("Class \"{name}\" not found in {}.\n\n{hint}", self.display_name())
    }

    pub(crate) fn list_classes(&self, args: &ListClassesArgs) -> String {
        let category = args.category.as_deref().filter(|c| !c.is_empty());
        let mut patterns = match category {
            Some(category) => self.registry.patterns_by_category(self.framework, category),
            None => self.registry.patterns(self.framework),
        };
        if args.ssr_safe_only {
            patterns.retain(|p| p.is_ssr_safe());
        }

        let mut out = format!("# {} Classes", self.display_name());
        if let Some(category) = category {
            let _ = write!(out, " ({category})");
        }
        if args.ssr_safe_only {
            out.push_str(" [SSR-safe only]");
        }
        let _ = write!(out, "\n\nTotal: {} patterns\n\n", patterns.len());

        for (category, group) in group_by_category(patterns) {
            let _ = writeln!(out, "## {category}");
            for p in group {
                let _ = writeln!(out, "- **{}**{}: {}", p.id, ssr_badge(p, " ⚠️"), p.description);
            }
            out.push('\n');
        }

        if args.ssr_safe_only {
            out.push_str(
                "\n_Note: ⚠️ indicates patterns that may cause hydration issues in SSR frameworks._",
            );
        }
        out
    }

    pub(crate) fn search_classes(&self, args: &SearchClassesArgs) -> String {
        let query = args.query.as_str();
        let results = self.registry.search(self.framework, query);
        if results.is_empty() {
            return format!(
                "No classes found matching \"{query}\" in {}. Try a broader search term.",
                self.display_name()
            );
        }

        let mut out = format!(
            "# Search Results for \"{query}\"\n\nFound {} matches in {}:\n\n",
            results.len(),
            self.display_name()
        );
        let options = ResolveOptions::default();
        for p in results {
            let classes = resolve_classes(p, &options);
            let _ = writeln!(out, "### {}{}", p.id, ssr_badge(p, " ⚠️ SSR"));
            let _ = writeln!(out, "- Description: {}", p.description);
            let _ = writeln!(out, "- Category: {}", p.category);
            let _ = write!(
                out,
                "- Classes: `{}`\n\n",
                preview(&classes, SEARCH_PREVIEW_CHARS)
            );
        }
        out
    }

    pub(crate) fn generate_css_tool(&self, args: GenerateCssArgs) -> String {
        let framework = self.framework;

        if args.minified {
            let map = self.registry.minify_patterns(
                framework,
                args.categories.as_deref(),
                args.include_states,
            );
            let css = render_css(&map, RenderOptions::new(framework).with_comments(false));
            let savings = map.savings();
            return format!(
                "```css\n{css}```\n\n\
                 **Minification Stats:**\n\
                 - Original tokens: ~{}\n\
                 - Minified tokens: ~{}\n\
                 - Savings: {:.1}%\n\n\
                 Add this CSS to your project. Use the minified class names (a, b, c...) in your HTML.",
                savings.total_original_tokens, savings.total_minified_tokens, savings.savings_percent,
            );
        }

        let css = self.registry.generate_css(
            framework,
            &CssOptions {
                categories: args.categories,
                include_states: args.include_states,
                minified: false,
            },
        );
        let config = self.registry.config(framework);
        let note = if config.custom_class_syntax.supports_apply() {
            format!(
                "Add this to your CSS file. The `@apply` directive requires {} to be configured.",
                config.display_name
            )
        } else {
            "Add this CSS to your project. Note: You may need to add the actual utility definitions."
                .to_owned()
        };
        format!("```css\n{css}```\n\n{note}")
    }

    pub(crate) fn get_component(&self, args: &GetComponentArgs) -> String {
        let Some(html) = component(&args.component) else {
            return format!(
                "Unknown component: {}. Available: {}",
                args.component,
                COMPONENT_NAMES.join(", ")
            );
        };

        let html = if args.minified {
            let map = self.registry.minify_patterns(self.framework, None, false);
            minify_markup(html, &map)
        } else {
            html.to_owned()
        };
        format!(
            "## {} ({})\n\n```html\n{html}\n```",
            args.component,
            self.display_name()
        )
    }

    pub(crate) fn get_ssr_info(&self, args: &GetSsrInfoArgs) -> String {
        let name = args.name.as_str();
        let Some(pattern) = self.registry.pattern(self.framework, name) else {
            return format!("Class \"{name}\" not found.");
        };

        let safe = pattern.is_ssr_safe();
        let mut out = format!("# SSR Safety Report: {name}\n\n");
        let status = if safe { "✅ SSR-Safe" } else { "⚠️ Requires Client JS" };
        let _ = write!(out, "**Status:** {status}\n\n");

        if safe {
            out.push_str(
                "This class is safe for server-side rendering and will not cause hydration mismatches.\n\n\
                 **Why it's safe:**\n\
                 - Uses only CSS pseudo-classes (hover, focus, etc.)\n\
                 - No JavaScript-controlled state\n\
                 - Server and client render identically\n",
            );
            return out;
        }

        let _ = write!(
            out,
            "**Warning:** {}\n\n",
            pattern.ssr_warning().unwrap_or(DEFAULT_SSR_WARNING)
        );
        out.push_str(
            "**Why it's not SSR-safe:**\n\
             - Contains state that may differ between server and client\n\
             - May require JavaScript to toggle classes\n",
        );
        if let Some(client_only) = pattern.client_only_classes().filter(|c| !c.is_empty()) {
            let _ = write!(
                out,
                "\n**Client-only classes:** `{client_only}`\n\
                 Consider adding these classes only after hydration.\n"
            );
        }
        out.push_str(
            "\n**Recommendations:**\n\
             1. Control visibility with server-side state when possible\n\
             2. Use `useEffect` or `onMount` to add client-only classes\n\
             3. Consider using CSS-only alternatives where available\n",
        );
        out
    }

    pub(crate) fn list_frameworks(&self) -> String {
        let mut out = format!(
            "# Available CSS Frameworks\n\nCurrent: **{}**\n\n",
            self.display_name()
        );
        for summary in self.registry.list_frameworks() {
            let stats = self.registry.stats(summary.id);
            let current = if summary.id == self.framework { " ← current" } else { "" };
            let _ = writeln!(out, "## {}{current}", summary.name);
            let _ = writeln!(out, "- ID: `{}`", summary.id);
            let _ = writeln!(out, "- Description: {}", summary.description);
            let _ = writeln!(
                out,
                "- Patterns: {} ({} SSR-safe)",
                stats.total_patterns, stats.ssr_safe_patterns
            );
            let _ = write!(out, "- Categories: {}\n\n", stats.categories);
        }
        out.push_str("Use `set_framework` to switch frameworks.");
        out
    }

    pub(crate) async fn reload_config_tool(&mut self) -> String {
        let loaded = reload_config(self.config_source.as_ref(), &self.project_dir).await;
        self.config_source.clone_from(&loaded.source);

        let Some(source) = loaded.source.as_ref() else {
            self.registry.clear_overlay();
            return format!(
                "No config file found. Create a `.classmcp.json` file to add custom patterns.\n\n\
                 Example config:\n{EXAMPLE_CONFIG}"
            );
        };

        if !loaded.is_valid() {
            warn!(%source, errors = loaded.errors.len(), "reloaded config is invalid");
            let errors: Vec<String> = loaded
                .errors
                .iter()
                .map(|e| format!("- {}: {}", e.path, e.message))
                .collect();
            return format!(
                "**Config validation errors:**\n\n{}\n\n\
                 Config file: {source}\n\n\
                 Fix the errors and run `reload_config` again.",
                errors.join("\n")
            );
        }

        self.registry
            .set_overlay(CustomOverlay::from_config(&loaded.config));
        if let Some(framework) = loaded.config.default_framework {
            self.framework = framework;
        }
        info!(%source, framework = %self.framework, "config reloaded");

        let overlay = self.registry.overlay();
        let mut out = format!(
            "**Config reloaded successfully!**\n\n\
             - Config file: `{source}`\n\
             - Custom patterns loaded: {}\n\
             - Override built-ins: {}\n",
            overlay.len(),
            overlay.override_builtins(),
        );

        if !loaded.warnings.is_empty() {
            let warnings: Vec<String> = loaded.warnings.iter().map(|w| format!("- {w}")).collect();
            let _ = write!(out, "\n**Warnings:**\n{}", warnings.join("\n"));
        }

        if !overlay.is_empty() {
            out.push_str("\n\n**Custom patterns:**\n");
            for custom in overlay.patterns().iter().take(MAX_RELOAD_LISTING) {
                let _ = writeln!(out, "- `{}`: {}", custom.id(), custom.pattern.description);
            }
            if overlay.len() > MAX_RELOAD_LISTING {
                let _ = writeln!(out, "- ... and {} more", overlay.len() - MAX_RELOAD_LISTING);
            }
        }
        out
    }

    pub(crate) fn list_custom_patterns(&self, args: &ListCustomPatternsArgs) -> String {
        let framework = match args.framework.as_deref().filter(|f| !f.is_empty()) {
            Some(requested) => match requested.parse::<FrameworkId>() {
                Ok(framework) => framework,
                Err(_) => return unknown_framework(requested),
            },
            None => self.framework,
        };

        let overlay = self.registry.overlay();
        if overlay.is_empty() {
            return format!(
                "No custom patterns loaded.\n\n\
                 To add custom patterns, create a `.classmcp.json` file:\n\n\
                 {EXAMPLE_CONFIG}\n\n\
                 Then use `reload_config` to load them."
            );
        }

        let applicable: Vec<&ComponentPattern> = self
            .registry
            .customs_for(framework)
            .map(|custom| &custom.pattern)
            .collect();

        let mut out = format!(
            "# Custom Patterns\n\nTotal: {} custom patterns ({} for {framework})\n\n",
            overlay.len(),
            applicable.len()
        );

        if applicable.is_empty() {
            let _ = writeln!(out, "No custom patterns are configured for {framework}.");
        } else {
            for (category, group) in group_by_category(applicable) {
                let _ = writeln!(out, "## {category}");
                for p in group {
                    let _ = writeln!(
                        out,
                        "- **{}**: `{}`",
                        p.id,
                        preview(p.classes.base(), CUSTOM_PREVIEW_CHARS)
                    );
                }
                out.push('\n');
            }
        }

        if let Some(source) = &self.config_source {
            let _ = write!(out, "\n_Config file: {source}_");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{call, dispatcher};
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_preview() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
        assert_eq!(preview("äöü", 2), "äö...");
    }

    #[tokio::test]
    async fn test_set_framework() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "set_framework", json!({"framework": "bootstrap"})).await;
        assert_eq!(
            text,
            "Framework set to **Bootstrap 5**\n\n\
             - Total patterns: 103\n\
             - Categories: 13\n\
             - SSR-safe patterns: 99\n\
             - Patterns requiring client JS: 4"
        );
        assert_eq!(d.framework(), FrameworkId::Bootstrap);
    }

    #[tokio::test]
    async fn test_set_unknown_framework() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "set_framework", json!({"framework": "bulma"})).await;
        assert_eq!(
            text,
            "Unknown framework: bulma. Available: tailwind, bootstrap, unocss, tachyons"
        );
        assert_eq!(d.framework(), FrameworkId::Tailwind);
    }

    #[tokio::test]
    async fn test_get_class() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "get_class", json!({"name": "flex-start"})).await;
        insta::assert_snapshot!(text, @r#"
        **Flex Start** (layout)

        Class: `flex-start`

        Utilities:
        ```
        flex items-center justify-start
        ```

        Description: Flex aligned to start


        **Usage:**
        ```html
        <element class="flex-start">...</element>
        ```
        "#);
    }

    #[tokio::test]
    async fn test_get_class_minified() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "get_class", json!({"name": "flex-start", "minified": true})).await;
        assert!(text.contains("Class: `a`\nMinified: `a` (saves ~30 chars per usage)\n\n"));
        assert!(text.ends_with("<element class=\"a\">...</element>\n```"));
    }

    #[tokio::test]
    async fn test_get_class_states() {
        let (_dir, mut d) = dispatcher();
        d.set_framework(FrameworkId::Unocss);

        let with_states = call(&mut d, "get_class", json!({"name": "btn-primary"})).await;
        assert!(with_states.contains("transition-colors hover:bg-blue-700 focus:outline-none"));
        assert!(with_states.contains("disabled:cursor-not-allowed\n```"));

        let base_only = call(
            &mut d,
            "get_class",
            json!({"name": "btn-primary", "includeStates": false}),
        )
        .await;
        assert!(base_only.contains("rounded-lg transition-colors\n```"));

        let ssr_safe = call(&mut d, "get_class", json!({"name": "btn-primary", "ssrSafe": true})).await;
        assert!(ssr_safe.contains("rounded-lg transition-colors\n```"));
    }

    #[tokio::test]
    async fn test_get_class_ssr_unsafe() {
        let (_dir, mut d) = dispatcher();
        d.set_framework(FrameworkId::Bootstrap);

        let refused = call(&mut d, "get_class", json!({"name": "modal", "ssrSafe": true})).await;
        assert_eq!(
            refused,
            "**Warning:** \"modal\" is not SSR-safe.\n\n\
             Bootstrap modals require JS to show/hide. Consider SSR-friendly alternatives.\n\n\
             Use `get_ssr_info` for more details or set `ssrSafe: false` to use anyway."
        );

        let allowed = call(&mut d, "get_class", json!({"name": "modal"})).await;
        assert!(allowed.contains(
            "\n**SSR Warning:** Bootstrap modals require JS to show/hide. Consider SSR-friendly alternatives.\n\n**Usage:**"
        ));
    }

    #[tokio::test]
    async fn test_get_class_not_found() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "get_class", json!({"name": "zzz-nothing"})).await;
        assert_eq!(
            text,
            "Class \"zzz-nothing\" not found in Tailwind CSS.\n\nUse list_classes to see available classes."
        );

        let text = call(&mut d, "get_class", json!({"name": "btn-prim"})).await;
        assert!(text.starts_with("Class \"btn-prim\" not found in Tailwind CSS.\n\nDid you mean:\n"));
        assert!(text.contains("  - btn-primary: Primary action button - blue background, white text"));
        assert_eq!(text.matches("\n  - ").count(), 1);
    }

    #[tokio::test]
    async fn test_get_class_suggestions_capped() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "get_class", json!({"name": "btn"})).await;
        assert_eq!(text.matches("\n  - ").count(), 3);
        assert!(text.contains("  - btn-base: "));
    }

    #[tokio::test]
    async fn test_list_classes() {
        let (_dir, mut d) = dispatcher();
        let all = call(&mut d, "list_classes", json!({})).await;
        assert!(all.starts_with("# Tailwind CSS Classes\n\nTotal: 91 patterns\n\n## buttons\n- **btn-base**: "));
        assert!(!all.contains("_Note:"));

        let layout = call(&mut d, "list_classes", json!({"category": "layout"})).await;
        assert!(layout.starts_with("# Tailwind CSS Classes (layout)\n\nTotal: "));
        assert!(layout.contains("- **flex-start**: Flex aligned to start\n"));
        assert_eq!(layout.matches("## ").count(), 1);
    }

    #[tokio::test]
    async fn test_list_classes_ssr_badges() {
        let (_dir, mut d) = dispatcher();
        d.set_framework(FrameworkId::Bootstrap);

        let loading = call(&mut d, "list_classes", json!({"category": "loading"})).await;
        assert!(loading.contains("- **spinner-border** ⚠️: "));

        let safe_only = call(
            &mut d,
            "list_classes",
            json!({"category": "loading", "ssrSafeOnly": true}),
        )
        .await;
        assert!(safe_only.starts_with("# Bootstrap 5 Classes (loading) [SSR-safe only]"));
        assert!(!safe_only.contains("spinner-border"));
        assert!(safe_only.ends_with(
            "\n_Note: ⚠️ indicates patterns that may cause hydration issues in SSR frameworks._"
        ));
    }

    #[tokio::test]
    async fn test_search_classes() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "search_classes", json!({"query": "Flex Start"})).await;
        assert_eq!(
            text,
            "# Search Results for \"Flex Start\"\n\n\
             Found 1 matches in Tailwind CSS:\n\n\
             ### flex-start\n\
             - Description: Flex aligned to start\n\
             - Category: layout\n\
             - Classes: `flex items-center justify-start`\n\n"
        );

        let none = call(&mut d, "search_classes", json!({"query": "qqqq"})).await;
        assert_eq!(
            none,
            "No classes found matching \"qqqq\" in Tailwind CSS. Try a broader search term."
        );
    }

    #[tokio::test]
    async fn test_search_truncates_classes() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "search_classes", json!({"query": "primary action"})).await;
        let line = text
            .lines()
            .find(|line| line.starts_with("- Classes: "))
            .unwrap();
        assert!(line.ends_with("...`"));
        assert_eq!(line.len(), "- Classes: `".len() + 100 + "...`".len());
    }

    #[tokio::test]
    async fn test_generate_css() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "generate_css", json!({"categories": ["layout"]})).await;
        assert!(text.starts_with("```css\n/* Generated by classmcp - Tailwind CSS */\n\n/* LAYOUT */\n"));
        assert!(text.contains(".flex-start { @apply flex items-center justify-start; }\n"));
        assert!(text.ends_with(
            "\n```\n\nAdd this to your CSS file. The `@apply` directive requires Tailwind CSS to be configured."
        ));

        d.set_framework(FrameworkId::Bootstrap);
        let raw = call(&mut d, "generate_css", json!({})).await;
        assert!(raw.ends_with(
            "Add this CSS to your project. Note: You may need to add the actual utility definitions."
        ));
    }

    #[tokio::test]
    async fn test_generate_css_minified() {
        let (_dir, mut d) = dispatcher();
        let text = call(
            &mut d,
            "generate_css",
            json!({"categories": ["layout"], "minified": true}),
        )
        .await;
        assert!(text.starts_with("```css\n.a { @apply "));
        assert!(!text.contains("/*"));
        assert!(text.contains("**Minification Stats:**\n- Original tokens: ~"));
        assert!(text.ends_with("Use the minified class names (a, b, c...) in your HTML."));
    }

    #[tokio::test]
    async fn test_get_component() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "get_component", json!({"component": "button-group"})).await;
        insta::assert_snapshot!(text, @r#"
        ## button-group (Tailwind CSS)

        ```html
        <div class="flex-start space-x-2">
          <button class="btn-primary">Save</button>
          <button class="btn-secondary">Cancel</button>
          <button class="btn-danger">Delete</button>
        </div>
        ```
        "#);
    }

    #[tokio::test]
    async fn test_get_component_minified() {
        let (_dir, mut d) = dispatcher();
        let text = call(
            &mut d,
            "get_component",
            json!({"component": "button-group", "minified": true}),
        )
        .await;
        assert!(text.contains("<div class=\"flex-start space-x-2\">"));
        assert!(text.contains("<button class=\"b\">Save</button>"));
        assert!(text.contains("<button class=\"c\">Cancel</button>"));
        assert!(text.contains("<button class=\"e\">Delete</button>"));
    }

    #[tokio::test]
    async fn test_get_unknown_component() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "get_component", json!({"component": "carousel"})).await;
        assert_eq!(
            text,
            "Unknown component: carousel. Available: button-group, card-with-header, form-field, \
             alert-with-icon, avatar-stack, modal, table, nav-bar, pricing-card, testimonial"
        );
    }

    #[tokio::test]
    async fn test_get_ssr_info_safe() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "get_ssr_info", json!({"name": "card"})).await;
        assert!(text.starts_with("# SSR Safety Report: card\n\n**Status:** ✅ SSR-Safe\n\n"));
        assert!(text.ends_with("- Server and client render identically\n"));

        let missing = call(&mut d, "get_ssr_info", json!({"name": "nope"})).await;
        assert_eq!(missing, "Class \"nope\" not found.");
    }

    #[tokio::test]
    async fn test_get_ssr_info_unsafe() {
        let (_dir, mut d) = dispatcher();
        d.set_framework(FrameworkId::Bootstrap);
        let text = call(&mut d, "get_ssr_info", json!({"name": "modal"})).await;
        insta::assert_snapshot!(text, @r"
        # SSR Safety Report: modal

        **Status:** ⚠️ Requires Client JS

        **Warning:** Bootstrap modals require JS to show/hide. Consider SSR-friendly alternatives.

        **Why it's not SSR-safe:**
        - Contains state that may differ between server and client
        - May require JavaScript to toggle classes

        **Client-only classes:** `fade`
        Consider adding these classes only after hydration.

        **Recommendations:**
        1. Control visibility with server-side state when possible
        2. Use `useEffect` or `onMount` to add client-only classes
        3. Consider using CSS-only alternatives where available
        ");
    }

    #[tokio::test]
    async fn test_list_frameworks() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "list_frameworks", json!({})).await;
        assert!(text.starts_with(
            "# Available CSS Frameworks\n\nCurrent: **Tailwind CSS**\n\n## Tailwind CSS ← current\n- ID: `tailwind`\n"
        ));
        assert!(text.contains("## Bootstrap 5\n- ID: `bootstrap`\n"));
        assert!(text.contains("- Patterns: 103 (99 SSR-safe)\n- Categories: 13\n\n"));
        assert!(text.ends_with("Use `set_framework` to switch frameworks."));
    }

    #[tokio::test]
    async fn test_reload_without_config() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "reload_config", json!({})).await;
        assert!(text.starts_with(
            "No config file found. Create a `.classmcp.json` file to add custom patterns.\n\nExample config:\n```json\n"
        ));
        assert!(text.ends_with("rounded-lg\" }\n  ]\n}\n```"));
    }

    #[tokio::test]
    async fn test_reload_applies_config() {
        let (dir, mut d) = dispatcher();
        fs::write(
            dir.path().join(".classmcp.json"),
            r#"{
                "defaultFramework": "unocss",
                "customPatterns": [
                    { "id": "brand-btn", "classes": "px-4 py-2 bg-brand-600" },
                    { "id": "brand-btn", "classes": "px-6 py-3 bg-brand-700" }
                ]
            }"#,
        )
        .unwrap();

        let text = call(&mut d, "reload_config", json!({})).await;
        assert!(text.starts_with("**Config reloaded successfully!**\n\n- Config file: `"));
        assert!(text.contains("- Custom patterns loaded: 1\n- Override built-ins: false\n"));
        assert!(text.contains(
            "\n**Warnings:**\n- Duplicate pattern id \"brand-btn\" at index 1 - later definition will be used"
        ));
        assert!(text.ends_with("\n\n**Custom patterns:**\n- `brand-btn`: Custom pattern: Brand Btn\n"));
        assert_eq!(d.framework(), FrameworkId::Unocss);

        let class = call(&mut d, "get_class", json!({"name": "brand-btn"})).await;
        assert!(class.contains("px-6 py-3 bg-brand-700"));
    }

    #[tokio::test]
    async fn test_reload_without_default_keeps_selected_framework() {
        let (dir, mut d) = dispatcher();
        fs::write(
            dir.path().join(".classmcp.json"),
            r#"{"customPatterns":[{"id":"brand","classes":"btn btn-brand"}]}"#,
        )
        .unwrap();

        call(&mut d, "set_framework", json!({"framework": "bootstrap"})).await;
        let text = call(&mut d, "reload_config", json!({})).await;
        assert!(text.starts_with("**Config reloaded successfully!**"));
        assert_eq!(d.framework(), FrameworkId::Bootstrap);
        assert!(d.registry().is_custom(FrameworkId::Bootstrap, "brand"));
    }

    #[tokio::test]
    async fn test_reload_invalid_keeps_overlay() {
        let (dir, mut d) = dispatcher();
        let path = dir.path().join(".classmcp.json");
        fs::write(&path, r#"{"customPatterns":[{"id":"brand","classes":"p-4"}]}"#).unwrap();
        call(&mut d, "reload_config", json!({})).await;

        fs::write(&path, r#"{"customPatterns":[{"id":"9brand","classes":"p-4"}]}"#).unwrap();
        let text = call(&mut d, "reload_config", json!({})).await;
        assert!(text.starts_with("**Config validation errors:**\n\n- customPatterns[0].id: "));
        assert!(text.ends_with("Fix the errors and run `reload_config` again."));
        assert!(d.registry().is_custom(FrameworkId::Tailwind, "brand"));
    }

    #[tokio::test]
    async fn test_reload_after_removal_clears_overlay() {
        let (dir, mut d) = dispatcher();
        let path = dir.path().join(".classmcp.json");
        fs::write(&path, r#"{"customPatterns":[{"id":"brand","classes":"p-4"}]}"#).unwrap();
        call(&mut d, "reload_config", json!({})).await;
        assert!(!d.registry().overlay().is_empty());

        fs::remove_file(&path).unwrap();
        let text = call(&mut d, "reload_config", json!({})).await;
        assert!(text.starts_with("No config file found."));
        assert!(d.registry().overlay().is_empty());
        assert!(d.config_source().is_none());
    }

    #[tokio::test]
    async fn test_list_custom_patterns_empty() {
        let (_dir, mut d) = dispatcher();
        let text = call(&mut d, "list_custom_patterns", json!({})).await;
        assert!(text.starts_with("No custom patterns loaded.\n\nTo add custom patterns"));
        assert!(text.ends_with("```\n\nThen use `reload_config` to load them."));
    }

    #[tokio::test]
    async fn test_list_custom_patterns() {
        let (dir, mut d) = dispatcher();
        fs::write(
            dir.path().join(".classmcp.json"),
            r#"{"customPatterns":[
                {"id":"brand-btn","classes":"px-4 py-2 bg-brand-600 text-white rounded-lg shadow-sm hover:bg-brand-700 focus:ring-2","category":"buttons"},
                {"id":"uno-only","classes":"p-2","frameworks":["unocss"]}
            ]}"#,
        )
        .unwrap();
        d.load_config().await;

        let text = call(&mut d, "list_custom_patterns", json!({})).await;
        let source = d.config_source().unwrap().to_string();
        assert_eq!(
            text,
            format!(
                "# Custom Patterns\n\n\
                 Total: 2 custom patterns (1 for tailwind)\n\n\
                 ## buttons\n\
                 - **brand-btn**: `px-4 py-2 bg-brand-600 text-white rounded-lg shadow-sm hover...`\n\n\
                 \n_Config file: {source}_"
            )
        );

        let tachyons = call(&mut d, "list_custom_patterns", json!({"framework": "tachyons"})).await;
        assert!(tachyons.contains("(1 for tachyons)"));

        let uno = call(&mut d, "list_custom_patterns", json!({"framework": "unocss"})).await;
        assert!(uno.contains("(2 for unocss)"));
        assert!(uno.contains("## custom\n- **uno-only**: `p-2`\n"));

        let bad = call(&mut d, "list_custom_patterns", json!({"framework": "bulma"})).await;
        assert!(bad.starts_with("Unknown framework: bulma."));
    }
}
