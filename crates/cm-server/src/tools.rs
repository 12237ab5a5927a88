//! Tool catalogue: names, input schemas and argument types.

use std::fmt;
use std::str::FromStr;

use cm_core::FrameworkId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::components::COMPONENT_NAMES;

/// Every tool the server offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    /// Switch the current framework.
    SetFramework,
    /// Resolve one semantic class.
    GetClass,
    /// List patterns, optionally by category.
    ListClasses,
    /// Search patterns.
    SearchClasses,
    /// Generate CSS for the current framework.
    GenerateCss,
    /// Render an HTML component example.
    GetComponent,
    /// SSR safety report for one class.
    GetSsrInfo,
    /// List frameworks with statistics.
    ListFrameworks,
    /// Re-read the project config.
    ReloadConfig,
    /// List user-defined patterns.
    ListCustomPatterns,
}

impl ToolName {
    /// All tools, in listing order.
    pub const ALL: [Self; 10] = [
        Self::SetFramework,
        Self::GetClass,
        Self::ListClasses,
        Self::SearchClasses,
        Self::GenerateCss,
        Self::GetComponent,
        Self::GetSsrInfo,
        Self::ListFrameworks,
        Self::ReloadConfig,
        Self::ListCustomPatterns,
    ];

    /// Wire name of the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetFramework => "set_framework",
            Self::GetClass => "get_class",
            Self::ListClasses => "list_classes",
            Self::SearchClasses => "search_classes",
            Self::GenerateCss => "generate_css",
            Self::GetComponent => "get_component",
            Self::GetSsrInfo => "get_ssr_info",
            Self::ListFrameworks => "list_frameworks",
            Self::ReloadConfig => "reload_config",
            Self::ListCustomPatterns => "list_custom_patterns",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::SetFramework => {
                "Set the CSS framework to use for all subsequent operations. Choose based on your project's CSS framework. DEFAULT: tailwind"
            }
            Self::GetClass => {
                "Get the full utility classes for a semantic class name. Returns the CSS classes you should use in your HTML. Supports SSR-safe filtering."
            }
            Self::ListClasses => {
                "List all available semantic class names, optionally filtered by category. Use this to discover available patterns."
            }
            Self::SearchClasses => {
                "Search for classes by name, description, or category. Use when you're not sure of the exact class name."
            }
            Self::GenerateCss => {
                "Generate CSS that defines all semantic classes. Add this to your project's CSS file to use the semantic class names."
            }
            Self::GetComponent => {
                "Get a complete HTML component example using semantic classes. Great for seeing how classes work together."
            }
            Self::GetSsrInfo => {
                "Get SSR/hydration safety information for a class pattern. Use this when building SSR/Next.js/Nuxt/Remix applications to avoid hydration mismatches."
            }
            Self::ListFrameworks => "List all available CSS frameworks and their statistics.",
            Self::ReloadConfig => {
                "Reload custom patterns from the config file (.classmcp.json). Use this after modifying your config file."
            }
            Self::ListCustomPatterns => {
                "List all custom (user-defined) patterns loaded from your config file."
            }
        }
    }

    fn input_schema(self) -> Value {
        let frameworks: Vec<&str> = FrameworkId::ALL.iter().map(|f| f.as_str()).collect();
        match self {
            Self::SetFramework => json!({
                "type": "object",
                "properties": {
                    "framework": {
                        "type": "string",
                        "description": "The CSS framework to use",
                        "enum": frameworks,
                    },
                },
                "required": ["framework"],
            }),
            Self::GetClass => json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The semantic class name (e.g., 'btn-primary', 'card', 'input')",
                    },
                    "minified": {
                        "type": "boolean",
                        "description": "Return a minified single-character class name for maximum token savings (default: false)",
                    },
                    "ssrSafe": {
                        "type": "boolean",
                        "description": "Only return SSR-safe classes that won't cause hydration mismatches (default: false)",
                    },
                    "includeStates": {
                        "type": "boolean",
                        "description": "Include hover/focus/active state variants in the output (default: true)",
                    },
                },
                "required": ["name"],
            }),
            Self::ListClasses => json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Filter by category: buttons, cards, forms, badges, alerts, avatars, layout, typography, navigation, modals, tables, lists, loading, dividers",
                    },
                    "ssrSafeOnly": {
                        "type": "boolean",
                        "description": "Only show SSR-safe classes (default: false)",
                    },
                },
            }),
            Self::SearchClasses => json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (matches against name, description, and category)",
                    },
                },
                "required": ["query"],
            }),
            Self::GenerateCss => json!({
                "type": "object",
                "properties": {
                    "categories": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Only generate CSS for specific categories (optional)",
                    },
                    "minified": {
                        "type": "boolean",
                        "description": "Generate minified class names (a, b, c...) for maximum file size reduction",
                    },
                    "includeStates": {
                        "type": "boolean",
                        "description": "Include hover/focus/active state variants (default: true)",
                    },
                },
            }),
            Self::GetComponent => json!({
                "type": "object",
                "properties": {
                    "component": {
                        "type": "string",
                        "description": "Component type to generate",
                        "enum": COMPONENT_NAMES,
                    },
                    "minified": {
                        "type": "boolean",
                        "description": "Use minified class names in the example",
                    },
                },
                "required": ["component"],
            }),
            Self::GetSsrInfo => json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The class name to check",
                    },
                },
                "required": ["name"],
            }),
            Self::ListFrameworks | Self::ReloadConfig => json!({
                "type": "object",
                "properties": {},
            }),
            Self::ListCustomPatterns => json!({
                "type": "object",
                "properties": {
                    "framework": {
                        "type": "string",
                        "description": "Filter by framework (optional, defaults to current framework)",
                        "enum": frameworks,
                    },
                },
            }),
        }
    }

    /// The `tools/list` entry for this tool.
    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.as_str(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| s.to_owned())
    }
}

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Wire name.
    pub name: &'static str,
    /// What the tool does.
    pub description: &'static str,
    /// JSON schema of the arguments.
    pub input_schema: Value,
}

/// Every tool definition, in listing order.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.into_iter().map(ToolName::definition).collect()
}

const fn yes() -> bool {
    true
}

/// Arguments of `set_framework`.
///
/// The framework stays a string so an unknown id can be reported as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetFrameworkArgs {
    /// Requested framework id.
    pub framework: String,
}

/// Arguments of `get_class`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetClassArgs {
    /// Semantic class name.
    pub name: String,
    /// Also show a short name.
    #[serde(default)]
    pub minified: bool,
    /// Refuse SSR-unsafe patterns and drop state variants.
    #[serde(default)]
    pub ssr_safe: bool,
    /// Append state variants.
    #[serde(default = "yes")]
    pub include_states: bool,
}

/// Arguments of `list_classes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClassesArgs {
    /// Only this category.
    #[serde(default)]
    pub category: Option<String>,
    /// Hide SSR-unsafe patterns.
    #[serde(default)]
    pub ssr_safe_only: bool,
}

/// Arguments of `search_classes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchClassesArgs {
    /// Case-insensitive search text.
    pub query: String,
}

/// Arguments of `generate_css`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCssArgs {
    /// Only these categories.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Use short names and report savings.
    #[serde(default)]
    pub minified: bool,
    /// Append state variants.
    #[serde(default = "yes")]
    pub include_states: bool,
}

impl Default for GenerateCssArgs {
    fn default() -> Self {
        Self {
            categories: None,
            minified: false,
            include_states: true,
        }
    }
}

/// Arguments of `get_component`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetComponentArgs {
    /// Template name.
    pub component: String,
    /// Replace class names with short names.
    #[serde(default)]
    pub minified: bool,
}

/// Arguments of `get_ssr_info`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetSsrInfoArgs {
    /// Semantic class name.
    pub name: String,
}

/// Arguments of `list_custom_patterns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListCustomPatternsArgs {
    /// Framework to filter for; the current one when absent.
    #[serde(default)]
    pub framework: Option<String>,
}
