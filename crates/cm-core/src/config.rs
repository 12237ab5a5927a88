//! User configuration structures.
//!
//! A project may ship a `.classmcp.json` (or `classmcp.config.json`, or a
//! `classmcp` field in `package.json`) that adds custom patterns and picks a
//! default framework:
//!
//! ```json
//! {
//!   "customPatterns": [
//!     { "id": "brand-btn", "classes": "px-4 py-2 bg-brand-600 text-white rounded-lg" }
//!   ],
//!   "overrideBuiltins": false,
//!   "defaultFramework": "tailwind"
//! }
//! ```
//!
//! These types describe the validated shape. Validation of untrusted JSON
//! lives in the `cm-config` crate.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{FrameworkId, PatternClasses, SsrInfo};

/// A simplified pattern definition supplied by a user.
///
/// Only `id` and `classes` are required; everything else is derived when the
/// input is turned into a full pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPatternInput {
    /// Pattern identifier; must start with a letter.
    pub id: String,

    /// Flat classes or a `{ base, hover, focus, active, disabled }` object.
    pub classes: PatternClasses,

    /// Display name. Derived from the id when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description. Derived from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category id. Defaults to `custom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Frameworks the pattern applies to. Absent or empty means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<SmallVec<[FrameworkId; 4]>>,

    /// SSR notes. Defaults to safe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr: Option<SsrInfo>,
}

impl CustomPatternInput {
    /// Creates an input with only the required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, classes: impl Into<PatternClasses>) -> Self {
        Self {
            id: id.into(),
            classes: classes.into(),
            name: None,
            description: None,
            category: None,
            frameworks: None,
            ssr: None,
        }
    }
}

/// Validated user configuration.
///
/// [`UserConfig::default`] is the configuration used when no file is found
/// or the file fails validation.
///
/// # Examples
///
/// ```
/// use cm_core::UserConfig;
///
/// let config = UserConfig::default();
/// assert!(config.custom_patterns.is_empty());
/// assert!(!config.override_builtins);
/// assert_eq!(config.default_framework, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserConfig {
    /// Patterns added on top of (or replacing) the built-in catalog.
    pub custom_patterns: Vec<CustomPatternInput>,

    /// Whether a custom pattern replaces a built-in with the same id.
    pub override_builtins: bool,

    /// Framework selected when the config is applied. `None` keeps the
    /// current one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_framework: Option<FrameworkId>,
}

/// One validation failure, located by a JSON path such as
/// `customPatterns[2].classes.base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Location of the offending value. Empty for the document root.
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationIssue {
    /// Creates a new issue.
    #[inline]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_deserialize_with_missing_fields() {
        let json = r#"{"overrideBuiltins": true}"#;
        let config: UserConfig = serde_json::from_str(json).unwrap();
        assert!(config.override_builtins);
        assert!(config.custom_patterns.is_empty());
        assert_eq!(config.default_framework, None);
    }

    #[test]
    fn test_custom_pattern_input_deserialize() {
        let json = r#"{
            "id": "brand-btn",
            "classes": { "base": "px-4", "hover": "hover:bg-brand-700" },
            "frameworks": ["tailwind", "unocss"]
        }"#;
        let input: CustomPatternInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.id, "brand-btn");
        assert_eq!(input.classes.base(), "px-4");
        assert_eq!(
            input.frameworks.as_deref(),
            Some(&[FrameworkId::Tailwind, FrameworkId::Unocss][..])
        );
    }

    #[test]
    fn test_user_config_serialization() {
        let config = UserConfig {
            custom_patterns: vec![CustomPatternInput::new("brand", "text-brand")],
            override_builtins: true,
            default_framework: Some(FrameworkId::Bootstrap),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: UserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
        assert!(json.contains(r#""defaultFramework":"bootstrap""#));
    }

    #[test]
    fn test_absent_default_framework_is_not_serialized() {
        let json = serde_json::to_string(&UserConfig::default()).unwrap();
        assert!(!json.contains("defaultFramework"));
    }

    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue::new("customPatterns[0].id", "id cannot be empty");
        assert_eq!(issue.to_string(), "customPatterns[0].id: id cannot be empty");

        let root = ValidationIssue::new("", "config must be an object");
        assert_eq!(root.to_string(), "config must be an object");
    }
}
