//! CSS framework identifiers and their static configuration.
//!
//! [`FrameworkId`] names one of the supported frameworks. [`FrameworkConfig`]
//! describes how a framework expects custom classes to be declared, which
//! config files identify it in a project, and how it is imported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported CSS framework.
///
/// The declaration order is the registry order used when listing frameworks
/// and when detecting a framework from project files.
///
/// # Examples
///
/// ```
/// use cm_core::FrameworkId;
///
/// let id: FrameworkId = "unocss".parse().unwrap();
/// assert_eq!(id, FrameworkId::Unocss);
/// assert_eq!(id.as_str(), "unocss");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkId {
    /// Tailwind CSS.
    #[default]
    Tailwind,
    /// Bootstrap 5 utility classes.
    Bootstrap,
    /// `UnoCSS` atomic engine.
    Unocss,
    /// Tachyons functional CSS.
    Tachyons,
}

impl FrameworkId {
    /// All frameworks in registry order.
    pub const ALL: [Self; 4] = [Self::Tailwind, Self::Bootstrap, Self::Unocss, Self::Tachyons];

    /// Returns the lowercase identifier used in configs, URIs, and tool arguments.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tailwind => "tailwind",
            Self::Bootstrap => "bootstrap",
            Self::Unocss => "unocss",
            Self::Tachyons => "tachyons",
        }
    }

    /// Returns how custom classes are declared for this framework.
    ///
    /// Tailwind and `UnoCSS` support `@apply`; Bootstrap and Tachyons ship
    /// precompiled utilities, so generated rules can only reference them.
    #[inline]
    #[must_use]
    pub const fn class_syntax(self) -> ClassSyntax {
        match self {
            Self::Tailwind | Self::Unocss => ClassSyntax::Apply,
            Self::Bootstrap | Self::Tachyons => ClassSyntax::Raw,
        }
    }

    /// Comma-separated list of every identifier, for error messages.
    #[must_use]
    pub fn joined() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a supported framework.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown framework \"{0}\"")]
pub struct ParseFrameworkError(pub String);

impl FromStr for FrameworkId {
    type Err = ParseFrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseFrameworkError(s.to_owned()))
    }
}

/// How a framework expects composed classes to be declared in CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassSyntax {
    /// `.name { @apply <utilities>; }`
    #[serde(rename = "@apply")]
    Apply,
    /// CSS modules `composes:` syntax.
    #[serde(rename = "composes")]
    Composes,
    /// Utilities have no CSS-level composition; rules carry them as comments.
    #[serde(rename = "raw")]
    Raw,
}

impl ClassSyntax {
    /// Returns `true` if rules can be expanded with `@apply`.
    #[inline]
    #[must_use]
    pub const fn supports_apply(self) -> bool {
        matches!(self, Self::Apply)
    }
}

/// Prefixes a framework uses for state variants (e.g. `hover:`).
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePrefix {
    pub hover: String,
    pub focus: String,
    pub active: String,
    pub disabled: String,
    pub group_hover: String,
    pub dark: String,
}

/// Responsive breakpoint modifiers.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
    #[serde(rename = "2xl")]
    pub xxl: String,
}

/// Static description of a CSS framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkConfig {
    /// Identifier, matching [`FrameworkId::as_str`].
    pub name: String,
    /// Human-readable name (e.g. "Tailwind CSS").
    pub display_name: String,
    /// Supported version range.
    pub version: String,
    /// One-line description.
    pub description: String,
    /// Project homepage.
    pub website: String,
    /// How custom classes are declared.
    pub custom_class_syntax: ClassSyntax,
    /// Files whose presence in a project identifies this framework.
    #[serde(default)]
    pub config_files: Vec<String>,
    /// Import statement for the framework's stylesheet.
    pub css_import: String,
    /// State variant prefixes, for frameworks that use them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_prefix: Option<StatePrefix>,
    /// Responsive modifiers, for frameworks that use them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Breakpoints>,
}
