//! Component pattern types.
//!
//! A [`ComponentPattern`] maps a semantic identifier such as `btn-primary` to
//! the utility classes that implement it, along with catalog metadata and
//! server-side rendering notes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::StateVariant;

/// The classes of a pattern: either one flat string or a state decomposition.
///
/// # Examples
///
/// ```
/// use cm_core::PatternClasses;
///
/// let flat: PatternClasses = serde_json::from_str(r#""px-4 py-2""#).unwrap();
/// assert_eq!(flat.base(), "px-4 py-2");
///
/// let states: PatternClasses =
///     serde_json::from_str(r#"{"base": "px-4", "hover": "hover:bg-blue-700"}"#).unwrap();
/// assert_eq!(states.base(), "px-4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternClasses {
    /// A single utility-class string.
    Flat(String),
    /// Base classes plus per-state additions.
    States(StateVariant),
}

impl PatternClasses {
    /// Returns the flat string, or the base classes of a state variant.
    #[must_use]
    pub fn base(&self) -> &str {
        match self {
            Self::Flat(classes) => classes,
            Self::States(variant) => &variant.base,
        }
    }

    /// Returns the state decomposition, if any.
    #[must_use]
    pub const fn as_states(&self) -> Option<&StateVariant> {
        match self {
            Self::Flat(_) => None,
            Self::States(variant) => Some(variant),
        }
    }
}

impl From<&str> for PatternClasses {
    fn from(classes: &str) -> Self {
        Self::Flat(classes.to_owned())
    }
}

impl From<StateVariant> for PatternClasses {
    fn from(variant: StateVariant) -> Self {
        Self::States(variant)
    }
}

/// Server-side rendering notes for a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsrInfo {
    /// Whether server and client render identical classes.
    pub safe: bool,

    /// Explanation shown when the pattern is not SSR-safe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    /// Classes that should only be added after hydration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_only: Option<String>,
}

impl SsrInfo {
    /// An SSR-safe marker with no notes.
    #[must_use]
    pub const fn safe() -> Self {
        Self {
            safe: true,
            warning: None,
            client_only: None,
        }
    }
}

/// A named utility-class pattern.
///
/// # Examples
///
/// ```
/// use cm_core::ComponentPattern;
///
/// let pattern = ComponentPattern::new("card", "Card", "cards", "rounded-lg shadow");
/// assert!(pattern.is_ssr_safe());
/// assert_eq!(pattern.classes.base(), "rounded-lg shadow");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPattern {
    /// Unique identifier within a framework (e.g. `btn-primary`).
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// When to use the pattern.
    pub description: String,

    /// Category id (e.g. `buttons`).
    pub category: String,

    /// The utility classes.
    pub classes: PatternClasses,

    /// Named variant groups, e.g. `size -> sm -> "px-3 py-1.5"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<BTreeMap<String, BTreeMap<String, String>>>,

    /// Example markup; `{{class}}` marks where the class goes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Server-side rendering notes. Absent means SSR-safe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr: Option<SsrInfo>,

    /// Per-framework remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_notes: Option<BTreeMap<String, String>>,
}

impl ComponentPattern {
    /// Creates a pattern with flat classes and no optional metadata.
    ///
    /// The description defaults to the name.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        classes: impl Into<PatternClasses>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            description: name.clone(),
            name,
            category: category.into(),
            classes: classes.into(),
            variants: None,
            usage: None,
            ssr: None,
            framework_notes: None,
        }
    }

    /// Returns `true` unless the pattern is explicitly marked unsafe.
    #[inline]
    #[must_use]
    pub fn is_ssr_safe(&self) -> bool {
        self.ssr.as_ref().is_none_or(|ssr| ssr.safe)
    }

    /// Returns the SSR warning, if one is recorded.
    #[must_use]
    pub fn ssr_warning(&self) -> Option<&str> {
        self.ssr.as_ref().and_then(|ssr| ssr.warning.as_deref())
    }

    /// Returns the classes that should only be added client-side, if any.
    #[must_use]
    pub fn client_only_classes(&self) -> Option<&str> {
        self.ssr.as_ref().and_then(|ssr| ssr.client_only.as_deref())
    }
}
