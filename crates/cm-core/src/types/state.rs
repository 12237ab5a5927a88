//! State-variant decomposition of a pattern's classes.
//!
//! A [`StateVariant`] splits a pattern into `base` classes that are always
//! applied plus optional per-state class strings. [`StateKind`] names each of
//! those optional fields so callers can pick states explicitly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named interaction or attribute state a pattern may carry classes for.
///
/// Serialized in camelCase, matching the field names of [`StateVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateKind {
    /// `:hover`
    Hover,
    /// `:focus`
    Focus,
    /// `:active`
    Active,
    /// `:disabled`
    Disabled,
    /// Parent `.group:hover`
    GroupHover,
    /// Parent `.group:focus`
    GroupFocus,
    /// `[aria-selected=true]`
    AriaSelected,
    /// `[aria-expanded=true]`
    AriaExpanded,
    /// `[aria-disabled=true]`
    AriaDisabled,
    /// `[data-active]`
    DataActive,
    /// `[data-state=open]`
    DataOpen,
    /// `[data-state=closed]`
    DataClosed,
}

impl StateKind {
    /// States appended, in this order, when a caller asks for all states.
    pub const DEFAULT_ORDER: [Self; 5] = [
        Self::Hover,
        Self::Focus,
        Self::Active,
        Self::Disabled,
        Self::GroupHover,
    ];

    /// Every state, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Hover,
        Self::Focus,
        Self::Active,
        Self::Disabled,
        Self::GroupHover,
        Self::GroupFocus,
        Self::AriaSelected,
        Self::AriaExpanded,
        Self::AriaDisabled,
        Self::DataActive,
        Self::DataOpen,
        Self::DataClosed,
    ];

    /// Returns the camelCase field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Focus => "focus",
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::GroupHover => "groupHover",
            Self::GroupFocus => "groupFocus",
            Self::AriaSelected => "ariaSelected",
            Self::AriaExpanded => "ariaExpanded",
            Self::AriaDisabled => "ariaDisabled",
            Self::DataActive => "dataActive",
            Self::DataOpen => "dataOpen",
            Self::DataClosed => "dataClosed",
        }
    }

    /// Returns `true` if the state renders identically on server and client.
    ///
    /// CSS pseudo-classes and plain HTML attributes need no script. Parent
    /// relationships, ARIA flags and data attributes are usually toggled by
    /// JavaScript and can cause hydration mismatches.
    ///
    /// # Examples
    ///
    /// ```
    /// use cm_core::StateKind;
    ///
    /// assert!(StateKind::Hover.is_ssr_safe());
    /// assert!(!StateKind::DataOpen.is_ssr_safe());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_ssr_safe(self) -> bool {
        matches!(
            self,
            Self::Hover | Self::Focus | Self::Active | Self::Disabled
        )
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`StateKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state \"{0}\"")]
pub struct ParseStateError(pub String);

impl FromStr for StateKind {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseStateError(s.to_owned()))
    }
}

/// A pattern's classes split into a base plus optional per-state additions.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVariant {
    /// Classes that are always applied.
    pub base: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_hover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_focus: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_selected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_expanded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_disabled: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_closed: Option<String>,
}

impl StateVariant {
    /// Creates a variant with only base classes.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// Returns the classes for `kind`, if defined and non-empty.
    #[must_use]
    pub fn get(&self, kind: StateKind) -> Option<&str> {
        let field = match kind {
            StateKind::Hover => &self.hover,
            StateKind::Focus => &self.focus,
            StateKind::Active => &self.active,
            StateKind::Disabled => &self.disabled,
            StateKind::GroupHover => &self.group_hover,
            StateKind::GroupFocus => &self.group_focus,
            StateKind::AriaSelected => &self.aria_selected,
            StateKind::AriaExpanded => &self.aria_expanded,
            StateKind::AriaDisabled => &self.aria_disabled,
            StateKind::DataActive => &self.data_active,
            StateKind::DataOpen => &self.data_open,
            StateKind::DataClosed => &self.data_closed,
        };
        field.as_deref().filter(|classes| !classes.is_empty())
    }
}
