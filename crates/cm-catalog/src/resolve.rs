//! Flattening a pattern into a single class string.

use cm_core::{ComponentPattern, PatternClasses, StateKind};

/// How state variants are folded into the resolved class string.
///
/// `include_states` appends every state in [`StateKind::DEFAULT_ORDER`],
/// but only while `ssr_safe` is off. Otherwise `states` picks individual
/// states in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Append all default states.
    pub include_states: bool,
    /// Append only these states. Ignored when `include_states` applies.
    pub states: Vec<StateKind>,
    /// Suppresses `include_states`.
    pub ssr_safe: bool,
}

impl ResolveOptions {
    /// Options that append every default state.
    #[must_use]
    pub fn with_all_states() -> Self {
        Self {
            include_states: true,
            ..Self::default()
        }
    }

    /// Options that append only `states`.
    #[must_use]
    pub fn with_states(states: impl IntoIterator<Item = StateKind>) -> Self {
        Self {
            states: states.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets `include_states`.
    #[must_use]
    pub fn include_states(mut self, include_states: bool) -> Self {
        self.include_states = include_states;
        self
    }

    /// Sets `ssr_safe`.
    #[must_use]
    pub fn ssr_safe(mut self, ssr_safe: bool) -> Self {
        self.ssr_safe = ssr_safe;
        self
    }
}

/// Resolves a pattern's classes into one space-separated string.
///
/// Flat patterns are returned verbatim. For state variants, `base` comes
/// first and each selected, non-empty state follows.
///
/// # Examples
///
/// ```
/// use cm_catalog::{ResolveOptions, resolve_classes};
/// use cm_core::{ComponentPattern, StateKind, StateVariant};
///
/// let mut variant = StateVariant::new("px-4");
/// variant.hover = Some("hover:bg-blue-700".to_owned());
/// variant.focus = Some("focus:ring-2".to_owned());
/// let pattern = ComponentPattern::new("btn", "Button", "buttons", variant);
///
/// assert_eq!(
///     resolve_classes(&pattern, &ResolveOptions::with_all_states()),
///     "px-4 hover:bg-blue-700 focus:ring-2"
/// );
/// assert_eq!(
///     resolve_classes(&pattern, &ResolveOptions::with_states([StateKind::Focus])),
///     "px-4 focus:ring-2"
/// );
/// ```
#[must_use]
pub fn resolve_classes(pattern: &ComponentPattern, options: &ResolveOptions) -> String {
    let variant = match &pattern.classes {
        PatternClasses::Flat(classes) => return classes.clone(),
        PatternClasses::States(variant) => variant,
    };

    let selected: &[StateKind] = if options.include_states && !options.ssr_safe {
        &StateKind::DEFAULT_ORDER
    } else {
        &options.states
    };

    let mut classes = variant.base.clone();
    for &kind in selected {
        if let Some(state) = variant.get(kind) {
            classes.push(' ');
            classes.push_str(state);
        }
    }
    classes
}
