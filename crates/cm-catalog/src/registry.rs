//! The framework registry: built-in patterns plus a user overlay.
//!
//! [`PatternRegistry`] answers every pattern query the server and CLI make.
//! It owns the parsed [`Catalog`] and a [`CustomOverlay`] built from the
//! project config; the overlay is replaced wholesale on reload.
//!
//! # Override semantics
//!
//! With `override_builtins` off, built-ins win lookups by id and custom
//! patterns with a clashing id are listed but unreachable through
//! [`PatternRegistry::pattern`]. With it on, a custom pattern hides the
//! built-in with the same id everywhere.

use camino::Utf8Path;
use cm_core::{ComponentPattern, FrameworkConfig, FrameworkId, FxHashMap, FxHashSet, UserConfig};
use cm_minify::MinificationMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::builtin::Catalog;
use crate::custom::{CustomPattern, transform_patterns_with_meta};
use crate::error::CatalogError;
use crate::resolve::{ResolveOptions, resolve_classes};

/// User-defined patterns layered over the built-in catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomOverlay {
    patterns: Vec<CustomPattern>,
    override_builtins: bool,
}

impl CustomOverlay {
    /// Creates an overlay. When ids repeat, the later definition is kept.
    #[must_use]
    pub fn new(patterns: Vec<CustomPattern>, override_builtins: bool) -> Self {
        let mut last: FxHashMap<String, usize> = FxHashMap::default();
        for (index, pattern) in patterns.iter().enumerate() {
            last.insert(pattern.pattern.id.clone(), index);
        }
        let patterns = patterns
            .into_iter()
            .enumerate()
            .filter(|(index, pattern)| last.get(pattern.id()) == Some(index))
            .map(|(_, pattern)| pattern)
            .collect();
        Self {
            patterns,
            override_builtins,
        }
    }

    /// Builds the overlay described by a validated user config.
    #[must_use]
    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(
            transform_patterns_with_meta(&config.custom_patterns),
            config.override_builtins,
        )
    }

    /// Custom patterns in definition order.
    #[must_use]
    pub fn patterns(&self) -> &[CustomPattern] {
        &self.patterns
    }

    /// Whether custom patterns replace built-ins with the same id.
    #[must_use]
    pub const fn override_builtins(&self) -> bool {
        self.override_builtins
    }

    /// Number of custom patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if there are no custom patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Pattern counts for one framework.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkStats {
    /// Patterns offered, built-in and custom.
    pub total_patterns: usize,
    /// Distinct categories among them.
    pub categories: usize,
    /// Patterns that render identically on server and client.
    pub ssr_safe_patterns: usize,
    /// Patterns that need client-side JavaScript.
    pub client_only_patterns: usize,
    /// Custom patterns that apply to the framework.
    pub custom_patterns: usize,
}

/// Short description of a framework, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    /// Framework id.
    pub id: FrameworkId,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
}

/// Built-in catalog plus custom overlay.
///
/// # Examples
///
/// ```
/// use cm_catalog::{CustomOverlay, PatternRegistry, transform_patterns_with_meta};
/// use cm_core::{CustomPatternInput, FrameworkId};
///
/// let mut registry = PatternRegistry::builtin()?;
/// assert!(registry.pattern(FrameworkId::Tailwind, "btn-primary").is_some());
///
/// let customs = transform_patterns_with_meta(&[CustomPatternInput::new("brand-btn", "px-4")]);
/// registry.set_overlay(CustomOverlay::new(customs, false));
/// assert!(registry.is_custom(FrameworkId::Tailwind, "brand-btn"));
/// # Ok::<(), cm_catalog::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    catalog: Catalog,
    overlay: CustomOverlay,
}

impl PatternRegistry {
    /// Creates a registry with no custom patterns.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            overlay: CustomOverlay::default(),
        }
    }

    /// Creates a registry over the embedded catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Catalog::builtin().map(Self::new)
    }

    /// The built-in catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current overlay.
    #[must_use]
    pub const fn overlay(&self) -> &CustomOverlay {
        &self.overlay
    }

    /// Replaces the overlay.
    pub fn set_overlay(&mut self, overlay: CustomOverlay) {
        info!(
            custom_patterns = overlay.len(),
            override_builtins = overlay.override_builtins,
            "custom patterns applied"
        );
        self.overlay = overlay;
    }

    /// Removes every custom pattern.
    pub fn clear_overlay(&mut self) {
        self.set_overlay(CustomOverlay::default());
    }

    /// Static configuration of `framework`.
    #[must_use]
    pub const fn config(&self, framework: FrameworkId) -> &FrameworkConfig {
        self.catalog.config(framework)
    }

    /// Custom patterns that apply to `framework`.
    pub fn customs_for(&self, framework: FrameworkId) -> impl Iterator<Item = &CustomPattern> {
        self.overlay
            .patterns
            .iter()
            .filter(move |custom| custom.applies_to(framework))
    }

    /// Every pattern offered for `framework`: built-ins in catalog order, then
    /// applicable custom patterns.
    #[must_use]
    pub fn patterns(&self, framework: FrameworkId) -> Vec<&ComponentPattern> {
        let customs: Vec<&ComponentPattern> =
            self.customs_for(framework).map(|c| &c.pattern).collect();
        let hidden: FxHashSet<&str> = if self.overlay.override_builtins {
            customs.iter().map(|p| p.id.as_str()).collect()
        } else {
            FxHashSet::default()
        };

        self.catalog
            .patterns(framework)
            .iter()
            .filter(|p| !hidden.contains(p.id.as_str()))
            .chain(customs)
            .collect()
    }

    /// Looks up a pattern by id.
    #[must_use]
    pub fn pattern(&self, framework: FrameworkId, id: &str) -> Option<&ComponentPattern> {
        let builtin = || self.catalog.patterns(framework).iter().find(|p| p.id == id);
        let custom = || {
            self.customs_for(framework)
                .find(|c| c.id() == id)
                .map(|c| &c.pattern)
        };
        if self.overlay.override_builtins {
            custom().or_else(builtin)
        } else {
            builtin().or_else(custom)
        }
    }

    /// Returns `true` if looking up `id` yields a custom pattern.
    #[must_use]
    pub fn is_custom(&self, framework: FrameworkId, id: &str) -> bool {
        let has_custom = self.customs_for(framework).any(|c| c.id() == id);
        if self.overlay.override_builtins {
            has_custom
        } else {
            has_custom && !self.catalog.patterns(framework).iter().any(|p| p.id == id)
        }
    }

    /// Patterns in `category`, in listing order.
    #[must_use]
    pub fn patterns_by_category(
        &self,
        framework: FrameworkId,
        category: &str,
    ) -> Vec<&ComponentPattern> {
        self.patterns(framework)
            .into_iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name, description and category.
    #[must_use]
    pub fn search(&self, framework: FrameworkId, query: &str) -> Vec<&ComponentPattern> {
        let query = query.to_lowercase();
        self.patterns(framework)
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Category ids in first-seen order.
    #[must_use]
    pub fn categories(&self, framework: FrameworkId) -> Vec<&str> {
        group_by_category(self.patterns(framework))
            .into_iter()
            .map(|(category, _)| category)
            .collect()
    }

    /// Pattern counts for `framework`.
    #[must_use]
    pub fn stats(&self, framework: FrameworkId) -> FrameworkStats {
        let patterns = self.patterns(framework);
        let categories: FxHashSet<&str> = patterns.iter().map(|p| p.category.as_str()).collect();
        let ssr_safe = patterns.iter().filter(|p| p.is_ssr_safe()).count();
        FrameworkStats {
            total_patterns: patterns.len(),
            categories: categories.len(),
            ssr_safe_patterns: ssr_safe,
            client_only_patterns: patterns.len() - ssr_safe,
            custom_patterns: self.customs_for(framework).count(),
        }
    }

    /// Every framework, in registry order.
    #[must_use]
    pub fn list_frameworks(&self) -> Vec<FrameworkSummary> {
        self.catalog
            .iter()
            .map(|(id, module)| FrameworkSummary {
                id,
                name: module.config.display_name.clone(),
                description: module.config.description.clone(),
            })
            .collect()
    }

    /// Builds a fresh minification map over the offered patterns, optionally
    /// restricted to `categories`.
    #[must_use]
    pub fn minify_patterns(
        &self,
        framework: FrameworkId,
        categories: Option<&[String]>,
        include_states: bool,
    ) -> MinificationMap {
        let options = ResolveOptions::default().include_states(include_states);
        let mut map = MinificationMap::new();
        for pattern in self.patterns(framework) {
            if in_categories(categories, &pattern.category) {
                map.minify(&pattern.id, &resolve_classes(pattern, &options));
            }
        }
        debug!(%framework, entries = map.len(), "minified patterns");
        map
    }

    /// Picks the framework whose config file is present in `project_dir`.
    ///
    /// Frameworks are checked in registry order; the first match wins. Falls
    /// back to Tailwind.
    #[must_use]
    pub fn detect_framework(&self, project_dir: &Utf8Path) -> FrameworkId {
        for (id, module) in self.catalog.iter() {
            if let Some(file) = module
                .config
                .config_files
                .iter()
                .find(|file| project_dir.join(file).exists())
            {
                debug!(framework = %id, file = %file, "detected framework");
                return id;
            }
        }
        FrameworkId::default()
    }
}

/// Groups patterns by category, keeping first-seen category order and the
/// pattern order within each group.
#[must_use]
pub fn group_by_category<'a, I>(patterns: I) -> Vec<(&'a str, Vec<&'a ComponentPattern>)>
where
    I: IntoIterator<Item = &'a ComponentPattern>,
{
    let mut groups: Vec<(&str, Vec<&ComponentPattern>)> = Vec::new();
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for pattern in patterns {
        let category = pattern.category.as_str();
        if let Some(&slot) = index.get(category) {
            groups[slot].1.push(pattern);
        } else {
            index.insert(category, groups.len());
            groups.push((category, vec![pattern]));
        }
    }
    groups
}

/// An empty or absent filter accepts every category.
pub(crate) fn in_categories(filter: Option<&[String]>, category: &str) -> bool {
    filter.is_none_or(|wanted| wanted.is_empty() || wanted.iter().any(|c| c == category))
}
