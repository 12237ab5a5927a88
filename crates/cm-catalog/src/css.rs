//! Semantic CSS generation.
//!
//! Produces one rule per offered pattern, named after the pattern id, grouped
//! by category:
//!
//! ```css
//! /* Generated by classmcp - Tailwind CSS */
//!
//! /* BUTTONS */
//! .btn-primary { @apply inline-flex items-center ...; }
//!
//! ```

use std::fmt::Write as _;

use cm_core::FrameworkId;
use cm_minify::comment_safe;

use crate::registry::{PatternRegistry, group_by_category, in_categories};
use crate::resolve::{ResolveOptions, resolve_classes};

/// Options for [`PatternRegistry::generate_css`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssOptions {
    /// Only these categories. `None` or empty means all.
    pub categories: Option<Vec<String>>,
    /// Append every default state variant to each rule.
    pub include_states: bool,
    /// Drop category comments and blank lines between groups.
    pub minified: bool,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            categories: None,
            include_states: true,
            minified: false,
        }
    }
}

impl PatternRegistry {
    /// Renders CSS defining every offered pattern of `framework`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cm_catalog::{CssOptions, PatternRegistry};
    /// use cm_core::FrameworkId;
    ///
    /// let registry = PatternRegistry::builtin()?;
    /// let options = CssOptions {
    ///     categories: Some(vec!["cards".to_owned()]),
    ///     ..CssOptions::default()
    /// };
    /// let css = registry.generate_css(FrameworkId::Tailwind, &options);
    /// assert!(css.starts_with("/* Generated by classmcp - Tailwind CSS */\n\n/* CARDS */\n"));
    /// assert!(css.contains(".card { @apply "));
    /// # Ok::<(), cm_catalog::CatalogError>(())
    /// ```
    #[must_use]
    pub fn generate_css(&self, framework: FrameworkId, options: &CssOptions) -> String {
        let config = self.config(framework);
        let apply = config.custom_class_syntax.supports_apply();
        let resolve = ResolveOptions::default().include_states(options.include_states);

        let patterns = self
            .patterns(framework)
            .into_iter()
            .filter(|p| in_categories(options.categories.as_deref(), &p.category));

        let mut css = String::new();
        let _ = writeln!(css, "/* Generated by classmcp - {} */", config.display_name);
        css.push('\n');

        for (category, group) in group_by_category(patterns) {
            if !options.minified {
                let _ = writeln!(css, "/* {} */", comment_safe(&category.to_uppercase()));
            }
            for pattern in group {
                let classes = resolve_classes(pattern, &resolve);
                if apply {
                    let _ = writeln!(css, ".{} {{ @apply {classes}; }}", pattern.id);
                } else {
                    let _ = writeln!(css, ".{} {{ /* {} */ }}", pattern.id, comment_safe(&classes));
                }
            }
            if !options.minified {
                css.push('\n');
            }
        }
        css
    }
}
