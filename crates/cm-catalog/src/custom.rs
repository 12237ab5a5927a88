//! User-defined patterns.
//!
//! A [`CustomPatternInput`] from the project config only needs an id and
//! classes. [`transform_pattern`] fills in the rest so custom patterns can be
//! listed, searched and rendered exactly like built-ins.

use cm_core::{ComponentPattern, CustomPatternInput, FrameworkId, SsrInfo};
use serde::Serialize;
use smallvec::SmallVec;

/// Category assigned when the input does not name one.
pub const CUSTOM_CATEGORY: &str = "custom";

const CUSTOM_USAGE: &str = r#"<div class="{{class}}">...</div>"#;

/// A custom pattern together with the frameworks it is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPattern {
    /// The expanded pattern.
    #[serde(flatten)]
    pub pattern: ComponentPattern,
    /// Frameworks the pattern applies to. Empty means all.
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub frameworks: SmallVec<[FrameworkId; 4]>,
}

impl CustomPattern {
    /// Returns `true` if the pattern is offered for `framework`.
    #[inline]
    #[must_use]
    pub fn applies_to(&self, framework: FrameworkId) -> bool {
        self.frameworks.is_empty() || self.frameworks.contains(&framework)
    }

    /// The pattern id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.pattern.id
    }
}

/// Expands a user-supplied definition into a full pattern.
///
/// # Examples
///
/// ```
/// use cm_catalog::transform_pattern;
/// use cm_core::CustomPatternInput;
///
/// let pattern = transform_pattern(&CustomPatternInput::new("brand-btn", "px-4 bg-brand"));
/// assert_eq!(pattern.name, "Brand Btn");
/// assert_eq!(pattern.description, "Custom pattern: Brand Btn");
/// assert_eq!(pattern.category, "custom");
/// assert!(pattern.is_ssr_safe());
/// ```
#[must_use]
pub fn transform_pattern(input: &CustomPatternInput) -> ComponentPattern {
    let name = input.name.clone().unwrap_or_else(|| humanize_id(&input.id));
    let description = input
        .description
        .clone()
        .unwrap_or_else(|| format!("Custom pattern: {name}"));

    ComponentPattern {
        id: input.id.clone(),
        name,
        description,
        category: input
            .category
            .clone()
            .unwrap_or_else(|| CUSTOM_CATEGORY.to_owned()),
        classes: input.classes.clone(),
        variants: None,
        usage: Some(CUSTOM_USAGE.to_owned()),
        ssr: Some(input.ssr.clone().unwrap_or_else(SsrInfo::safe)),
        framework_notes: None,
    }
}

/// Expands every input, dropping framework restrictions.
#[must_use]
pub fn transform_patterns(inputs: &[CustomPatternInput]) -> Vec<ComponentPattern> {
    inputs.iter().map(transform_pattern).collect()
}

/// Expands every input and keeps its framework restriction.
#[must_use]
pub fn transform_patterns_with_meta(inputs: &[CustomPatternInput]) -> Vec<CustomPattern> {
    inputs
        .iter()
        .map(|input| CustomPattern {
            pattern: transform_pattern(input),
            frameworks: input.frameworks.clone().unwrap_or_default(),
        })
        .collect()
}

/// Keeps the patterns that apply to `framework`.
pub fn filter_for_framework(
    patterns: &[CustomPattern],
    framework: FrameworkId,
) -> impl Iterator<Item = &CustomPattern> {
    patterns.iter().filter(move |p| p.applies_to(framework))
}

/// Turns `brand_primary-btn` into `Brand Primary Btn`.
///
/// Every `-` or `_` starts a new word, so doubled separators leave an empty
/// word (and a double space) behind.
#[must_use]
pub fn humanize_id(id: &str) -> String {
    id.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
