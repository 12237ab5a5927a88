//! Size statistics for a minification map.

use serde::{Deserialize, Serialize};

use crate::map::MinificationMap;

/// How much shorter the minified names are than the semantic ones.
///
/// Token counts are character counts of the names, not of the classes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    /// Characters across all semantic names.
    pub total_original_tokens: usize,
    /// Characters across all short names.
    pub total_minified_tokens: usize,
    /// `(1 - minified / original) * 100`, or 0 with no input.
    pub savings_percent: f64,
    /// Characters saved per entry, or 0 for an empty map.
    pub avg_savings_per_class: f64,
    /// Entries whose classes repeat those of an earlier entry.
    pub shared_content: usize,
}

impl Savings {
    /// Computes statistics over every entry in `map`.
    #[must_use]
    pub fn of(map: &MinificationMap) -> Self {
        let (original, minified) = map.iter().fold((0, 0), |(orig, min), entry| {
            (
                orig + entry.original.chars().count(),
                min + entry.minified.chars().count(),
            )
        });

        let savings_percent = if original == 0 {
            0.0
        } else {
            (1.0 - minified as f64 / original as f64) * 100.0
        };
        let avg_savings_per_class = if map.is_empty() {
            0.0
        } else {
            (original as f64 - minified as f64) / map.len() as f64
        };

        Self {
            total_original_tokens: original,
            total_minified_tokens: minified,
            savings_percent,
            avg_savings_per_class,
            shared_content: map.shared_content(),
        }
    }
}

impl MinificationMap {
    /// Shorthand for [`Savings::of`].
    #[must_use]
    pub fn savings(&self) -> Savings {
        Savings::of(self)
    }
}
