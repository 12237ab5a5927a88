//! Export and import of minification maps.
//!
//! The persisted layout is a plain JSON object:
//!
//! ```json
//! {
//!   "counter": 2,
//!   "entries": [
//!     { "original": "btn-primary", "minified": "a", "classes": "px-4 py-2", "hash": "…" },
//!     { "original": "card", "minified": "b", "classes": "rounded-lg p-6", "hash": "…" }
//!   ]
//! }
//! ```
//!
//! Older files name the entry list `mappings`; both keys are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::map::{MinificationMap, MinifiedClassEntry};
use crate::name::{decode_name, is_valid_name};

/// The serializable form of a [`MinificationMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedMap {
    /// Next sequence index to allocate.
    pub counter: u64,
    /// Entries in insertion order.
    #[serde(alias = "mappings")]
    pub entries: Vec<MinifiedClassEntry>,
}

impl ExportedMap {
    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses the JSON layout written by [`to_json_pretty`](Self::to_json_pretty).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A problem found by [`MinificationMap::import_checked`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImportIssue {
    /// Two entries share a short name; the later one was kept.
    DuplicateMinified {
        /// The shared short name.
        minified: String,
        /// Semantic name of the entry that was dropped.
        dropped: String,
        /// Semantic name of the entry that was kept.
        kept: String,
    },
    /// Two entries share a semantic name; lookups resolve to the later one.
    DuplicateOriginal {
        /// The shared semantic name.
        original: String,
        /// Short name of the earlier entry.
        earlier: String,
        /// Short name of the later entry.
        later: String,
    },
    /// A short name contains characters outside `a-zA-Z`.
    InvalidName {
        /// The offending short name.
        minified: String,
    },
    /// The counter would re-issue a name already in the file.
    CounterBehind {
        /// Counter read from the file.
        supplied: u64,
        /// Counter the map was repaired to.
        required: u64,
    },
}

impl fmt::Display for ImportIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateMinified {
                minified,
                dropped,
                kept,
            } => write!(
                f,
                "short name \"{minified}\" appears twice; \"{dropped}\" was replaced by \"{kept}\""
            ),
            Self::DuplicateOriginal {
                original,
                earlier,
                later,
            } => write!(
                f,
                "\"{original}\" is mapped to both \"{earlier}\" and \"{later}\"; using \"{later}\""
            ),
            Self::InvalidName { minified } => {
                write!(f, "short name \"{minified}\" is not a run of ASCII letters")
            }
            Self::CounterBehind { supplied, required } => {
                write!(f, "counter {supplied} is behind the entries; raised to {required}")
            }
        }
    }
}

impl MinificationMap {
    /// Exports the map in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cm_minify::MinificationMap;
    ///
    /// let mut map = MinificationMap::new();
    /// map.minify("btn-primary", "px-4 py-2");
    ///
    /// let restored = MinificationMap::import(map.export());
    /// assert_eq!(restored.lookup_semantic("btn-primary"), Some("a"));
    /// assert_eq!(restored.counter(), 1);
    /// ```
    #[must_use]
    pub fn export(&self) -> ExportedMap {
        ExportedMap {
            counter: self.counter(),
            entries: self.iter().cloned().collect(),
        }
    }

    /// Rebuilds a map from exported data, trusting the supplied counter.
    ///
    /// A later entry with an already seen short name replaces the earlier
    /// one. Hashes are taken as given.
    #[must_use]
    pub fn import(data: ExportedMap) -> Self {
        let mut map = Self::new();
        for entry in data.entries {
            map.insert(entry);
        }
        map.set_counter(data.counter);
        map
    }

    /// Rebuilds a map like [`import`](Self::import) and reports anything
    /// inconsistent in the data.
    ///
    /// A counter that would re-issue a stored name is raised to one past the
    /// highest decodable short name.
    #[must_use]
    pub fn import_checked(data: ExportedMap) -> (Self, Vec<ImportIssue>) {
        let mut map = Self::new();
        let mut issues = Vec::new();
        let mut required = 0_u64;

        for entry in data.entries {
            if is_valid_name(&entry.minified) {
                if let Some(index) = decode_name(&entry.minified) {
                    required = required.max(index.saturating_add(1));
                }
            } else {
                issues.push(ImportIssue::InvalidName {
                    minified: entry.minified.clone(),
                });
            }

            if let Some(earlier) = map
                .lookup_semantic(&entry.original)
                .filter(|&earlier| earlier != entry.minified)
            {
                issues.push(ImportIssue::DuplicateOriginal {
                    original: entry.original.clone(),
                    earlier: earlier.to_owned(),
                    later: entry.minified.clone(),
                });
            }

            let kept = entry.original.clone();
            if let Some(replaced) = map.insert(entry) {
                issues.push(ImportIssue::DuplicateMinified {
                    minified: replaced.minified,
                    dropped: replaced.original,
                    kept,
                });
            }
        }

        if data.counter < required {
            issues.push(ImportIssue::CounterBehind {
                supplied: data.counter,
                required,
            });
            map.set_counter(required);
        } else {
            map.set_counter(data.counter);
        }

        for issue in &issues {
            warn!(%issue, "minification map import");
        }
        debug!(
            entries = map.len(),
            counter = map.counter(),
            issues = issues.len(),
            "imported minification map"
        );
        (map, issues)
    }
}
