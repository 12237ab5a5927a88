//! The minification map.
//!
//! A [`MinificationMap`] assigns each semantic class name a short name from
//! [`generate_name`](crate::generate_name), in the order names are first
//! seen. Entries are stored in a vector so iteration follows insertion order;
//! the hash maps are indexes into it.

use cm_core::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::digest::hash_classes;
use crate::name::generate_name;

/// One semantic name and the short name standing in for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifiedClassEntry {
    /// The semantic identifier, e.g. `btn-primary`.
    pub original: String,
    /// The generated short name, e.g. `a`.
    pub minified: String,
    /// The utility classes the name stands for.
    pub classes: String,
    /// Digest of `classes`, see [`hash_classes`].
    pub hash: String,
}

impl MinifiedClassEntry {
    /// Creates an entry, computing the digest of `classes`.
    #[must_use]
    pub fn new(
        original: impl Into<String>,
        minified: impl Into<String>,
        classes: impl Into<String>,
    ) -> Self {
        let classes = classes.into();
        Self {
            original: original.into(),
            minified: minified.into(),
            hash: hash_classes(&classes),
            classes,
        }
    }
}

/// Bidirectional mapping between semantic and minified class names.
///
/// # Examples
///
/// ```
/// use cm_minify::MinificationMap;
///
/// let mut map = MinificationMap::new();
/// assert_eq!(map.minify("btn-primary", "px-4 py-2").minified, "a");
/// assert_eq!(map.minify("card", "rounded-lg p-6").minified, "b");
///
/// // Re-minifying returns the existing entry and does not advance the counter.
/// assert_eq!(map.minify("btn-primary", "ignored").minified, "a");
/// assert_eq!(map.counter(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinificationMap {
    entries: Vec<MinifiedClassEntry>,
    by_minified: FxHashMap<String, usize>,
    name_to_minified: FxHashMap<String, String>,
    used_names: FxHashSet<String>,
    content_counts: FxHashMap<String, usize>,
    counter: u64,
}

impl MinificationMap {
    /// Creates an empty map with the counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `semantic_name`, allocating a short name on first
    /// use.
    ///
    /// A name that is already mapped keeps its entry, even when `classes`
    /// differs. Two semantic names with identical classes still get distinct
    /// short names; the overlap is only counted (see
    /// [`shared_content`](Self::shared_content)).
    pub fn minify(&mut self, semantic_name: &str, classes: &str) -> &MinifiedClassEntry {
        let existing = self
            .name_to_minified
            .get(semantic_name)
            .and_then(|minified| self.by_minified.get(minified))
            .copied();
        if let Some(index) = existing {
            return &self.entries[index];
        }

        let minified = self.allocate_name();
        trace!(semantic = semantic_name, minified = %minified, "allocated short name");
        let index = self.push(MinifiedClassEntry::new(semantic_name, minified, classes));
        &self.entries[index]
    }

    /// Returns the short name for `semantic_name`, if one was allocated.
    #[must_use]
    pub fn lookup_semantic(&self, semantic_name: &str) -> Option<&str> {
        self.name_to_minified.get(semantic_name).map(String::as_str)
    }

    /// Returns the entry stored under the short name `minified`.
    #[must_use]
    pub fn lookup_minified(&self, minified: &str) -> Option<&MinifiedClassEntry> {
        self.by_minified.get(minified).map(|&index| &self.entries[index])
    }

    /// Returns the entry for `semantic_name`, if one was allocated.
    #[must_use]
    pub fn entry(&self, semantic_name: &str) -> Option<&MinifiedClassEntry> {
        self.lookup_semantic(semantic_name)
            .and_then(|minified| self.lookup_minified(minified))
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MinifiedClassEntry> {
        self.entries.iter()
    }

    /// Iterates over `(semantic, minified)` pairs whose forward mapping is
    /// live, in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|entry| self.lookup_semantic(&entry.original) == Some(entry.minified.as_str()))
            .map(|entry| (entry.original.as_str(), entry.minified.as_str()))
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been minified.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The next sequence index to allocate.
    #[inline]
    #[must_use]
    pub const fn counter(&self) -> u64 {
        self.counter
    }

    /// Number of short names in use.
    #[inline]
    #[must_use]
    pub fn used_name_count(&self) -> usize {
        self.used_names.len()
    }

    /// Returns `true` if `minified` has been allocated.
    #[inline]
    #[must_use]
    pub fn is_name_used(&self, minified: &str) -> bool {
        self.used_names.contains(minified)
    }

    /// Number of entries whose classes digest matches an earlier entry.
    #[must_use]
    pub fn shared_content(&self) -> usize {
        self.content_counts
            .values()
            .map(|&count| count.saturating_sub(1))
            .sum()
    }

    pub(crate) const fn set_counter(&mut self, counter: u64) {
        self.counter = counter;
    }

    /// Stores `entry`, replacing any entry under the same short name.
    ///
    /// Returns the replaced entry. Its forward mapping is removed unless a
    /// later entry has already claimed that semantic name.
    pub(crate) fn insert(&mut self, entry: MinifiedClassEntry) -> Option<MinifiedClassEntry> {
        let Some(&index) = self.by_minified.get(&entry.minified) else {
            self.push(entry);
            return None;
        };

        let old_hash = self.entries[index].hash.clone();
        self.release_content(&old_hash);
        *self.content_counts.entry(entry.hash.clone()).or_default() += 1;
        self.name_to_minified
            .insert(entry.original.clone(), entry.minified.clone());

        let replaced = std::mem::replace(&mut self.entries[index], entry);
        if replaced.original != self.entries[index].original
            && self.lookup_semantic(&replaced.original) == Some(replaced.minified.as_str())
        {
            self.name_to_minified.remove(&replaced.original);
        }
        Some(replaced)
    }

    fn push(&mut self, entry: MinifiedClassEntry) -> usize {
        let index = self.entries.len();
        *self.content_counts.entry(entry.hash.clone()).or_default() += 1;
        self.name_to_minified
            .insert(entry.original.clone(), entry.minified.clone());
        self.by_minified.insert(entry.minified.clone(), index);
        self.used_names.insert(entry.minified.clone());
        self.entries.push(entry);
        index
    }

    fn release_content(&mut self, hash: &str) {
        if let Some(count) = self.content_counts.get_mut(hash) {
            *count -= 1;
            if *count == 0 {
                self.content_counts.remove(hash);
            }
        }
    }

    /// Takes the next free name. Only an imported map with a stale counter
    /// can hit an already used name; those indexes are skipped.
    fn allocate_name(&mut self) -> String {
        loop {
            let name = generate_name(self.counter);
            self.counter += 1;
            if !self.used_names.contains(&name) {
                return name;
            }
            trace!(name = %name, "skipping short name already in use");
        }
    }
}

impl<'a> IntoIterator for &'a MinificationMap {
    type Item = &'a MinifiedClassEntry;
    type IntoIter = std::slice::Iter<'a, MinifiedClassEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
