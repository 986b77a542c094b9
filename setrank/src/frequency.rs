//! Term frequency model for the ranking session.
//!
//! Answers "how common is this word/tag across the corpus?" in O(1) after a
//! single O(n·w) build pass. Tables count *distinct items*, not raw token
//! occurrences: an item whose name contains the same word twice still counts
//! once. Tables are built once per session from a corpus snapshot and never
//! mutated afterwards; a changed corpus means building a replacement table,
//! never editing one in place.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{Searchable, TagSearchable};

/// Error type for frequency model operations
#[derive(Debug, thiserror::Error)]
pub enum FrequencyError {
    /// A key was looked up that the table was never built with.
    ///
    /// This is a contract violation by the caller, not a runtime condition:
    /// lookups must be guarded with [`WordFrequencyTable::contains`] /
    /// [`TagFrequencyTable::contains`]. Silently defaulting to zero would
    /// corrupt scores without any visible symptom, so the lookup fails loudly.
    #[error("key '{key}' is not present in the frequency table")]
    UnknownKey {
        /// The offending key
        key: String,
    },
}

/// Result type for frequency model operations
pub type Result<T> = std::result::Result<T, FrequencyError>;

/// Mapping from lowercase name word to the number of distinct items whose
/// name contains that word, plus the number of items the table was built from.
///
/// Invariant: `0 < count <= total_items` for every key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    counts: HashMap<String, u32>,
    total_items: u32,
}

impl WordFrequencyTable {
    /// Build the table from a corpus snapshot.
    ///
    /// Deterministic given a fixed item ordering. An empty corpus yields a
    /// table with `total_items == 0` and no keys; every subsequent lookup on
    /// such a table errors, so callers must special-case empty corpora
    /// upstream.
    pub fn build<T: Searchable>(items: &[T]) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();

        for item in items {
            let distinct: HashSet<String> = item
                .name()
                .to_lowercase()
                .split_whitespace()
                .map(str::to_owned)
                .collect();
            for word in distinct {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        let table = Self {
            counts,
            total_items: items.len() as u32,
        };
        debug!(
            total_items = table.total_items,
            distinct_words = table.len(),
            "built word frequency table"
        );
        table
    }

    /// Number of items the table was built from
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Number of distinct words in the table
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table holds no words at all
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether the table was built with the given lowercase word
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Number of distinct items whose name contains the given word, if any
    pub fn count(&self, word: &str) -> Option<u32> {
        self.counts.get(word).copied()
    }

    /// Rarity weight for a word: `total_items - count(word)`.
    ///
    /// Words present in almost every item weigh near zero; words present in
    /// few items weigh near `total_items`. The key must be present in the
    /// table; guard with [`contains`](Self::contains) first.
    pub fn inverse_frequency(&self, word: &str) -> Result<u32> {
        match self.counts.get(word) {
            Some(count) => Ok(self.total_items - count),
            None => Err(FrequencyError::UnknownKey {
                key: word.to_string(),
            }),
        }
    }

    /// Iterate over `(word, count)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

/// Mapping from tag name to the number of distinct items carrying that tag,
/// plus the number of items the table was built from.
///
/// Same invariants and lifecycle as [`WordFrequencyTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFrequencyTable {
    counts: HashMap<String, u32>,
    total_items: u32,
}

impl TagFrequencyTable {
    /// Build the table from a corpus snapshot.
    ///
    /// Tags are assumed unique per item, so no per-item de-duplication step
    /// is needed.
    pub fn build<T: TagSearchable>(items: &[T]) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();

        for item in items {
            for tag in item.tags() {
                *counts.entry(tag.name.to_lowercase()).or_insert(0) += 1;
            }
        }

        let table = Self {
            counts,
            total_items: items.len() as u32,
        };
        debug!(
            total_items = table.total_items,
            distinct_tags = table.len(),
            "built tag frequency table"
        );
        table
    }

    /// Number of items the table was built from
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Number of distinct tags in the table
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table holds no tags at all
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether the table was built with the given lowercase tag name
    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    /// Number of distinct items carrying the given tag, if any
    pub fn count(&self, tag: &str) -> Option<u32> {
        self.counts.get(tag).copied()
    }

    /// Rarity weight for a tag: `total_items - count(tag)`.
    ///
    /// The key must be present in the table; guard with
    /// [`contains`](Self::contains) first.
    pub fn inverse_frequency(&self, tag: &str) -> Result<u32> {
        match self.counts.get(tag) {
            Some(count) => Ok(self.total_items - count),
            None => Err(FrequencyError::UnknownKey {
                key: tag.to_string(),
            }),
        }
    }

    /// Iterate over `(tag, count)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }
}
