//! Relevance scorer: one real-valued score per (query, item) pair.
//!
//! The weighting is a deliberately linear inverse-document-frequency
//! approximation: each matching term contributes `total_items - count(term)`,
//! so corpus-wide common words ("press") cannot dominate rare, specific ones.
//! A log-scaled or length-normalized variant is a possible future extension;
//! the linear form is the contract.
//!
//! Valid scores are non-negative. Items rejected by the tag filter score
//! exactly [`SENTINEL_SCORE`] so they sort below every valid score while
//! staying in the sequence.

use tracing::trace;

use crate::filter::TagFilter;
use crate::frequency::{Result, TagFrequencyTable, WordFrequencyTable};
use crate::models::{Searchable, TagSearchable};

/// Reserved score marking items excluded by the tag filter.
///
/// Strictly lower than any valid score (valid scores are non-negative), so
/// excluded items sort to the bottom and remain recognizable to the
/// presentation layer.
pub const SENTINEL_SCORE: f64 = -1.0;

/// Split a raw query into lowercase terms, discarding empty ones.
///
/// A pure-whitespace or empty query yields no terms; downstream that means
/// every item scores 0 and the corpus keeps its natural order.
pub fn query_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Score an item's name against a query.
///
/// Each query term that occurs in the lowercased name as a substring
/// contributes its inverse frequency, once per term regardless of how many
/// times it occurs. Terms the corpus has never seen contribute 0: they come
/// from free user input, so their absence carries no information and is not
/// an error. Absent keys are never looked up, so the table's precondition
/// holds by construction.
pub fn score_plain<T: Searchable>(
    query: &str,
    item: &T,
    word_table: &WordFrequencyTable,
) -> Result<f64> {
    let name = item.name().to_lowercase();
    let mut score = 0.0;

    for term in query_terms(query) {
        if name.contains(&term) && word_table.contains(&term) {
            let weight = word_table.inverse_frequency(&term)?;
            trace!(item = item.id(), term = %term, weight, "name term hit");
            score += weight as f64;
        }
    }

    Ok(score)
}

/// Score an item against a query using both its name and its tags, then apply
/// the tag filter.
///
/// Tag matches are strictly additive on top of name matches: an item matching
/// a term in both fields scores higher than one matching in either alone.
/// Every tag weight is looked up by the tag's own name, which a table built
/// from the same corpus is guaranteed to contain; a missing key here means the
/// tables and corpus are mismatched and the lookup fails loudly.
///
/// If the filter rejects the item the accumulated score is overridden with
/// [`SENTINEL_SCORE`].
pub fn score_tagged<T: TagSearchable>(
    query: &str,
    item: &T,
    word_table: &WordFrequencyTable,
    tag_table: &TagFrequencyTable,
    filter: &TagFilter,
) -> Result<f64> {
    let mut score = score_plain(query, item, word_table)?;

    for term in query_terms(query) {
        for tag in item.tags() {
            let tag_name = tag.name.to_lowercase();
            if tag_name.contains(&term) {
                let weight = tag_table.inverse_frequency(&tag_name)?;
                trace!(item = item.id(), tag = %tag_name, weight, "tag term hit");
                score += weight as f64;
            }
        }
    }

    if !filter.passes(item) {
        return Ok(SENTINEL_SCORE);
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, TaggedItem};

    fn corpus() -> Vec<Item> {
        vec![
            Item::new("1", "Chest Flies"),
            Item::new("2", "Dumbbell Pullovers"),
            Item::new("3", "Incline Chest Press"),
            Item::new("4", "Tricep Pulldowns"),
        ]
    }

    fn tagged_corpus() -> Vec<TaggedItem> {
        vec![
            TaggedItem::builder("1", "Chest Flies").tag("chest").build(),
            TaggedItem::builder("2", "Dumbbell Pullovers").tag("chest").build(),
            TaggedItem::builder("3", "Incline Chest Press").tag("chest").build(),
            TaggedItem::builder("4", "Tricep Pulldowns").tag("triceps").build(),
        ]
    }

    #[test]
    fn test_query_terms_discard_whitespace() {
        assert!(query_terms("").is_empty());
        assert!(query_terms("   \t ").is_empty());
        assert_eq!(query_terms("  Chest   press "), ["chest", "press"]);
    }

    #[test]
    fn test_plain_score_uses_inverse_frequency() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        // "chest" appears in 2 of 4 items -> weight 2
        let score = score_plain("chest", &items[0], &table).unwrap();
        assert_eq!(score, 2.0);
        // "pulldowns" appears in 1 item -> weight 3
        let score = score_plain("pulldowns", &items[3], &table).unwrap();
        assert_eq!(score, 3.0);
    }

    #[test]
    fn test_plain_score_no_match_is_zero() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        assert_eq!(score_plain("chest", &items[1], &table).unwrap(), 0.0);
        assert_eq!(score_plain("chest", &items[3], &table).unwrap(), 0.0);
    }

    #[test]
    fn test_unknown_query_term_contributes_zero() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        assert!(!table.contains("kettlebell"));
        assert_eq!(score_plain("kettlebell", &items[0], &table).unwrap(), 0.0);
    }

    #[test]
    fn test_substring_containment_is_case_insensitive() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        let upper = score_plain("CHEST", &items[0], &table).unwrap();
        let lower = score_plain("chest", &items[0], &table).unwrap();
        assert_eq!(upper, lower);
        assert!(upper > 0.0);
    }

    #[test]
    fn test_term_contributes_once_despite_repeats() {
        let items = vec![Item::new("1", "Press Press Press"), Item::new("2", "Row")];
        let table = WordFrequencyTable::build(&items);
        // weight of "press" = 2 - 1 = 1; repeats in the name add nothing
        assert_eq!(score_plain("press", &items[0], &table).unwrap(), 1.0);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        for item in &items {
            assert_eq!(score_plain("", item, &table).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_tag_match_is_additive() {
        let items = tagged_corpus();
        let word_table = WordFrequencyTable::build(&items);
        let tag_table = TagFrequencyTable::build(&items);
        let filter = TagFilter::none();

        // Item 1 matches "chest" in both name (weight 2) and tag (weight 1)
        let both = score_tagged("chest", &items[0], &word_table, &tag_table, &filter).unwrap();
        assert_eq!(both, 3.0);

        // Item 2 matches "chest" only via its tag (weight 1)
        let tag_only = score_tagged("chest", &items[1], &word_table, &tag_table, &filter).unwrap();
        assert_eq!(tag_only, 1.0);

        assert!(both > tag_only);
    }

    #[test]
    fn test_filter_rejection_forces_sentinel() {
        let items = tagged_corpus();
        let word_table = WordFrequencyTable::build(&items);
        let tag_table = TagFrequencyTable::build(&items);
        let filter = TagFilter::new(["triceps"]);

        // Chest-tagged items fail the filter regardless of positive scores
        for item in &items[..3] {
            let score = score_tagged("chest", item, &word_table, &tag_table, &filter).unwrap();
            assert_eq!(score, SENTINEL_SCORE);
        }

        // The triceps item passes; no "chest" match anywhere -> 0, not -1
        let passing = score_tagged("chest", &items[3], &word_table, &tag_table, &filter).unwrap();
        assert_eq!(passing, 0.0);
    }

    #[test]
    fn test_mismatched_tag_table_fails_loudly() {
        let items = tagged_corpus();
        let word_table = WordFrequencyTable::build(&items);
        // Table built from a different corpus that never saw "triceps"
        let other = vec![TaggedItem::builder("9", "Squat").tag("legs").build()];
        let wrong_tags = TagFrequencyTable::build(&other);

        let result = score_tagged("tricep", &items[3], &word_table, &wrong_tags, &TagFilter::none());
        assert!(result.is_err());
    }
}
