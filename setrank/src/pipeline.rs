//! Rank pipeline: the end-to-end operation invoked once per query change.
//!
//! Score every item, stable-sort descending, hand the ordered ids to the
//! presentation layer. Pure function of its inputs, no I/O. Stability matters:
//! tied scores must keep the corpus's original relative order so re-renders
//! never visibly shuffle, and an empty query (all scores 0) degenerates to the
//! corpus order by construction rather than by special case.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::TagFilter;
use crate::frequency::{TagFrequencyTable, WordFrequencyTable};
use crate::models::{Searchable, TagSearchable};
use crate::scoring::{self, SENTINEL_SCORE};
use crate::Result;

/// One scored item in a ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry {
    /// Id of the ranked item
    pub id: String,

    /// Relevance score; non-negative, or the sentinel for filter-excluded items
    pub score: f64,
}

impl RankedEntry {
    /// Whether this entry was excluded by the tag filter
    pub fn is_excluded(&self) -> bool {
        self.score == SENTINEL_SCORE
    }
}

/// The ordered outcome of one scoring pass over the corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ranking {
    /// The query this ranking answers
    query: String,

    /// Entries in descending score order, ties in corpus order
    entries: Vec<RankedEntry>,
}

impl Ranking {
    /// The query this ranking was computed for
    pub fn query(&self) -> &str {
        &self.query
    }

    /// All entries, filter-excluded ones included, in rank order
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Entries that were not excluded by the tag filter, in rank order
    pub fn visible(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter().filter(|e| !e.is_excluded())
    }

    /// Ordered item ids, filter-excluded ones included
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Number of entries (always the corpus size)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus was empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rank untagged items against a query.
///
/// Every item is scored with [`scoring::score_plain`]; an empty corpus yields
/// an empty ranking.
pub fn rank<T: Searchable>(
    items: &[T],
    query: &str,
    word_table: &WordFrequencyTable,
) -> Result<Ranking> {
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let score = scoring::score_plain(query, item, word_table)?;
        entries.push(RankedEntry {
            id: item.id().to_string(),
            score,
        });
    }
    Ok(finish(query, entries))
}

/// Rank tagged items against a query with an inclusive tag filter.
///
/// Every item is scored with [`scoring::score_tagged`]; filter-rejected items
/// stay in the ranking with the sentinel score and sort last.
pub fn rank_tagged<T: TagSearchable>(
    items: &[T],
    query: &str,
    word_table: &WordFrequencyTable,
    tag_table: &TagFrequencyTable,
    filter: &TagFilter,
) -> Result<Ranking> {
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let score = scoring::score_tagged(query, item, word_table, tag_table, filter)?;
        entries.push(RankedEntry {
            id: item.id().to_string(),
            score,
        });
    }
    Ok(finish(query, entries))
}

/// Stable descending sort; equal scores keep their input (corpus) order.
fn finish(query: &str, mut entries: Vec<RankedEntry>) -> Ranking {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(query, items = entries.len(), "ranked corpus");
    Ranking {
        query: query.to_string(),
        entries,
    }
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
    fn test_matching_items_rank_first_in_corpus_order() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        let ranking = rank(&items, "chest", &table).unwrap();
        // Items 1 and 3 score 2, items 2 and 4 score 0; ties keep corpus order
        assert_eq!(ranking.ids(), ["1", "3", "2", "4"]);
    }

    #[test]
    fn test_empty_query_preserves_corpus_order() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        let ranking = rank(&items, "", &table).unwrap();
        assert_eq!(ranking.ids(), ["1", "2", "3", "4"]);
        assert!(ranking.entries().iter().all(|e| e.score == 0.0));
    }

    #[test]
    fn test_whitespace_query_preserves_corpus_order() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        let ranking = rank(&items, "  \t ", &table).unwrap();
        assert_eq!(ranking.ids(), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_empty_corpus_yields_empty_ranking() {
        let items: Vec<Item> = vec![];
        let table = WordFrequencyTable::build(&items);
        let ranking = rank(&items, "chest", &table).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_rarer_terms_outrank_common_ones() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        // "tricep pulldowns" both hit only item 4 (weight 3 each)
        let ranking = rank(&items, "tricep chest", &table).unwrap();
        // Item 4: tricep (3). Items 1, 3: chest (2).
        assert_eq!(ranking.ids(), ["4", "1", "3", "2"]);
    }

    #[test]
    fn test_filtered_items_sink_below_every_valid_score() {
        let items = tagged_corpus();
        let word_table = WordFrequencyTable::build(&items);
        let tag_table = TagFrequencyTable::build(&items);
        let filter = TagFilter::new(["triceps"]);

        let ranking = rank_tagged(&items, "chest", &word_table, &tag_table, &filter).unwrap();
        // Item 4 passes with score 0; items 1-3 are sentinel-scored
        assert_eq!(ranking.ids(), ["4", "1", "2", "3"]);
        assert_eq!(ranking.entries()[0].score, 0.0);
        assert!(ranking.entries()[1..].iter().all(RankedEntry::is_excluded));

        let visible: Vec<&str> = ranking.visible().map(|e| e.id.as_str()).collect();
        assert_eq!(visible, ["4"]);
    }

    #[test]
    fn test_tagged_empty_query_preserves_corpus_order() {
        let items = tagged_corpus();
        let word_table = WordFrequencyTable::build(&items);
        let tag_table = TagFrequencyTable::build(&items);
        let ranking =
            rank_tagged(&items, "", &word_table, &tag_table, &TagFilter::none()).unwrap();
        assert_eq!(ranking.ids(), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_ranking_records_its_query() {
        let items = corpus();
        let table = WordFrequencyTable::build(&items);
        let ranking = rank(&items, "chest", &table).unwrap();
        assert_eq!(ranking.query(), "chest");
    }
}
