//! Session ownership of the frequency model and the live re-rank contract.
//!
//! A [`RankingSession`] owns the frequency tables built once from a corpus
//! snapshot; the tables are read-only thereafter and may be shared freely
//! across rank calls. They are never module-level state: every session, test
//! and corpus gets its own explicitly constructed model. A corpus change
//! means rebuilding, which swaps in whole replacement tables in one
//! assignment so no caller can observe a table mid-update.
//!
//! A [`LiveRanker`] layers the interactive contract on top: each keystroke
//! replaces the previous query outright (last-write-wins), and a caller that
//! ranks asynchronously can use [`LiveRanker::accept`] to reject a ranking
//! computed for a query that is no longer current.

use tracing::debug;

use crate::filter::TagFilter;
use crate::frequency::{TagFrequencyTable, WordFrequencyTable};
use crate::models::{Searchable, TagSearchable};
use crate::pipeline::{self, Ranking};
use crate::{Result, SetrankError};

/// Owner of the term frequency model for one ranking session.
#[derive(Debug, Clone)]
pub struct RankingSession {
    word_table: WordFrequencyTable,
    tag_table: Option<TagFrequencyTable>,
}

impl RankingSession {
    /// Build a session over an untagged corpus snapshot.
    pub fn new<T: Searchable>(items: &[T]) -> Self {
        Self {
            word_table: WordFrequencyTable::build(items),
            tag_table: None,
        }
    }

    /// Build a session over a tagged corpus snapshot, with both word and tag
    /// tables.
    pub fn with_tags<T: TagSearchable>(items: &[T]) -> Self {
        Self {
            word_table: WordFrequencyTable::build(items),
            tag_table: Some(TagFrequencyTable::build(items)),
        }
    }

    /// The session's word frequency table
    pub fn word_table(&self) -> &WordFrequencyTable {
        &self.word_table
    }

    /// The session's tag frequency table, if built with tags
    pub fn tag_table(&self) -> Option<&TagFrequencyTable> {
        self.tag_table.as_ref()
    }

    /// Whether the session was built from an empty corpus.
    ///
    /// No ranking is possible for such a session beyond the empty result;
    /// callers should show an unranked or empty state.
    pub fn is_degenerate(&self) -> bool {
        self.word_table.total_items() == 0
    }

    /// Rank items by name relevance only.
    pub fn rank<T: Searchable>(&self, items: &[T], query: &str) -> Result<Ranking> {
        pipeline::rank(items, query, &self.word_table)
    }

    /// Rank tagged items by name + tag relevance, applying the tag filter.
    ///
    /// Errors if the session was built without tags ([`Self::with_tags`]);
    /// ranking a tagged corpus against a tagless model is a wiring defect,
    /// not a condition to paper over.
    pub fn rank_tagged<T: TagSearchable>(
        &self,
        items: &[T],
        query: &str,
        filter: &TagFilter,
    ) -> Result<Ranking> {
        let tag_table = self.tag_table.as_ref().ok_or_else(|| {
            SetrankError::Corpus("session was built without a tag frequency table".to_string())
        })?;
        pipeline::rank_tagged(items, query, &self.word_table, tag_table, filter)
    }

    /// Rebuild the model from a new untagged corpus snapshot.
    ///
    /// The old tables are replaced atomically as whole values.
    pub fn rebuild<T: Searchable>(&mut self, items: &[T]) {
        debug!(items = items.len(), "rebuilding ranking session");
        *self = Self::new(items);
    }

    /// Rebuild the model from a new tagged corpus snapshot.
    pub fn rebuild_with_tags<T: TagSearchable>(&mut self, items: &[T]) {
        debug!(items = items.len(), "rebuilding ranking session with tags");
        *self = Self::with_tags(items);
    }
}

/// The live re-rank trigger: ranks against the current query and lets callers
/// reject stale results.
///
/// The engine itself is synchronous and always runs each rank to completion;
/// cancellation is purely the caller's concern, expressed here as
/// [`accept`](Self::accept) returning false for rankings whose query is no
/// longer the current one.
#[derive(Debug, Clone)]
pub struct LiveRanker {
    session: RankingSession,
    current_query: String,
}

impl LiveRanker {
    /// Wrap a session with an initially empty query.
    pub fn new(session: RankingSession) -> Self {
        Self {
            session,
            current_query: String::new(),
        }
    }

    /// The most recently supplied query string
    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    /// The underlying session
    pub fn session(&self) -> &RankingSession {
        &self.session
    }

    /// Record a query edit and recompute the ranking for it.
    ///
    /// The new query replaces the previous one outright; any ranking produced
    /// for an earlier query stops being acceptable the moment this returns.
    pub fn on_query_change<T: Searchable>(&mut self, items: &[T], query: &str) -> Result<Ranking> {
        self.current_query = query.to_string();
        self.session.rank(items, query)
    }

    /// Record a query edit and recompute the tagged ranking for it.
    pub fn on_query_change_tagged<T: TagSearchable>(
        &mut self,
        items: &[T],
        query: &str,
        filter: &TagFilter,
    ) -> Result<Ranking> {
        self.current_query = query.to_string();
        self.session.rank_tagged(items, query, filter)
    }

    /// Whether a ranking still answers the current query.
    ///
    /// Rankings for any other query string are stale and must not be applied
    /// out of order.
    pub fn accept(&self, ranking: &Ranking) -> bool {
        ranking.query() == self.current_query
    }
}
