//! # Setrank
//!
//! Client-side relevance ranking for a fixed, in-memory corpus of named,
//! optionally tagged items (exercises, templates, profiles). Setrank builds a
//! corpus-wide frequency model once per search session and re-ranks the whole
//! corpus on every keystroke: rarer name words and tags weigh more, an
//! inclusive tag filter pushes non-matching items to the bottom via a sentinel
//! score, and ties always preserve the corpus's original order.
//!
//! ## Quick Start
//!
//! ```rust
//! use setrank::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let items = vec![
//!         Item::new("1", "Chest Flies"),
//!         Item::new("2", "Dumbbell Pullovers"),
//!         Item::new("3", "Incline Chest Press"),
//!         Item::new("4", "Tricep Pulldowns"),
//!     ];
//!
//!     // Build the frequency model once per session
//!     let session = RankingSession::new(&items);
//!
//!     // Re-rank on every query change
//!     let ranking = session.rank(&items, "chest")?;
//!     assert_eq!(ranking.ids(), ["1", "3", "2", "4"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Frequency model** ([`frequency`]): how many distinct items contain each
//!   name word / carry each tag. Built once, immutable, shared read-only.
//! - **Scorer** ([`scoring`]): linear inverse-frequency weighting
//!   (`total_items - count`), name and tag fields combined additively.
//! - **Filter** ([`filter`]): inclusive "at least one selected tag"
//!   constraint, expressed as a sentinel score rather than removal.
//! - **Pipeline** ([`pipeline`]): score, stable-sort descending, hand back
//!   ordered ids.
//! - **Session** ([`session`]): owns the tables and implements the live
//!   re-rank contract (last query wins, stale rankings are rejectable).
//!
//! The engine is synchronous pure computation: no storage, no network, no
//! async surface. Corpus loading and result presentation are the caller's
//! concern.

pub mod config;
pub mod filter;
pub mod frequency;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod session;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export the session API (recommended entry point)
    pub use crate::session::{LiveRanker, RankingSession};

    // Re-export the corpus model types
    pub use crate::models::{Item, ItemBuilder, Searchable, Tag, TagSearchable, TaggedItem};

    // Re-export frequency tables for advanced usage
    pub use crate::frequency::{TagFrequencyTable, WordFrequencyTable};

    // Re-export filter and pipeline types
    pub use crate::filter::TagFilter;
    pub use crate::pipeline::{RankedEntry, Ranking};

    // Re-export config types
    pub use crate::config::{ExcludedPolicy, LogFormat, LogLevel, RankingConfig, SetrankConfig};

    // Re-export the sentinel constant
    pub use crate::scoring::SENTINEL_SCORE;

    // Re-export essential result type
    pub use crate::{Result, SetrankError};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for setrank operations
#[derive(Debug, thiserror::Error)]
pub enum SetrankError {
    /// A frequency lookup violated its precondition
    #[error("Frequency model error: {0}")]
    Frequency(#[from] crate::frequency::FrequencyError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Corpus error (malformed or unusable corpus input)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for SetrankError {
    fn from(err: crate::config::ConfigError) -> Self {
        SetrankError::Configuration(err.to_string())
    }
}

/// Result type for setrank operations
pub type Result<T> = std::result::Result<T, SetrankError>;
