//! Corpus model types

mod item;

pub use item::{Item, ItemBuilder, Searchable, Tag, TagSearchable, TaggedItem};
