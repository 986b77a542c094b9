//! Item model representing corpus entries
//!
//! A corpus is an ordered, in-memory collection of items owned by the caller.
//! Items are immutable for the lifetime of a ranking session; the engine only
//! ever references them and hands their ids back in ranked order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category tag attached to an item.
///
/// Tag identity is its name; a corpus is assumed to attribute each tag at most
/// once per item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Tag {
    /// Unique tag name
    pub name: String,
}

impl Tag {
    /// Create a tag from a name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::new(name)
    }
}

/// Core corpus entry: a unique id plus a whitespace-delimited display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier for the item
    pub id: String,

    /// Display name, a sequence of whitespace-delimited words
    pub name: String,
}

impl Item {
    /// Create a new item
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An item annotated with a set of category tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggedItem {
    /// The underlying item
    #[serde(flatten)]
    pub item: Item,

    /// Tags attached to the item, unique per item
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl TaggedItem {
    /// Create a tagged item from an id, a name and tags
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N, tags: Vec<Tag>) -> Self {
        Self {
            item: Item::new(id, name),
            tags,
        }
    }

    /// Create a builder for more complex item creation
    pub fn builder<I: Into<String>, N: Into<String>>(id: I, name: N) -> ItemBuilder {
        ItemBuilder::new(id, name)
    }

    /// Check whether this item carries a tag with the given name
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

/// Anything the engine can rank: has a stable id and a display name.
///
/// Frequency tables, the scorer and the pipeline are generic over this trait
/// so a table built from one corpus type can only ever be queried against the
/// same type of corpus.
pub trait Searchable {
    /// Stable unique identifier
    fn id(&self) -> &str;

    /// Display name, whitespace-delimited words
    fn name(&self) -> &str;
}

/// A searchable item that additionally carries tags.
pub trait TagSearchable: Searchable {
    /// Tags attached to this item, unique per item
    fn tags(&self) -> &[Tag];
}

impl Searchable for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Searchable for TaggedItem {
    fn id(&self) -> &str {
        &self.item.id
    }

    fn name(&self) -> &str {
        &self.item.name
    }
}

impl TagSearchable for TaggedItem {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// Builder for creating TaggedItem instances
pub struct ItemBuilder {
    item: TaggedItem,
}

impl ItemBuilder {
    /// Create a new item builder with the given id and name
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            item: TaggedItem::new(id, name, Vec::new()),
        }
    }

    /// Add a single tag (skipped if the item already carries it)
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        let tag = Tag::new(tag);
        if !self.item.tags.contains(&tag) {
            self.item.tags.push(tag);
        }
        self
    }

    /// Replace the tag set
    pub fn tags(mut self, tags: Vec<&str>) -> Self {
        self.item.tags = tags.iter().map(|t| Tag::new(*t)).collect();
        self
    }

    /// Build the final TaggedItem instance
    pub fn build(self) -> TaggedItem {
        self.item
    }
}
