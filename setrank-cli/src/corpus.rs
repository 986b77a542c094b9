//! Corpus loading for the CLI.
//!
//! The engine treats the corpus source as an external collaborator; here it is
//! a JSON file holding an ordered array of items, each with an `id`, a `name`
//! and an optional `tags` array. File order is the corpus order and decides
//! every tie.

use std::collections::HashMap;
use std::path::Path;

use setrank::models::{Searchable, TaggedItem};
use setrank::{Result, SetrankError};

/// Load an ordered corpus from a JSON file.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<TaggedItem>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        SetrankError::Corpus(format!("failed to read corpus file {}: {}", path.display(), e))
    })?;

    let items: Vec<TaggedItem> = serde_json::from_str(&raw).map_err(|e| {
        SetrankError::Corpus(format!("failed to parse corpus file {}: {}", path.display(), e))
    })?;

    validate_corpus(&items)?;
    Ok(items)
}

/// Reject corpora the engine's contracts cannot hold for: duplicate item ids
/// or duplicate tags on one item.
fn validate_corpus(items: &[TaggedItem]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        if let Some(first) = seen.insert(item.id(), index) {
            return Err(SetrankError::Corpus(format!(
                "duplicate item id '{}' at positions {} and {}",
                item.id(),
                first,
                index
            )));
        }

        for (i, tag) in item.tags.iter().enumerate() {
            if item.tags[..i].contains(tag) {
                return Err(SetrankError::Corpus(format!(
                    "item '{}' carries tag '{}' more than once",
                    item.id(),
                    tag
                )));
            }
        }
    }
    Ok(())
}
