//! Inclusive tag filter, independent of scoring.
//!
//! The filter never removes items from the sequence: rejected items are
//! score-penalized to the sentinel by the scorer and sink to the bottom of the
//! ranking. The presentation layer decides whether to hide or dim them, which
//! keeps "clear filter" a pure re-sort with the original dataset intact.

use std::collections::HashSet;

use crate::models::TagSearchable;

/// A set of tags the user has explicitly chosen to filter by.
///
/// An empty selection is a no-op: every item passes. Otherwise an item passes
/// iff it carries at least one selected tag. Matching is exact name equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    selected: HashSet<String>,
}

impl TagFilter {
    /// The empty filter; every item passes
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a filter from selected tag names
    pub fn new<I, S>(selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether no tags are selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected tags
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether the given tag name is selected
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Whether the item passes the filter.
    ///
    /// Empty selection passes everything; otherwise the intersection between
    /// the item's tags and the selection must be non-empty.
    pub fn passes<T: TagSearchable>(&self, item: &T) -> bool {
        if self.selected.is_empty() {
            return true;
        }
        item.tags().iter().any(|t| self.selected.contains(&t.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaggedItem;

    fn chest_item() -> TaggedItem {
        TaggedItem::builder("1", "Chest Flies").tag("chest").build()
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = TagFilter::none();
        assert!(filter.passes(&chest_item()));
        let untagged = TaggedItem::new("2", "Dumbbell Pullovers", vec![]);
        assert!(filter.passes(&untagged));
    }

    #[test]
    fn test_intersection_required_when_selected() {
        let filter = TagFilter::new(["triceps"]);
        assert!(!filter.passes(&chest_item()));

        let triceps = TaggedItem::builder("4", "Tricep Pulldowns").tag("triceps").build();
        assert!(filter.passes(&triceps));
    }

    #[test]
    fn test_any_selected_tag_suffices() {
        let filter = TagFilter::new(["chest", "back"]);
        assert!(filter.passes(&chest_item()));
    }

    #[test]
    fn test_matching_is_exact_equality() {
        let filter = TagFilter::new(["chest"]);
        let close = TaggedItem::builder("5", "Cable Crossover").tag("chestday").build();
        assert!(!filter.passes(&close));
    }
}
