//! Result presentation for the CLI.
//!
//! The engine hands back ordered ids; this module renders them one row per
//! item, in the exact sequence produced. Sentinel-scored entries are hidden or
//! dimmed according to the configured policy, never reordered.

use std::collections::HashMap;

use colored::{Color, Colorize};
use serde_json::{json, Value};
use setrank::config::ExcludedPolicy;
use setrank::frequency::{TagFrequencyTable, WordFrequencyTable};
use setrank::models::{Searchable, TaggedItem};
use setrank::pipeline::{RankedEntry, Ranking};

pub struct CliColors;

impl CliColors {
    pub fn header() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn score() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }
}

/// Entries to present, with the excluded policy and limit applied.
fn presented<'a>(
    ranking: &'a Ranking,
    policy: ExcludedPolicy,
    limit: Option<usize>,
) -> Vec<&'a RankedEntry> {
    let entries: Vec<&RankedEntry> = match policy {
        ExcludedPolicy::Hide => ranking.visible().collect(),
        ExcludedPolicy::Dim => ranking.entries().iter().collect(),
    };
    match limit {
        Some(n) => entries.into_iter().take(n).collect(),
        None => entries,
    }
}

/// Render a ranking as a text table.
pub fn render_ranking(
    ranking: &Ranking,
    items: &[TaggedItem],
    policy: ExcludedPolicy,
    limit: Option<usize>,
    color: bool,
) -> String {
    let names: HashMap<&str, &TaggedItem> = items.iter().map(|i| (i.id(), i)).collect();
    let entries = presented(ranking, policy, limit);

    if entries.is_empty() {
        return "No results to show.".to_string();
    }

    let mut out = String::new();
    let header = format!("{:<6} {:<8} {:<32} {:>8}", "RANK", "ID", "NAME", "SCORE");
    if color {
        out.push_str(&header.color(CliColors::header()).bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    for (position, entry) in entries.iter().enumerate() {
        let name = names.get(entry.id.as_str()).map_or("<unknown>", |i| i.name());
        let row = format!(
            "{:<6} {:<8} {:<32} {:>8.1}",
            position + 1,
            entry.id,
            name,
            entry.score
        );
        if entry.is_excluded() {
            // Only reachable under the dim policy
            if color {
                out.push_str(&row.dimmed().to_string());
            } else {
                out.push_str(&format!("{} (filtered)", row));
            }
        } else if color {
            out.push_str(&row.color(CliColors::score()).to_string());
        } else {
            out.push_str(&row);
        }
        out.push('\n');
    }

    out
}

/// Render a ranking as machine-readable JSON.
pub fn ranking_to_json(
    ranking: &Ranking,
    items: &[TaggedItem],
    policy: ExcludedPolicy,
    limit: Option<usize>,
) -> Value {
    let names: HashMap<&str, &TaggedItem> = items.iter().map(|i| (i.id(), i)).collect();
    let entries: Vec<Value> = presented(ranking, policy, limit)
        .iter()
        .map(|entry| {
            json!({
                "id": entry.id,
                "name": names.get(entry.id.as_str()).map(|i| i.name()),
                "score": entry.score,
                "excluded": entry.is_excluded(),
            })
        })
        .collect();

    json!({
        "query": ranking.query(),
        "total": ranking.len(),
        "results": entries,
    })
}

/// Render frequency-model statistics as a text summary.
pub fn render_stats(
    word_table: &WordFrequencyTable,
    tag_table: Option<&TagFrequencyTable>,
    top: usize,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Corpus: {} items, {} distinct name words\n",
        word_table.total_items(),
        word_table.len()
    ));

    let mut words: Vec<(&str, u32)> = word_table.iter().collect();
    // Rarest first; ties alphabetical so output is deterministic
    words.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));

    out.push_str(&format!("Rarest words (top {}):\n", top));
    for (word, count) in words.iter().take(top) {
        out.push_str(&format!("  {:<24} in {} item(s)\n", word, count));
    }

    out.push_str(&format!("Most common words (top {}):\n", top));
    for (word, count) in words.iter().rev().take(top) {
        out.push_str(&format!("  {:<24} in {} item(s)\n", word, count));
    }

    if let Some(tags) = tag_table {
        let mut tag_counts: Vec<(&str, u32)> = tags.iter().collect();
        tag_counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        out.push_str(&format!("Tags ({}):\n", tags.len()));
        for (tag, count) in tag_counts {
            out.push_str(&format!("  {:<24} on {} item(s)\n", tag, count));
        }
    }

    out
}

/// Render stats as machine-readable JSON.
pub fn stats_to_json(
    word_table: &WordFrequencyTable,
    tag_table: Option<&TagFrequencyTable>,
) -> Value {
    let words: HashMap<&str, u32> = word_table.iter().collect();
    let tags: Option<HashMap<&str, u32>> = tag_table.map(|t| t.iter().collect());
    json!({
        "total_items": word_table.total_items(),
        "distinct_words": word_table.len(),
        "words": words,
        "tags": tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use setrank::filter::TagFilter;
    use setrank::session::RankingSession;

    fn corpus() -> Vec<TaggedItem> {
        vec![
            TaggedItem::builder("1", "Chest Flies").tag("chest").build(),
            TaggedItem::builder("2", "Dumbbell Pullovers").tag("chest").build(),
            TaggedItem::builder("3", "Incline Chest Press").tag("chest").build(),
            TaggedItem::builder("4", "Tricep Pulldowns").tag("triceps").build(),
        ]
    }

    #[test]
    fn test_hide_policy_drops_filtered_rows() {
        let items = corpus();
        let session = RankingSession::with_tags(&items);
        let ranking = session
            .rank_tagged(&items, "chest", &TagFilter::new(["triceps"]))
            .unwrap();

        let table = render_ranking(&ranking, &items, ExcludedPolicy::Hide, None, false);
        assert!(table.contains("Tricep Pulldowns"));
        assert!(!table.contains("Chest Flies"));
    }

    #[test]
    fn test_dim_policy_keeps_filtered_rows_last() {
        let items = corpus();
        let session = RankingSession::with_tags(&items);
        let ranking = session
            .rank_tagged(&items, "chest", &TagFilter::new(["triceps"]))
            .unwrap();

        let table = render_ranking(&ranking, &items, ExcludedPolicy::Dim, None, false);
        assert!(table.contains("Chest Flies"));
        assert!(table.contains("(filtered)"));
        let tricep_pos = table.find("Tricep Pulldowns").unwrap();
        let chest_pos = table.find("Chest Flies").unwrap();
        assert!(tricep_pos < chest_pos);
    }

    #[test]
    fn test_limit_truncates_output() {
        let items = corpus();
        let session = RankingSession::with_tags(&items);
        let ranking = session
            .rank_tagged(&items, "", &TagFilter::none())
            .unwrap();

        let json = ranking_to_json(&ranking, &items, ExcludedPolicy::Hide, Some(2));
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
        assert_eq!(json["total"], 4);
    }

    #[test]
    fn test_json_shape() {
        let items = corpus();
        let session = RankingSession::with_tags(&items);
        let ranking = session
            .rank_tagged(&items, "chest", &TagFilter::none())
            .unwrap();

        let json = ranking_to_json(&ranking, &items, ExcludedPolicy::Hide, None);
        assert_eq!(json["query"], "chest");
        let first = &json["results"][0];
        assert_eq!(first["id"], "1");
        assert_eq!(first["name"], "Chest Flies");
        assert_eq!(first["excluded"], false);
    }

    #[test]
    fn test_stats_mentions_cardinalities() {
        let items = corpus();
        let session = RankingSession::with_tags(&items);
        let stats = render_stats(session.word_table(), session.tag_table(), 3);
        assert!(stats.contains("4 items"));
        assert!(stats.contains("chest"));
        assert!(stats.contains("triceps"));
    }

    #[test]
    fn test_empty_ranking_renders_empty_state() {
        let items: Vec<TaggedItem> = vec![];
        let session = RankingSession::with_tags(&items);
        let ranking = session.rank_tagged(&items, "chest", &TagFilter::none()).unwrap();
        let table = render_ranking(&ranking, &items, ExcludedPolicy::Hide, None, false);
        assert_eq!(table, "No results to show.");
    }
}
