//! Repetition statistics over extracted n-grams.
//!
//! Aggregates the `(message, ngram)` occurrence table into per-n-gram
//! totals and distinct-poster counts, builds the sorted summary table,
//! and expands summaries into full per-author report rows. Group-by
//! maps iterate in unstable order, so every returned table is sorted
//! explicitly.

use ahash::{AHashMap, AHashSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ngram::extract::NgramExtraction;
use crate::ngram::PreparedMessage;

/// Aggregate counts for one n-gram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramStat {
    pub ngram_id: u64,
    /// How many messages contain the n-gram (within-message repetitions
    /// were already collapsed during extraction).
    pub total_reps: u64,
    /// How many distinct authors posted it.
    pub distinct_posters: u64,
}

/// A definition joined with its statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramSummaryRow {
    pub ngram_id: u64,
    pub words: String,
    pub length: usize,
    pub total_reps: u64,
    pub distinct_posters: u64,
}

/// One row of the full report: a summary row expanded per containing
/// message, with the author's repetition count alongside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NgramReportRow {
    pub ngram_id: u64,
    pub length: usize,
    pub words: String,
    pub total_reps: u64,
    pub distinct_posters: u64,
    pub author_id: String,
    pub reps_per_author: u32,
    pub message_surrogate_id: u64,
    pub message_id: String,
    pub message_text: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Compute per-n-gram statistics, filtering out singletons (n-grams
/// seen in only one message).
pub fn compute_statistics(extraction: &NgramExtraction) -> Vec<NgramStat> {
    let authors_by_message: AHashMap<u64, &str> = extraction
        .messages
        .iter()
        .map(|message| (message.surrogate_id, message.author_id.as_str()))
        .collect();

    let mut groups: AHashMap<u64, (u64, AHashSet<&str>)> = AHashMap::new();
    for pair in &extraction.message_ngrams {
        let entry = groups.entry(pair.ngram_id).or_default();
        entry.0 += 1;
        if let Some(author) = authors_by_message.get(&pair.message_surrogate_id) {
            entry.1.insert(author);
        }
    }

    let mut stats: Vec<NgramStat> = groups
        .into_iter()
        .filter(|(_, (total, _))| *total > 1)
        .map(|(ngram_id, (total_reps, posters))| NgramStat {
            ngram_id,
            total_reps,
            distinct_posters: posters.len() as u64,
        })
        .collect();
    stats.sort_unstable_by_key(|stat| stat.ngram_id);
    stats
}

/// Join definitions with statistics and sort by length, total
/// repetitions and distinct posters, all descending.
pub fn summarize(extraction: &NgramExtraction, stats: &[NgramStat]) -> Vec<NgramSummaryRow> {
    let stats_by_id: AHashMap<u64, &NgramStat> =
        stats.iter().map(|stat| (stat.ngram_id, stat)).collect();

    let mut rows: Vec<NgramSummaryRow> = extraction
        .definitions
        .iter()
        .filter_map(|def| {
            stats_by_id.get(&def.ngram_id).map(|stat| NgramSummaryRow {
                ngram_id: def.ngram_id,
                words: def.words.clone(),
                length: def.length,
                total_reps: stat.total_reps,
                distinct_posters: stat.distinct_posters,
            })
        })
        .collect();

    rows.sort_unstable_by(|a, b| {
        (b.length, b.total_reps, b.distinct_posters).cmp(&(
            a.length,
            a.total_reps,
            a.distinct_posters,
        ))
    });
    rows
}

/// Expand summary rows into the full report: one row per (n-gram,
/// containing message), with per-author repetition counts.
pub fn full_report(extraction: &NgramExtraction, summary: &[NgramSummaryRow]) -> Vec<NgramReportRow> {
    let messages_by_id: AHashMap<u64, &PreparedMessage> = extraction
        .messages
        .iter()
        .map(|message| (message.surrogate_id, message))
        .collect();

    let mut messages_by_ngram: AHashMap<u64, Vec<u64>> = AHashMap::new();
    for pair in &extraction.message_ngrams {
        messages_by_ngram
            .entry(pair.ngram_id)
            .or_default()
            .push(pair.message_surrogate_id);
    }

    let mut rows = Vec::new();
    for summary_row in summary {
        let Some(surrogate_ids) = messages_by_ngram.get(&summary_row.ngram_id) else {
            continue;
        };

        let mut reps_per_author: AHashMap<&str, u32> = AHashMap::new();
        for surrogate_id in surrogate_ids {
            if let Some(message) = messages_by_id.get(surrogate_id) {
                *reps_per_author.entry(message.author_id.as_str()).or_default() += 1;
            }
        }

        for surrogate_id in surrogate_ids {
            let Some(message) = messages_by_id.get(surrogate_id) else {
                continue;
            };
            rows.push(NgramReportRow {
                ngram_id: summary_row.ngram_id,
                length: summary_row.length,
                words: summary_row.words.clone(),
                total_reps: summary_row.total_reps,
                distinct_posters: summary_row.distinct_posters,
                author_id: message.author_id.clone(),
                reps_per_author: *reps_per_author.get(message.author_id.as_str()).unwrap_or(&0),
                message_surrogate_id: message.surrogate_id,
                message_id: message.message_id.clone(),
                message_text: message.text.clone(),
                timestamp: message.timestamp,
            });
        }
    }

    rows.sort_unstable_by(|a, b| {
        (b.length, b.total_reps, b.distinct_posters, b.reps_per_author)
            .cmp(&(a.length, a.total_reps, a.distinct_posters, a.reps_per_author))
            .then_with(|| a.author_id.cmp(&b.author_id))
            .then_with(|| a.message_surrogate_id.cmp(&b.message_surrogate_id))
    });
    rows
}
