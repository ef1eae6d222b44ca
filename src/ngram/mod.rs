//! N-gram extraction and statistics over tokenized messages.
//!
//! This module consumes the tokenizer's output contract: each message's
//! text becomes an ordered token list, windows of sizes `[min_n, max_n]`
//! slide over it, and distinct n-grams receive stable integer IDs in
//! first-seen order across the whole corpus. Statistics aggregate the
//! resulting occurrence table into repetition and distinct-poster
//! counts.
//!
//! An n-gram's identity is its serialized form: tokens joined by a
//! single space, case already folded by the tokenizer. Two n-grams with
//! identical token sequences are the same n-gram regardless of source
//! message.

pub mod extract;
pub mod stats;

// Re-export commonly used types
pub use extract::{NgramExtraction, NgramExtractor, NgramParams};
pub use stats::{
    NgramReportRow, NgramStat, NgramSummaryRow, compute_statistics, full_report, summarize,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw input message, as handed over by an importer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Source-system message identifier.
    pub message_id: String,
    /// Source-system author identifier.
    pub author_id: String,
    /// Free-form message text.
    pub text: String,
    /// Posting time, when the source provides one.
    pub timestamp: Option<DateTime<Utc>>,
}

impl MessageRecord {
    /// Create a record without a timestamp.
    pub fn new<S: Into<String>>(message_id: S, author_id: S, text: S) -> Self {
        MessageRecord {
            message_id: message_id.into(),
            author_id: author_id.into(),
            text: text.into(),
            timestamp: None,
        }
    }

    /// Set the posting time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A message that passed input validation, carrying its surrogate ID.
///
/// Surrogate IDs are 1-indexed positions in the raw input and are
/// assigned before invalid rows are dropped, so a filtered input leaves
/// gaps rather than renumbering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreparedMessage {
    pub surrogate_id: u64,
    pub message_id: String,
    pub author_id: String,
    pub text: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// One deduplicated n-gram occurrence within a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageNgram {
    pub message_surrogate_id: u64,
    pub ngram_id: u64,
}

/// The global definition of a distinct n-gram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NgramDefinition {
    /// First-seen integer ID. Deterministic for a given input ordering,
    /// but an implementation artifact rather than a cross-run contract.
    pub ngram_id: u64,
    /// Space-joined serialized token sequence.
    pub words: String,
    /// Number of tokens in the n-gram.
    pub length: usize,
}
