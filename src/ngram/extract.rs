//! N-gram extraction with within-message deduplication.
//!
//! For every prepared message, windows of each size in `[min_n, max_n]`
//! slide over the token list. Repetitions of the same n-gram inside one
//! message are recorded once; distinct n-gram strings receive integer
//! IDs in first-seen order over the whole corpus.
//!
//! Tokenization is fanned out across messages (it is a pure computation
//! per message), while ID assignment stays sequential in surrogate-ID
//! order so the IDs are deterministic for a given input ordering.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{TokenList, Tokenizer};
use crate::error::{Result, TanagerError};
use crate::ngram::{MessageNgram, MessageRecord, NgramDefinition, PreparedMessage};

/// Window-size parameters for n-gram extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NgramParams {
    /// Smallest window size, at least 1.
    pub min_n: usize,
    /// Largest window size, at least `min_n`.
    pub max_n: usize,
}

impl Default for NgramParams {
    fn default() -> Self {
        NgramParams { min_n: 3, max_n: 5 }
    }
}

/// The output tables of one extraction run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NgramExtraction {
    /// Valid messages with surrogate IDs, carried through for joins.
    pub messages: Vec<PreparedMessage>,
    /// Deduplicated `(message, ngram)` occurrence pairs, sorted by
    /// message then n-gram ID.
    pub message_ngrams: Vec<MessageNgram>,
    /// Distinct n-gram definitions, sorted by ID.
    pub definitions: Vec<NgramDefinition>,
}

/// Extracts n-gram occurrence and definition tables from raw messages.
pub struct NgramExtractor {
    params: NgramParams,
    tokenizer: Arc<dyn Tokenizer>,
}

impl NgramExtractor {
    /// Create an extractor.
    ///
    /// Window parameters are validated here: a zero-width window would
    /// emit empty-string n-grams into the definitions table, so it is
    /// rejected rather than degraded.
    pub fn new(params: NgramParams, tokenizer: Arc<dyn Tokenizer>) -> Result<Self> {
        if params.min_n == 0 {
            return Err(TanagerError::invalid_input("min_n must be at least 1"));
        }
        if params.min_n > params.max_n {
            return Err(TanagerError::invalid_input(format!(
                "min_n ({}) must not exceed max_n ({})",
                params.min_n, params.max_n
            )));
        }

        Ok(NgramExtractor { params, tokenizer })
    }

    /// Get the window parameters.
    pub fn params(&self) -> NgramParams {
        self.params
    }

    /// Run extraction over the given records.
    pub fn extract(&self, records: &[MessageRecord]) -> Result<NgramExtraction> {
        let messages = prepare_messages(records);

        let token_lists: Vec<TokenList> = messages
            .par_iter()
            .map(|message| self.tokenizer.tokenize(&message.text))
            .collect::<Result<Vec<_>>>()?;

        let mut ngram_ids: AHashMap<String, u64> = AHashMap::new();
        let mut message_ngrams = Vec::new();

        for (message, tokens) in messages.iter().zip(&token_lists) {
            // Tracks within-message repetitions.
            let mut seen: AHashSet<String> = AHashSet::new();

            if tokens.len() < self.params.min_n {
                continue;
            }
            for start in 0..=(tokens.len() - self.params.min_n) {
                for n in self.params.min_n..=self.params.max_n {
                    if start + n > tokens.len() {
                        break;
                    }

                    let serialized = serialize_ngram(&tokens[start..start + n]);
                    if !seen.insert(serialized.clone()) {
                        continue;
                    }

                    let next_id = ngram_ids.len() as u64;
                    let ngram_id = *ngram_ids.entry(serialized).or_insert(next_id);
                    message_ngrams.push(MessageNgram {
                        message_surrogate_id: message.surrogate_id,
                        ngram_id,
                    });
                }
            }
        }

        message_ngrams.sort_unstable_by_key(|pair| (pair.message_surrogate_id, pair.ngram_id));

        let mut definitions: Vec<NgramDefinition> = ngram_ids
            .into_iter()
            .map(|(words, ngram_id)| NgramDefinition {
                ngram_id,
                length: words.split(' ').count(),
                words,
            })
            .collect();
        definitions.sort_unstable_by_key(|def| def.ngram_id);

        Ok(NgramExtraction {
            messages,
            message_ngrams,
            definitions,
        })
    }
}

/// Assign 1-indexed surrogate IDs and drop records with missing text or
/// author. IDs are assigned before filtering, so dropped rows leave
/// gaps.
pub fn prepare_messages(records: &[MessageRecord]) -> Vec<PreparedMessage> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.text.is_empty() && !record.author_id.is_empty())
        .map(|(index, record)| PreparedMessage {
            surrogate_id: index as u64 + 1,
            message_id: record.message_id.clone(),
            author_id: record.author_id.clone(),
            text: record.text.clone(),
            timestamp: record.timestamp,
        })
        .collect()
}

/// The string that uniquely represents an n-gram.
fn serialize_ngram(window: &[String]) -> String {
    window.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::config::TokenizerConfig;
    use crate::analysis::tokenizer::SocialTokenizer;

    fn extractor(min_n: usize, max_n: usize) -> NgramExtractor {
        NgramExtractor::new(
            NgramParams { min_n, max_n },
            Arc::new(SocialTokenizer::new(TokenizerConfig::default())),
        )
        .unwrap()
    }

    fn records(texts: &[&str]) -> Vec<MessageRecord> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| MessageRecord::new(format!("m{i}"), format!("a{i}"), text.to_string()))
            .collect()
    }

    #[test]
    fn test_rejects_degenerate_params() {
        let tokenizer = Arc::new(SocialTokenizer::new(TokenizerConfig::default()));
        assert!(NgramExtractor::new(NgramParams { min_n: 0, max_n: 3 }, tokenizer.clone()).is_err());
        assert!(NgramExtractor::new(NgramParams { min_n: 4, max_n: 3 }, tokenizer).is_err());
    }

    #[test]
    fn test_surrogate_ids_keep_gaps_for_dropped_rows() {
        let mut input = records(&["one two three", "", "four five six"]);
        input[1].text = String::new();

        let prepared = prepare_messages(&input);
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].surrogate_id, 1);
        assert_eq!(prepared[1].surrogate_id, 3);
    }

    #[test]
    fn test_missing_author_is_dropped() {
        let mut input = records(&["one two three"]);
        input[0].author_id = String::new();
        assert!(prepare_messages(&input).is_empty());
    }

    #[test]
    fn test_window_slide_counts() {
        // 4 tokens, n in [2, 3]: three bigrams + two trigrams
        let extraction = extractor(2, 3)
            .extract(&records(&["alpha beta gamma delta"]))
            .unwrap();
        assert_eq!(extraction.message_ngrams.len(), 5);
        assert_eq!(extraction.definitions.len(), 5);

        let words: Vec<&str> = extraction
            .definitions
            .iter()
            .map(|d| d.words.as_str())
            .collect();
        assert!(words.contains(&"alpha beta"));
        assert!(words.contains(&"beta gamma delta"));
    }

    #[test]
    fn test_within_message_dedup() {
        let extraction = extractor(2, 2).extract(&records(&["go go go go"])).unwrap();
        // Every bigram is "go go"; it is recorded once.
        assert_eq!(extraction.message_ngrams.len(), 1);
        assert_eq!(extraction.definitions.len(), 1);
        assert_eq!(extraction.definitions[0].words, "go go");
        assert_eq!(extraction.definitions[0].length, 2);
    }

    #[test]
    fn test_ids_assigned_first_seen_across_corpus() {
        let extraction = extractor(2, 2)
            .extract(&records(&["alpha beta", "alpha beta", "gamma delta"]))
            .unwrap();

        assert_eq!(extraction.definitions.len(), 2);
        assert_eq!(extraction.definitions[0].ngram_id, 0);
        assert_eq!(extraction.definitions[0].words, "alpha beta");
        assert_eq!(extraction.definitions[1].ngram_id, 1);
        assert_eq!(extraction.definitions[1].words, "gamma delta");

        // Same n-gram in different messages shares one ID.
        assert_eq!(
            extraction
                .message_ngrams
                .iter()
                .filter(|p| p.ngram_id == 0)
                .count(),
            2
        );
    }

    #[test]
    fn test_short_messages_yield_no_ngrams() {
        let extraction = extractor(3, 5).extract(&records(&["only two"])).unwrap();
        assert!(extraction.message_ngrams.is_empty());
        assert!(extraction.definitions.is_empty());
        assert_eq!(extraction.messages.len(), 1);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let input = records(&[
            "go go go now",
            "go go go it's very bad",
            "go go go it's very bad it's very bad",
        ]);
        let first = extractor(3, 4).extract(&input).unwrap();
        let second = extractor(3, 4).extract(&input).unwrap();
        assert_eq!(first, second);
    }
}
