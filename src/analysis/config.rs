//! Tokenizer configuration types.
//!
//! [`TokenizerConfig`] is a pure settings record: it carries no behavior
//! beyond its cache fingerprint and is never mutated during a
//! tokenization call. One config value may be shared across many calls
//! and many threads.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Language families that affect tokenization strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFamily {
    /// Space-separated languages (English, French, etc.)
    Latin,
    /// Chinese, Japanese and other character-segmented scripts
    Cjk,
    /// Arabic script languages
    Arabic,
    /// Mixed content requiring multiple strategies
    Mixed,
    /// Language detection failed or was not performed
    Unknown,
}

/// How to handle character case during tokenization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseHandling {
    /// Keep original case
    Preserve,
    /// Convert to lowercase
    Lowercase,
    /// Convert to uppercase
    Uppercase,
    /// Smart case normalization (currently folds to lowercase)
    Normalize,
}

/// Configuration for tokenizer behavior.
///
/// Controls all aspects of text tokenization including script handling,
/// social-media entity processing, and output formatting.
///
/// Entity toggles come in two flavors:
/// - `extract_hashtags` / `extract_mentions` / `extract_cashtags`: when
///   false, the marker is dropped and the remainder tokenizes as
///   component words (`#hashtag` → `hashtag`).
/// - `include_urls` / `include_emails` / `include_numeric`: when false,
///   matching spans are blanked out before tokenization, so the entity
///   vanishes entirely instead of fragmenting into component words.
///
/// Degenerate length bounds (`min_token_length > max_token_length`,
/// etc.) are not rejected; they simply produce an empty or near-empty
/// token list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Language family assumed when content gives no better signal.
    pub fallback_language_family: LanguageFamily,

    /// Whether to include punctuation marks as separate tokens.
    pub include_punctuation: bool,

    /// Whether to include numeric tokens (integers, decimals, ordinals,
    /// currency amounts).
    pub include_numeric: bool,

    /// Whether to include emoji as tokens.
    pub include_emoji: bool,

    /// How to handle character case during tokenization.
    pub case_handling: CaseHandling,

    /// Whether to apply Unicode NFKC normalization so visually identical
    /// composed/decomposed sequences tokenize identically.
    pub normalize_unicode: bool,

    /// Whether to preserve hashtags as single tokens.
    pub extract_hashtags: bool,

    /// Whether to preserve @mentions as single tokens.
    pub extract_mentions: bool,

    /// Whether to preserve cashtags (`$TSLA`) as single tokens.
    pub extract_cashtags: bool,

    /// Whether to include URLs as tokens.
    pub include_urls: bool,

    /// Whether to include email addresses as tokens.
    pub include_emails: bool,

    /// Minimum length (in scalar values) for tokens to be kept.
    pub min_token_length: usize,

    /// Maximum length for tokens. `None` applies no limit.
    pub max_token_length: Option<usize>,

    /// Whether to strip leading/trailing whitespace from tokens.
    pub strip_whitespace: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            fallback_language_family: LanguageFamily::Mixed,
            include_punctuation: false,
            include_numeric: true,
            include_emoji: false,
            case_handling: CaseHandling::Lowercase,
            normalize_unicode: true,
            extract_hashtags: true,
            extract_mentions: true,
            extract_cashtags: false,
            include_urls: true,
            include_emails: true,
            min_token_length: 1,
            max_token_length: None,
            strip_whitespace: true,
        }
    }
}

impl TokenizerConfig {
    /// Stable cache key over every option.
    ///
    /// Two configs with equal fields always produce the same
    /// fingerprint within a process, independent of any randomly keyed
    /// collection hasher.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
