//! Pattern library for social-media tokenization.
//!
//! This module defines the base regex sources for every entity and
//! script class, synthesizes per-configuration composite matchers, and
//! caches the compiled results by configuration fingerprint.
//!
//! Two composite matchers exist per configuration:
//!
//! - the *comprehensive* pattern: an alternation of all enabled token
//!   types, in fixed priority order, compiled case-insensitively. A
//!   single find-all pass over the text yields every token in document
//!   order.
//! - the optional *exclusion* pattern: an alternation of the entity
//!   types whose inclusion is disabled. Matching spans are blanked out
//!   before tokenization so disabled entities vanish whole instead of
//!   fragmenting into component words.
//!
//! Priority order matters because alternation resolves leftmost-first at
//! each position: entities must come before the generic word pattern
//! that would otherwise consume their content.

pub mod compiler;

use std::sync::Arc;

use ahash::AHashMap;
use lazy_static::lazy_static;
use log::{debug, warn};
use parking_lot::RwLock;

use crate::analysis::config::TokenizerConfig;

pub use compiler::{CompiledPattern, FancyPatternCompiler, PatternCompiler, StandardPatternCompiler};

/// Base pattern sources for individual token classes.
pub mod base {
    /// http/https URLs, `www.` URLs, and bare domain-with-TLD tokens
    /// with an optional path.
    pub const URL: &str = r"(?:https?://\S+|www\.\S+|[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}(?:/\S*)?)";

    /// Email addresses: local part, `@`, dotted domain labels, TLD.
    pub const EMAIL: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

    /// `@` followed by word characters. `\w` is Unicode-aware, so
    /// non-Latin handles (Korean, Arabic, ...) match too.
    pub const MENTION: &str = r"@\w+";

    /// `#` followed by word characters.
    pub const HASHTAG: &str = r"#\w+";

    /// `$` followed by 1–5 uppercase letters, not followed by a word
    /// character. The inner group opts out of the surrounding
    /// case-insensitive compilation: cashtags are uppercase-only.
    pub const CASHTAG: &str = r"(?-i:\$[A-Z]{1,5}\b)";

    /// Ordinals, currency-prefixed amounts, separator-grouped numbers
    /// (`200,000`, `1,234,567`), and plain integers/decimals with an
    /// optional trailing percent sign. Grouped forms come before plain
    /// integers so separators are not treated as token boundaries.
    pub const NUMERIC: &str = r"(?:\d+(?:st|nd|rd|th)\b|[$€£¥₹₽¢]\d+(?:[.,]\d+)*|\d{1,3}(?:[.,]\d{3})+(?:\.\d+)?%?|\d+[.,]\d+%?|\d+(?:\.\d+)?%?)";

    /// Single code points from the common emoji blocks.
    pub const EMOJI: &str = r"(?:[\x{1F600}-\x{1F64F}]|[\x{1F300}-\x{1F5FF}]|[\x{1F680}-\x{1F6FF}]|[\x{1F1E0}-\x{1F1FF}]|[\x{2700}-\x{27BF}]|[\x{1F900}-\x{1F9FF}]|[\x{2600}-\x{26FF}])";

    /// Latin letter runs, permitting internal abbreviation dots
    /// (`U.S.`, `c.e.o.s`), hyphens and straight/curly apostrophes for
    /// contractions, possessives and compounds, plus an optional single
    /// trailing dot.
    pub const LATIN_WORD: &str = r"[a-zA-Z]+(?:[.'’\-][a-zA-Z]+)*\.?";

    /// Whole runs of Hangul syllables. Korean is space-delimited and is
    /// never split into individual syllables.
    pub const KOREAN_WORD: &str = r"[\x{AC00}-\x{D7AF}]+";

    /// CJK ideographs (Unified + Extension A), Hiragana, Katakana.
    pub const CJK_CHAR: &str = r"[\x{4E00}-\x{9FFF}\x{3400}-\x{4DBF}\x{3040}-\x{309F}\x{30A0}-\x{30FF}]";

    /// Arabic, Arabic Supplement, Arabic Extended-A.
    pub const ARABIC_CHAR: &str = r"[\x{0600}-\x{06FF}\x{0750}-\x{077F}\x{08A0}-\x{08FF}]";

    /// Thai.
    pub const THAI_CHAR: &str = r"[\x{0E00}-\x{0E7F}]";

    /// Khmer, Myanmar, Buginese, Balinese.
    pub const SEA_CHAR: &str = r"[\x{1780}-\x{17FF}\x{1000}-\x{109F}\x{1A00}-\x{1A1F}\x{1B00}-\x{1B7F}]";

    /// Common ASCII punctuation marks, one token each when enabled.
    pub const PUNCTUATION: &str = r#"[.!?;:,\-()\[\]{}"']"#;

    /// Last-resort pattern: any non-space run.
    pub const CATCH_ALL: &str = r"\S+";

    /// The combined word pattern: Latin words, whole Korean words, then
    /// runs of the character-level script classes. Korean precedes the
    /// character classes so Hangul runs match as whole words.
    pub fn word() -> String {
        format!("(?:{LATIN_WORD}|{KOREAN_WORD}|{CJK_CHAR}+|{ARABIC_CHAR}+|{THAI_CHAR}+|{SEA_CHAR}+)")
    }
}

/// Build the comprehensive pattern source for a configuration.
///
/// Sub-patterns for every enabled feature are appended in fixed priority
/// order: URL, email, mention, hashtag, cashtag, emoji, numeric, word,
/// punctuation. The word pattern is always present.
pub fn comprehensive_source(config: &TokenizerConfig) -> String {
    let mut parts: Vec<String> = Vec::new();

    if config.include_urls {
        parts.push(base::URL.to_string());
    }
    if config.include_emails {
        parts.push(base::EMAIL.to_string());
    }
    if config.extract_mentions {
        parts.push(base::MENTION.to_string());
    }
    if config.extract_hashtags {
        parts.push(base::HASHTAG.to_string());
    }
    if config.extract_cashtags {
        parts.push(base::CASHTAG.to_string());
    }
    if config.include_emoji {
        parts.push(base::EMOJI.to_string());
    }
    if config.include_numeric {
        parts.push(base::NUMERIC.to_string());
    }

    // The core tokenization: always present.
    parts.push(base::word());

    if config.include_punctuation {
        parts.push(base::PUNCTUATION.to_string());
    }

    format!("(?i)(?:{})", parts.join("|"))
}

/// Build the exclusion pattern source for a configuration, or `None` if
/// no entity type is excluded.
///
/// Spans matching this pattern are blanked out before tokenization, so
/// disabled URLs/emails/numbers are never fragmented into component
/// words.
pub fn exclusion_source(config: &TokenizerConfig) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();

    if !config.include_urls {
        parts.push(base::URL);
    }
    if !config.include_emails {
        parts.push(base::EMAIL);
    }
    if !config.include_numeric {
        parts.push(base::NUMERIC);
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("(?i)(?:{})", parts.join("|")))
    }
}

/// The compiled matchers for one configuration.
#[derive(Clone, Debug)]
pub struct PatternSet {
    comprehensive: CompiledPattern,
    exclusion: Option<CompiledPattern>,
}

impl PatternSet {
    /// The single alternation matching all enabled token types in
    /// priority order.
    pub fn comprehensive(&self) -> &CompiledPattern {
        &self.comprehensive
    }

    /// The matcher for entities to blank out before tokenization, if
    /// any type is excluded.
    pub fn exclusion(&self) -> Option<&CompiledPattern> {
        self.exclusion.as_ref()
    }
}

lazy_static! {
    static ref SHARED_LIBRARY: Arc<PatternLibrary> = Arc::new(PatternLibrary::new());
}

/// Compiles and caches composite matchers per tokenizer configuration.
///
/// The cache is owned by the library instance; pass one `Arc` of it to
/// every tokenizer that should share compiled patterns. Population is
/// idempotent, so concurrent first access for the same fingerprint is
/// safe; at worst a racing caller compiles a duplicate that is then
/// dropped.
pub struct PatternLibrary {
    compilers: Vec<Box<dyn PatternCompiler>>,
    cache: RwLock<AHashMap<u64, Arc<PatternSet>>>,
}

impl PatternLibrary {
    /// Create a library with the default compiler chain: the
    /// linear-time engine first, the backtracking engine as fallback.
    pub fn new() -> Self {
        Self::with_compilers(vec![
            Box::new(StandardPatternCompiler::new()),
            Box::new(FancyPatternCompiler::new()),
        ])
    }

    /// Create a library with a custom compiler chain, tried in order.
    pub fn with_compilers(compilers: Vec<Box<dyn PatternCompiler>>) -> Self {
        PatternLibrary {
            compilers,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// The process-wide default library, shared by convenience entry
    /// points so repeated calls reuse compiled patterns.
    pub fn shared() -> Arc<PatternLibrary> {
        Arc::clone(&SHARED_LIBRARY)
    }

    /// Get (building and caching if necessary) the pattern set for a
    /// configuration.
    pub fn pattern_set(&self, config: &TokenizerConfig) -> Arc<PatternSet> {
        let key = config.fingerprint();

        if let Some(set) = self.cache.read().get(&key) {
            return Arc::clone(set);
        }

        let built = Arc::new(self.build_pattern_set(config));
        let mut cache = self.cache.write();
        Arc::clone(cache.entry(key).or_insert(built))
    }

    fn build_pattern_set(&self, config: &TokenizerConfig) -> PatternSet {
        let comprehensive = self.compile_lenient(&comprehensive_source(config));
        let exclusion = exclusion_source(config).map(|source| self.compile_lenient(&source));

        PatternSet {
            comprehensive,
            exclusion,
        }
    }

    /// Compile through the chain; on total failure substitute the
    /// catch-all non-space pattern. Never fails.
    fn compile_lenient(&self, source: &str) -> CompiledPattern {
        for compiler in &self.compilers {
            match compiler.compile(source) {
                Ok(pattern) => return pattern,
                Err(e) => debug!("{} compiler rejected pattern: {e}", compiler.name()),
            }
        }

        warn!("all compilers rejected pattern; substituting catch-all");
        StandardPatternCompiler::new()
            .compile(base::CATCH_ALL)
            .expect("catch-all pattern should be valid")
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comprehensive_source_priority_order() {
        let config = TokenizerConfig::default();
        let source = comprehensive_source(&config);

        let url_pos = source.find("https?").unwrap();
        let mention_pos = source.find("@\\w+").unwrap();
        let hashtag_pos = source.find("#\\w+").unwrap();
        assert!(url_pos < mention_pos);
        assert!(mention_pos < hashtag_pos);
    }

    #[test]
    fn test_default_config_has_no_exclusion() {
        let config = TokenizerConfig::default();
        assert!(exclusion_source(&config).is_none());
    }

    #[test]
    fn test_exclusion_built_for_disabled_urls() {
        let config = TokenizerConfig {
            include_urls: false,
            ..TokenizerConfig::default()
        };
        let source = exclusion_source(&config).unwrap();
        assert!(source.contains("https?"));

        let library = PatternLibrary::new();
        let set = library.pattern_set(&config);
        assert!(set.exclusion().is_some());
    }

    #[test]
    fn test_pattern_set_is_cached_by_fingerprint() {
        let library = PatternLibrary::new();
        let config = TokenizerConfig::default();

        let first = library.pattern_set(&config);
        let second = library.pattern_set(&config);
        assert!(Arc::ptr_eq(&first, &second));

        let other = TokenizerConfig {
            include_emoji: true,
            ..TokenizerConfig::default()
        };
        let third = library.pattern_set(&other);
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_empty_compiler_chain_degrades_to_catch_all() {
        let library = PatternLibrary::with_compilers(Vec::new());
        let set = library.pattern_set(&TokenizerConfig::default());
        assert_eq!(set.comprehensive().as_str(), base::CATCH_ALL);
    }

    #[test]
    fn test_comprehensive_matches_entities_before_words() {
        let library = PatternLibrary::new();
        let set = library.pattern_set(&TokenizerConfig::default());

        let text = "hey @user visit https://example.com";
        let tokens: Vec<&str> = set
            .comprehensive()
            .find_ranges(text)
            .into_iter()
            .map(|r| &text[r])
            .collect();
        assert_eq!(tokens, vec!["hey", "@user", "visit", "https://example.com"]);
    }

    #[test]
    fn test_cashtag_requires_uppercase() {
        let config = TokenizerConfig {
            extract_cashtags: true,
            case_handling: crate::analysis::config::CaseHandling::Preserve,
            ..TokenizerConfig::default()
        };
        let library = PatternLibrary::new();
        let set = library.pattern_set(&config);

        let text = "$TSLA and $fake and $TOOLONG";
        let tokens: Vec<&str> = set
            .comprehensive()
            .find_ranges(text)
            .into_iter()
            .map(|r| &text[r])
            .collect();
        assert!(tokens.contains(&"$TSLA"));
        assert!(!tokens.contains(&"$fake"));
        assert!(!tokens.contains(&"$TOOLONG"));
    }
}
