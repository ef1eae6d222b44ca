//! Unicode-aware social-media tokenizer.
//!
//! [`SocialTokenizer`] segments free-form, noisy, multi-script text into
//! an ordered list of token strings in a single left-to-right pass.
//! Social-media entities (hashtags, mentions, URLs, emails, cashtags,
//! emoji) are preserved as atomic tokens or excluded outright, depending
//! on configuration; script families are segmented according to their
//! conventions (whole words for Latin/Arabic/Korean, single characters
//! for CJK ideographs, kana and Thai).
//!
//! # Examples
//!
//! ```
//! use tanager::analysis::{SocialTokenizer, Tokenizer, TokenizerConfig};
//!
//! let tokenizer = SocialTokenizer::new(TokenizerConfig::default());
//! let tokens = tokenizer.tokenize("Hey @user check #hashtag visit https://x.com").unwrap();
//! assert_eq!(
//!     tokens,
//!     vec!["hey", "@user", "check", "#hashtag", "visit", "https://x.com"]
//! );
//! ```

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::analysis::config::{CaseHandling, LanguageFamily, TokenizerConfig};
use crate::analysis::pattern::{PatternLibrary, PatternSet};
use crate::analysis::script;
use crate::error::Result;

/// An ordered list of token strings.
pub type TokenList = Vec<String>;

/// Trait for tokenizers that convert text into an ordered token list.
///
/// Implementations must be deterministic: identical `(text, config)`
/// always yields identical output. The empty string tokenizes to an
/// empty list; there is no error case for missing input.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text.
    fn tokenize(&self, text: &str) -> Result<TokenList>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

lazy_static! {
    /// Abbreviation shapes like `u.s.` or `c.e.o.s`: short alphabetic
    /// runs separated by dots, optional trailing dot. These keep their
    /// dots during URL cleanup.
    static ref ABBREVIATION: Regex = Regex::new(r"^(?i)[a-z]{1,3}(?:\.[a-z]{1,3})+\.?$")
        .expect("abbreviation pattern should be valid");
}

/// The core Unicode-aware tokenizer for social-media text.
///
/// Instances are cheap: a configuration plus a handle to the compiled
/// pattern set. They hold no per-call state and may be shared across
/// threads.
#[derive(Clone)]
pub struct SocialTokenizer {
    config: TokenizerConfig,
    patterns: Arc<PatternSet>,
}

impl SocialTokenizer {
    /// Create a tokenizer using the process-wide shared pattern
    /// library.
    pub fn new(config: TokenizerConfig) -> Self {
        Self::with_library(config, PatternLibrary::shared())
    }

    /// Create a tokenizer against an explicit pattern library, sharing
    /// its compiled-pattern cache with other tokenizers built from it.
    pub fn with_library(config: TokenizerConfig, library: Arc<PatternLibrary>) -> Self {
        let patterns = library.pattern_set(&config);
        SocialTokenizer { config, patterns }
    }

    /// Get the configuration of this tokenizer.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Apply Unicode normalization and case folding.
    fn preprocess(&self, text: &str) -> String {
        let text: String = if self.config.normalize_unicode {
            text.nfkc().collect()
        } else {
            text.to_string()
        };

        match self.config.case_handling {
            CaseHandling::Preserve => text,
            CaseHandling::Lowercase => text.to_lowercase(),
            CaseHandling::Uppercase => text.to_uppercase(),
            // Smart casing is not implemented; Normalize folds to
            // lowercase.
            CaseHandling::Normalize => text.to_lowercase(),
        }
    }

    /// Extract tokens in document order with one find-all pass.
    fn extract(&self, text: &str) -> Vec<String> {
        // Blank out excluded entities first so they are never
        // fragmented into component words.
        let text = match self.patterns.exclusion() {
            Some(exclusion) => {
                let blanked = exclusion.blank_matches(text);
                blanked.split_whitespace().collect::<Vec<_>>().join(" ")
            }
            None => text.to_string(),
        };

        if text.trim().is_empty() {
            return Vec::new();
        }

        let ranges = self.patterns.comprehensive().find_ranges(&text);

        // Non-blank input that matches nothing (pure symbol soup the
        // patterns miss) survives as one trimmed token.
        if ranges.is_empty() {
            return vec![text.trim().to_string()];
        }

        let mut tokens = Vec::with_capacity(ranges.len());
        for range in ranges {
            let mut token = text[range].to_string();
            if token.trim().is_empty() {
                continue;
            }

            if is_url_like(&token) {
                token = clean_url_token(&token).to_string();
            }

            match self.config.fallback_language_family {
                LanguageFamily::Cjk => {
                    if script::contains_char_level(&token) && script::is_pure_char_level(&token) {
                        tokens.extend(
                            token
                                .chars()
                                .filter(|ch| !ch.is_whitespace())
                                .map(String::from),
                        );
                    } else {
                        tokens.push(token);
                    }
                }
                LanguageFamily::Mixed => tokens.extend(split_mixed_script_token(&token)),
                _ => tokens.push(token),
            }
        }

        tokens.retain(|token| !token.trim().is_empty());
        tokens
    }

    /// Apply configuration-based filtering to extracted tokens.
    fn postprocess(&self, tokens: Vec<String>) -> TokenList {
        let config = &self.config;
        let mut out = Vec::with_capacity(tokens.len());

        for mut token in tokens {
            if config.strip_whitespace {
                token = token.trim().to_string();
            }
            if token.is_empty() {
                continue;
            }

            if !config.include_emoji && script::is_emoji_sequence(&token) {
                continue;
            }

            let length = token.chars().count();
            if length < config.min_token_length {
                continue;
            }
            if let Some(max) = config.max_token_length {
                if length > max {
                    continue;
                }
            }

            out.push(token);
        }

        out
    }
}

impl Tokenizer for SocialTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenList> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let processed = self.preprocess(text);
        if processed.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tokens = self.extract(&processed);
        Ok(self.postprocess(tokens))
    }

    fn name(&self) -> &'static str {
        "social"
    }
}

/// Tokenize text with the given configuration, sharing compiled
/// patterns process-wide.
pub fn tokenize_text(text: &str, config: TokenizerConfig) -> Result<TokenList> {
    SocialTokenizer::new(config).tokenize(text)
}

/// Check if a token looks like a URL (but not an email and not an
/// abbreviation such as `u.s.`).
fn is_url_like(token: &str) -> bool {
    if is_email_like(token) {
        return false;
    }

    if token.starts_with("http://")
        || token.starts_with("https://")
        || token.starts_with("www.")
        || token.contains("://")
    {
        return true;
    }

    // Domain-like: contains a dot, has letters, no `@`. Abbreviation
    // shapes keep their dots and are not URLs.
    if token.contains('.') && token.chars().any(char::is_alphabetic) && !token.contains('@') {
        return !ABBREVIATION.is_match(token);
    }

    false
}

/// Check if a token looks like an email address.
fn is_email_like(token: &str) -> bool {
    token.contains('@') && token.contains('.') && !token.starts_with('@')
}

/// Remove trailing sentence punctuation from URL-like tokens.
fn clean_url_token(token: &str) -> &str {
    token.trim_end_matches(['.', '!', '?', ';', ':', ',', ')', ']', '}', '"', '\''])
}

/// Decompose a token at script boundaries.
///
/// Runs of character-level script code points longer than one character
/// burst into single-character tokens; everything else flushes as one
/// token. Tokens mixing Latin letters with CJK ideographs stay intact
/// (brand names like `iPhone用户`), unless the token is a social-media
/// entity starting with `@`, `#` or `$`. Hangul is word-level and never
/// reaches the character-burst path.
fn split_mixed_script_token(token: &str) -> Vec<String> {
    if !script::contains_char_level(token) {
        return vec![token.to_string()];
    }

    let is_entity = token.starts_with(['@', '#', '$']);
    let has_latin = token
        .chars()
        .any(|ch| script::script_family(ch) == LanguageFamily::Latin);
    let has_ideograph = token.chars().any(script::is_cjk_ideograph);
    if has_latin && has_ideograph && !is_entity {
        return vec![token.to_string()];
    }

    let mut result = Vec::new();
    let mut run = String::new();
    let mut run_is_char_level: Option<bool> = None;

    for ch in token.chars() {
        let char_level = script::is_char_level_script(ch);
        match run_is_char_level {
            None => {
                run.push(ch);
                run_is_char_level = Some(char_level);
            }
            Some(current) if current == char_level => run.push(ch),
            Some(current) => {
                flush_run(&mut result, &run, current);
                run.clear();
                run.push(ch);
                run_is_char_level = Some(char_level);
            }
        }
    }
    if let Some(current) = run_is_char_level {
        flush_run(&mut result, &run, current);
    }

    result
}

fn flush_run(out: &mut Vec<String>, run: &str, char_level: bool) {
    if run.trim().is_empty() {
        return;
    }
    if char_level && run.chars().count() > 1 {
        out.extend(run.chars().map(String::from));
    } else {
        out.push(run.to_string());
    }
}
