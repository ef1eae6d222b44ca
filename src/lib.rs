//! # Tanager
//!
//! Unicode-aware multilingual tokenization and n-gram analysis for
//! social-media datasets.
//!
//! ## Features
//!
//! - Single-pass tokenization that preserves document order across plain
//!   words and social-media entities (hashtags, mentions, URLs, emails,
//!   cashtags, emoji)
//! - Script-family-aware segmentation: space-delimited Latin, Arabic and
//!   Korean text is kept as whole words, while CJK ideographs, kana and
//!   Thai are emitted one character at a time
//! - Configurable filtering: case folding, Unicode normalization, entity
//!   toggles, length bounds, punctuation and numeric handling
//! - N-gram extraction with within-message deduplication and stable
//!   first-seen n-gram IDs, plus repetition/poster statistics
//!
//! ## Example
//!
//! ```
//! use tanager::analysis::{TokenizerConfig, tokenize_text};
//!
//! let tokens = tokenize_text("Hey @user check #hashtag", TokenizerConfig::default()).unwrap();
//! assert_eq!(tokens, vec!["hey", "@user", "check", "#hashtag"]);
//! ```

pub mod analysis;
pub mod error;
pub mod ngram;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
