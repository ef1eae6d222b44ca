//! Text analysis module for Tanager.
//!
//! This module provides the Unicode-aware social-media tokenizer and its
//! supporting pieces: the configuration record, the pattern library with
//! its compiler strategies, and the script-classification helpers.
//!
//! The pipeline for a single `tokenize` call:
//!
//! ```text
//! Raw text
//!     │  preprocess (NFKC normalization, case folding)
//!     ▼
//! Exclusion blanking (disabled URLs/emails/numbers vanish)
//!     │
//!     ▼
//! Comprehensive find-all (one left-to-right pass, document order)
//!     │  URL cleanup, script-boundary splitting
//!     ▼
//! Postprocess filter (strip, emoji toggle, length bounds)
//! ```

pub mod config;
pub mod pattern;
pub mod script;
pub mod tokenizer;

// Re-export commonly used types
pub use config::{CaseHandling, LanguageFamily, TokenizerConfig};
pub use pattern::{PatternLibrary, PatternSet};
pub use tokenizer::{SocialTokenizer, TokenList, Tokenizer, tokenize_text};
