//! Pattern compiler strategies.
//!
//! Pattern sources are compiled through a chain of [`PatternCompiler`]
//! implementations chosen when the [`PatternLibrary`] is constructed,
//! not at each call site. The default chain tries the linear-time engine
//! first and falls back to the backtracking engine, which accepts a
//! broader syntax (lookaround, backreferences) for caller-extended
//! patterns.
//!
//! [`PatternLibrary`]: super::PatternLibrary

use std::ops::Range;

use log::debug;

use crate::error::{Result, TanagerError};

/// A compiled pattern, independent of the engine that produced it.
///
/// Both engines are safe for concurrent read-only use, so one compiled
/// pattern may be shared across threads.
#[derive(Clone, Debug)]
pub enum CompiledPattern {
    /// Compiled by the linear-time engine.
    Standard(regex::Regex),
    /// Compiled by the backtracking engine.
    Fancy(Box<fancy_regex::Regex>),
}

impl CompiledPattern {
    /// Byte ranges of all non-overlapping matches, in document order.
    ///
    /// Match-time errors from the backtracking engine (e.g. a
    /// backtracking limit) drop the affected match rather than failing
    /// the call.
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            CompiledPattern::Standard(re) => {
                re.find_iter(text).map(|m| m.start()..m.end()).collect()
            }
            CompiledPattern::Fancy(re) => re
                .find_iter(text)
                .filter_map(|m| match m {
                    Ok(m) => Some(m.start()..m.end()),
                    Err(e) => {
                        debug!("dropping match after engine error: {e}");
                        None
                    }
                })
                .collect(),
        }
    }

    /// Replace every match with a single space.
    pub fn blank_matches(&self, text: &str) -> String {
        let ranges = self.find_ranges(text);
        if ranges.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for range in ranges {
            out.push_str(&text[last..range.start]);
            out.push(' ');
            last = range.end;
        }
        out.push_str(&text[last..]);
        out
    }

    /// The source pattern this was compiled from.
    pub fn as_str(&self) -> &str {
        match self {
            CompiledPattern::Standard(re) => re.as_str(),
            CompiledPattern::Fancy(re) => re.as_str(),
        }
    }
}

/// Strategy trait for compiling a pattern source into a matcher.
pub trait PatternCompiler: Send + Sync {
    /// Compile the given pattern source.
    fn compile(&self, pattern: &str) -> Result<CompiledPattern>;

    /// Get the name of this compiler (for diagnostics).
    fn name(&self) -> &'static str;
}

/// Compiler backed by the linear-time engine.
///
/// Preferred for untrusted input: matching cost is linear in the input
/// size regardless of the pattern.
#[derive(Clone, Debug, Default)]
pub struct StandardPatternCompiler;

impl StandardPatternCompiler {
    /// Create a new standard compiler.
    pub fn new() -> Self {
        StandardPatternCompiler
    }
}

impl PatternCompiler for StandardPatternCompiler {
    fn compile(&self, pattern: &str) -> Result<CompiledPattern> {
        let regex = regex::Regex::new(pattern)
            .map_err(|e| TanagerError::analysis(format!("Invalid regex pattern: {e}")))?;
        Ok(CompiledPattern::Standard(regex))
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Compiler backed by the backtracking engine.
///
/// Accepts syntax the linear-time engine rejects (lookaround,
/// backreferences) at the cost of backtracking match behavior.
#[derive(Clone, Debug, Default)]
pub struct FancyPatternCompiler;

impl FancyPatternCompiler {
    /// Create a new backtracking compiler.
    pub fn new() -> Self {
        FancyPatternCompiler
    }
}

impl PatternCompiler for FancyPatternCompiler {
    fn compile(&self, pattern: &str) -> Result<CompiledPattern> {
        let regex = fancy_regex::Regex::new(pattern)
            .map_err(|e| TanagerError::analysis(format!("Invalid regex pattern: {e}")))?;
        Ok(CompiledPattern::Fancy(Box::new(regex)))
    }

    fn name(&self) -> &'static str {
        "fancy"
    }
}
