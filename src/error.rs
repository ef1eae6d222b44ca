//! Error types for the Tanager library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TanagerError`] enum. Tokenization itself is written to degrade rather
//! than fail: pattern-compilation problems are recovered internally and
//! never surface through `tokenize`.
//!
//! # Examples
//!
//! ```
//! use tanager::error::{Result, TanagerError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TanagerError::invalid_input("min_n must be at least 1"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use thiserror::Error;

/// The main error type for Tanager operations.
#[derive(Error, Debug)]
pub enum TanagerError {
    /// Analysis-related errors (pattern compilation, tokenization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid caller-supplied input or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for operations that may fail with [`TanagerError`].
pub type Result<T> = std::result::Result<T, TanagerError>;

impl TanagerError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TanagerError::Analysis(msg.into())
    }

    /// Create a new invalid-input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        TanagerError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TanagerError::analysis("bad pattern");
        assert_eq!(err.to_string(), "Analysis error: bad pattern");

        let err = TanagerError::invalid_input("min_n must be at least 1");
        assert_eq!(err.to_string(), "Invalid input: min_n must be at least 1");
    }
}
