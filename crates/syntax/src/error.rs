use thiserror::Error;

/// Result type for syntax operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Errors raised while preparing the lexical parsers.
///
/// Malformed input never produces one of these: bad manifest lines are skipped and
/// unreadable files degrade to empty text.
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// A built-in pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

