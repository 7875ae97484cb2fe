//! Errors raised when naming policies and categories at runtime.

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a name into a selector input.
///
/// Selection itself cannot fail at runtime; these only surface when a
/// policy or category arrives as text (command line, config, logs).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unknown execution policy name
    #[error("unknown execution policy: {0:?} (expected seq, unseq, par or par-unseq)")]
    Policy(String),

    /// Unknown iterator category name
    #[error("unknown iterator category: {0:?}")]
    Category(String),

    /// Unknown comparison category name
    #[error("unknown comparison category: {0:?} (expected strong, weak or partial)")]
    Comparison(String),
}
