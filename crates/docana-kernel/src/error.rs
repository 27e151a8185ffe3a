//! Error types for docana kernel operations.

use crate::domain::Domain;

/// Errors arising from registry, document, or tokenizer operations.
///
/// Capacity and transition errors are contract violations: callers are
/// expected to abort the job rather than recover.
#[derive(Debug, thiserror::Error)]
pub enum DocanaError {
    /// A registry already holds its maximum number of entries.
    #[error("registry full: {domain} holds the maximum of {limit} entries")]
    RegistryFull { domain: Domain, limit: usize },

    /// The document already holds its maximum number of lines.
    #[error("document full: cannot write line {line} (capacity {limit})")]
    DocumentFull { line: usize, limit: usize },

    /// A key with no characters besides whitespace or the colon.
    #[error("empty key in {domain} registry")]
    EmptyKey { domain: Domain },

    /// An operation was requested in a state that does not allow it.
    #[error("invalid transition: cannot {action} while {state}")]
    InvalidTransition { state: String, action: &'static str },

    /// A key carried an argument that could not be interpreted.
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A key line could not be tokenized.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Read or write failure.
    #[error("io error: {0}")]
    Io(String),
}
