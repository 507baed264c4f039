// gatekeeper-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// Configuration errors. All of them are detected before the first query runs.
#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Assertion count mismatch: {queries} queries but {failure_values} failure values")]
    #[diagnostic(
        code(gatekeeper::config::length_mismatch),
        help("Each query needs exactly one failure value at the same position.")
    )]
    LengthMismatch {
        queries: usize,
        failure_values: usize,
    },

    #[error("Invalid target '{value}': {reason}")]
    #[diagnostic(
        code(gatekeeper::config::target),
        help("Database and table must be plain SQL identifiers (letters, digits, '_').")
    )]
    InvalidTarget { value: String, reason: String },

    #[error("Invalid query template #{index}: {reason}")]
    #[diagnostic(
        code(gatekeeper::config::template),
        help("Use exactly one '{{}}' or '{{table}}' placeholder for the qualified table name.")
    )]
    InvalidTemplate { index: usize, reason: String },

    #[error("Query #{index} is not a read-only statement: {reason}")]
    #[diagnostic(
        code(gatekeeper::config::read_only),
        help("Quality checks may only run a single SELECT statement.")
    )]
    NotReadOnly { index: usize, reason: String },

    #[error("Check definition '{0}' has no assertions")]
    #[diagnostic(code(gatekeeper::config::empty_check))]
    NoAssertions(String),

    #[error("Check definition '{name}' is ambiguous: {reason}")]
    #[diagnostic(code(gatekeeper::config::ambiguous))]
    AmbiguousDefinition { name: String, reason: String },

    #[error("Check '{0}' not found")]
    #[diagnostic(code(gatekeeper::config::check_not_found))]
    CheckNotFound(String),
}
